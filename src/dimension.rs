//! Resizing a matched layer to an exact physical size.
//!
//! Scaling is independent per axis, so any width/height pair can be hit; the
//! aspect ratio of the layer is not preserved.

use tracing::info;

use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::model::{DesignRecord, LayerMatch, PhysicalSize, PixelRect, ScaleFactors};
use crate::units::mm_to_pixels;

/// Both sides must be finite and strictly positive.
pub fn validate_target(target: PhysicalSize) -> Result<(), LayoutError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(target.width_mm) && ok(target.height_mm) {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimensions {
            width_mm: target.width_mm,
            height_mm: target.height_mm,
        })
    }
}

/// Scale factors that bring a layer with `current` bounds to `target`.
///
/// Checks, in order: the record is matched, the target is valid, the current
/// bounds have positive width and height.
pub fn apply_size(
    record: &DesignRecord,
    target: PhysicalSize,
    current: PixelRect,
) -> Result<ScaleFactors, LayoutError> {
    let layer = record.matched_layer_id().ok_or(LayoutError::NoSelection)?;
    validate_target(target)?;

    let (width_px, height_px) = (current.width(), current.height());
    if !(width_px > 0.0 && height_px > 0.0) {
        return Err(LayoutError::DegenerateLayer {
            layer,
            width_px,
            height_px,
        });
    }

    Ok(ScaleFactors {
        scale_x_percent: 100.0 * mm_to_pixels(target.width_mm) / width_px,
        scale_y_percent: 100.0 * mm_to_pixels(target.height_mm) / height_px,
    })
}

/// Record the target size once the transform has been applied.
///
/// The stored size reflects the request, not a re-measurement; the next
/// reconciliation pass replaces it with measured bounds.
pub fn commit_size(record: &mut DesignRecord, target: PhysicalSize) -> Result<(), LayoutError> {
    let layer_id = record.matched_layer_id().ok_or(LayoutError::NoSelection)?;
    record.layer_match = Some(LayerMatch {
        layer_id,
        size: target,
    });
    Ok(())
}

/// Measure, scale and commit in one go.
pub fn resize_on_canvas(
    record: &mut DesignRecord,
    target: PhysicalSize,
    canvas: &mut dyn Canvas,
) -> Result<ScaleFactors, LayoutError> {
    let layer = record.matched_layer_id().ok_or(LayoutError::NoSelection)?;
    validate_target(target)?;
    if !canvas.has_document() {
        return Err(LayoutError::NoActiveDocument);
    }
    let current = canvas
        .layer_bounds(layer)
        .map_err(|e| LayoutError::GeometryQueryFailure {
            layer,
            reason: format!("{:#}", e),
        })?;
    let scale = apply_size(record, target, current)?;
    canvas
        .scale_layer(layer, scale)
        .map_err(|e| LayoutError::TransformFailure(format!("{:#}", e)))?;
    commit_size(record, target)?;
    info!(
        "Scaled layer {} ({}) by {:.3}% × {:.3}% to {}",
        layer, record.article_code, scale.scale_x_percent, scale.scale_y_percent, target
    );
    Ok(scale)
}
