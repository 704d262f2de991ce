use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::pixels_to_mm;

/// Value used for blank article and size cells.
pub const UNKNOWN: &str = "Unknown";

// ────────────────────────────────────────────────────────────────────────────
// Canvas-side types
// ────────────────────────────────────────────────────────────────────────────

/// Stable identifier of a canvas layer, as assigned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A top-level layer as enumerated by the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLayer {
    pub id: LayerId,
    pub name: String,
    /// Background/base layers never take part in matching.
    pub is_background: bool,
}

/// Axis-aligned pixel bounding box `{left, top, right, bottom}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Rectangle scaled by percentage factors about its center.
    pub fn scaled_about_center(&self, scale: ScaleFactors) -> Self {
        let (cx, cy) = self.center();
        let hw = self.width() * scale.scale_x_percent / 100.0 * 0.5;
        let hh = self.height() * scale.scale_y_percent / 100.0 * 0.5;
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }
}

/// Non-uniform scale transform, in percent per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub scale_x_percent: f64,
    pub scale_y_percent: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

/// A width/height pair in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Physical size of a pixel extent, each side rounded to 0.1 mm.
    pub fn from_pixels(width_px: f64, height_px: f64) -> Self {
        Self::new(pixels_to_mm(width_px), pixels_to_mm(height_px))
    }
}

impl fmt::Display for PhysicalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{} mm", self.width_mm, self.height_mm)
    }
}

/// Association of a record with a canvas layer.
///
/// The layer id and the physical size only ever exist together, so a record
/// cannot carry dimensions without a layer or the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerMatch {
    pub layer_id: LayerId,
    pub size: PhysicalSize,
}

/// One row of the design table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    /// 0-based position in the loaded batch.
    pub index: usize,
    /// Row number in the source sheet (header is row 0).
    pub source_row: usize,
    pub image_ref: Option<String>,
    pub nominal_size: String,
    pub order_id: String,
    pub display_name: String,
    pub color: String,
    pub article_code: String,
    /// Set by reconciliation, updated by an explicit resize.
    #[serde(rename = "match")]
    pub layer_match: Option<LayerMatch>,
}

impl DesignRecord {
    /// Case-sensitive containment of the article code in a layer name.
    /// An empty article code never matches.
    pub fn matches_layer_name(&self, layer_name: &str) -> bool {
        !self.article_code.is_empty() && layer_name.contains(self.article_code.as_str())
    }

    pub fn is_matched(&self) -> bool {
        self.layer_match.is_some()
    }

    pub fn matched_layer_id(&self) -> Option<LayerId> {
        self.layer_match.map(|m| m.layer_id)
    }

    pub fn physical_size(&self) -> Option<PhysicalSize> {
        self.layer_match.map(|m| m.size)
    }

    pub fn physical_width_mm(&self) -> Option<f64> {
        self.physical_size().map(|s| s.width_mm)
    }

    pub fn physical_height_mm(&self) -> Option<f64> {
        self.physical_size().map(|s| s.height_mm)
    }

    /// Human-readable dimensions for list views.
    pub fn dimensions_label(&self) -> String {
        match self.physical_size() {
            Some(size) => size.to_string(),
            None => "size not determined".to_string(),
        }
    }

    pub fn color_label(&self) -> &str {
        if self.color.is_empty() {
            "not specified"
        } else {
            &self.color
        }
    }
}
