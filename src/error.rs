//! Error taxonomy for table loading, reconciliation and resizing.
//!
//! Every variant carries only what is needed to render the status line;
//! collaborator errors are folded in as their formatted message.

use crate::model::LayerId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// No file selected, file missing or empty.
    #[error("table unavailable: {0}")]
    SourceUnavailable(String),

    /// Malformed or unexpected table shape.
    #[error("could not parse table: {0}")]
    ParseFailure(String),

    #[error("no open document")]
    NoActiveDocument,

    /// Bounds of a single layer could not be queried.
    #[error("could not read bounds of layer {layer}: {reason}")]
    GeometryQueryFailure { layer: LayerId, reason: String },

    #[error("select a print from the list first")]
    NoSelection,

    #[error("enter valid dimensions in mm (got {width_mm} × {height_mm})")]
    InvalidDimensions { width_mm: f64, height_mm: f64 },

    /// A zero-size layer cannot be scaled by a finite factor.
    #[error("layer {layer} has degenerate bounds ({width_px} × {height_px} px)")]
    DegenerateLayer {
        layer: LayerId,
        width_px: f64,
        height_px: f64,
    },

    #[error("could not apply size: {0}")]
    TransformFailure(String),

    #[error("script failed: {0}")]
    ScriptFailure(String),
}

impl LayoutError {
    /// Failures absorbed by a reconciliation pass instead of aborting it.
    pub fn is_per_layer(&self) -> bool {
        matches!(self, Self::GeometryQueryFailure { .. })
    }
}
