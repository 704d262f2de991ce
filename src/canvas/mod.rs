//! Host canvas collaborators.
//!
//! The engines never touch a document directly. They go through [`Canvas`]
//! for layer enumeration, geometry and transforms, and through
//! [`ScriptExecutor`] to run layout automation. [`JsonCanvas`] is an
//! in-memory document that can be loaded from and saved to JSON.

pub mod json;

pub use json::{CanvasDoc, JsonCanvas, LayerDoc};

use anyhow::Result;

use crate::model::{ExternalLayer, LayerId, PixelRect, ScaleFactors};

/// The active document of the host application.
pub trait Canvas {
    /// Whether a document is open. All other calls assume one is.
    fn has_document(&self) -> bool;

    /// Top-level layers in stacking order.
    fn layers(&self) -> Vec<ExternalLayer>;

    /// Current axis-aligned bounds of a layer in pixels.
    fn layer_bounds(&self, id: LayerId) -> Result<PixelRect>;

    /// Make `id` the active layer (highlighted in the host).
    fn activate_layer(&mut self, id: LayerId) -> Result<()>;

    /// Apply a non-uniform percentage scale to a layer.
    fn scale_layer(&mut self, id: LayerId, scale: ScaleFactors) -> Result<()>;
}

/// Runs an opaque automation script against the canvas.
pub trait ScriptExecutor {
    fn execute(&mut self, script: &str, canvas: &mut dyn Canvas) -> Result<()>;
}

impl<F> ScriptExecutor for F
where
    F: FnMut(&str, &mut dyn Canvas) -> Result<()>,
{
    fn execute(&mut self, script: &str, canvas: &mut dyn Canvas) -> Result<()> {
        self(script, canvas)
    }
}
