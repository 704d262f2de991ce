use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use super::Canvas;
use crate::model::{ExternalLayer, LayerId, PixelRect, ScaleFactors};

/// Serialized canvas document.
///
/// ```json
/// { "name": "sheet-01", "layers": [
///     { "id": 1, "name": "Background", "background": true },
///     { "id": 7, "name": "ART-001 front", "bounds": { "left": 0, "top": 0, "right": 144, "bottom": 72 } }
/// ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDoc {
    #[serde(default)]
    pub name: String,
    pub layers: Vec<LayerDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDoc {
    pub id: LayerId,
    pub name: String,
    #[serde(default)]
    pub background: bool,
    /// Missing bounds make geometry queries fail for this layer.
    #[serde(default)]
    pub bounds: Option<PixelRect>,
}

impl LayerDoc {
    pub fn new(id: u64, name: impl Into<String>, bounds: PixelRect) -> Self {
        Self {
            id: LayerId(id),
            name: name.into(),
            background: false,
            bounds: Some(bounds),
        }
    }

    pub fn background(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: LayerId(id),
            name: name.into(),
            background: true,
            bounds: None,
        }
    }
}

/// In-memory canvas backed by an optional [`CanvasDoc`].
#[derive(Debug, Clone, Default)]
pub struct JsonCanvas {
    document: Option<CanvasDoc>,
    active: Option<LayerId>,
}

impl JsonCanvas {
    /// A canvas with an open document.
    pub fn new(document: CanvasDoc) -> Self {
        Self {
            document: Some(document),
            active: None,
        }
    }

    /// A canvas with no open document.
    pub fn without_document() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        let doc: CanvasDoc = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse canvas JSON {}", path))?;
        Ok(Self::new(doc))
    }

    pub fn save(&self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| anyhow!("No open document to save"))?;
        let json = serde_json::to_string_pretty(doc)?;
        std::fs::write(path.as_std_path(), json)
            .with_context(|| format!("Failed to write {}", path))
    }

    pub fn document(&self) -> Option<&CanvasDoc> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut CanvasDoc> {
        self.document.as_mut()
    }

    /// Close the document, returning it.
    pub fn close(&mut self) -> Option<CanvasDoc> {
        self.active = None;
        self.document.take()
    }

    pub fn active_layer(&self) -> Option<LayerId> {
        self.active
    }

    fn layer(&self, id: LayerId) -> Result<&LayerDoc> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| anyhow!("No open document"))?;
        doc.layers
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| anyhow!("Layer {} not found in document", id))
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut LayerDoc> {
        let doc = self
            .document
            .as_mut()
            .ok_or_else(|| anyhow!("No open document"))?;
        doc.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| anyhow!("Layer {} not found in document", id))
    }
}

impl Canvas for JsonCanvas {
    fn has_document(&self) -> bool {
        self.document.is_some()
    }

    fn layers(&self) -> Vec<ExternalLayer> {
        self.document
            .iter()
            .flat_map(|doc| doc.layers.iter())
            .map(|l| ExternalLayer {
                id: l.id,
                name: l.name.clone(),
                is_background: l.background,
            })
            .collect()
    }

    fn layer_bounds(&self, id: LayerId) -> Result<PixelRect> {
        self.layer(id)?
            .bounds
            .ok_or_else(|| anyhow!("Layer {} has no bounds", id))
    }

    fn activate_layer(&mut self, id: LayerId) -> Result<()> {
        self.layer(id)?;
        self.active = Some(id);
        Ok(())
    }

    fn scale_layer(&mut self, id: LayerId, scale: ScaleFactors) -> Result<()> {
        if !(scale.scale_x_percent.is_finite() && scale.scale_y_percent.is_finite()) {
            bail!("Non-finite scale {:?}", scale);
        }
        let layer = self.layer_mut(id)?;
        if layer.background {
            bail!("Background layer {} cannot be transformed", id);
        }
        let bounds = layer
            .bounds
            .ok_or_else(|| anyhow!("Layer {} has no bounds", id))?;
        layer.bounds = Some(bounds.scaled_about_center(scale));
        Ok(())
    }
}
