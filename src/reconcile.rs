//! Reconciliation of canvas layers against design records.
//!
//! A pass walks the top-level layers in stacking order and assigns each
//! non-background layer to the first record (in table order) whose article
//! code occurs in the layer name. The result is built from scratch into fresh
//! containers every time: nothing from a previous pass survives.
//!
//! A record whose article code appears in several layer names is matched by
//! each of them. Every such layer keeps its own forward entry, while the
//! record itself (and the reverse entry) ends up pointing at the last of them
//! in stacking order.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::model::{DesignRecord, LayerId, LayerMatch, PhysicalSize};

/// Layer ↔ record association produced by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerMap {
    /// layer id → record index, in canvas stacking order.
    by_layer: IndexMap<LayerId, usize>,
    /// record index → layer id.
    by_record: BTreeMap<usize, LayerId>,
}

impl LayerMap {
    pub fn record_for_layer(&self, layer: LayerId) -> Option<usize> {
        self.by_layer.get(&layer).copied()
    }

    pub fn layer_for_record(&self, index: usize) -> Option<LayerId> {
        self.by_record.get(&index).copied()
    }

    pub fn contains_layer(&self, layer: LayerId) -> bool {
        self.by_layer.contains_key(&layer)
    }

    /// Number of forward entries (matched layers).
    pub fn len(&self) -> usize {
        self.by_layer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_layer.is_empty()
    }

    /// Number of records with a reverse entry.
    pub fn record_count(&self) -> usize {
        self.by_record.len()
    }

    /// Forward entries in canvas order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, usize)> + '_ {
        self.by_layer.iter().map(|(&l, &r)| (l, r))
    }

    /// Reverse entries by ascending record index.
    pub fn iter_records(&self) -> impl Iterator<Item = (usize, LayerId)> + '_ {
        self.by_record.iter().map(|(&r, &l)| (r, l))
    }

    fn insert(&mut self, layer: LayerId, record: usize) {
        self.by_layer.insert(layer, record);
        self.by_record.insert(record, layer);
    }
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Input records with freshly computed match state.
    pub records: Vec<DesignRecord>,
    pub map: LayerMap,
    /// Equals `map.len()`.
    pub match_count: usize,
    /// Layers whose bounds could not be read; absorbed by the pass.
    pub failures: Vec<LayoutError>,
}

/// Rebuild the record ↔ layer association from scratch.
///
/// Returns [`LayoutError::NoActiveDocument`] without doing any work when the
/// canvas has no open document.
pub fn reconcile(
    records: &[DesignRecord],
    canvas: &dyn Canvas,
) -> Result<Reconciliation, LayoutError> {
    if !canvas.has_document() {
        return Err(LayoutError::NoActiveDocument);
    }

    let mut records: Vec<DesignRecord> = records
        .iter()
        .cloned()
        .map(|mut r| {
            r.layer_match = None;
            r
        })
        .collect();
    let mut map = LayerMap::default();
    let mut failures = Vec::new();

    for layer in canvas.layers() {
        if layer.is_background {
            continue;
        }
        let Some(record) = records
            .iter_mut()
            .find(|r| r.matches_layer_name(&layer.name))
        else {
            continue;
        };
        match canvas.layer_bounds(layer.id) {
            Ok(bounds) => {
                let size = PhysicalSize::from_pixels(bounds.width(), bounds.height());
                debug!(
                    "Layer {} '{}' -> record {} ({}), {}",
                    layer.id, layer.name, record.index, record.article_code, size
                );
                record.layer_match = Some(LayerMatch {
                    layer_id: layer.id,
                    size,
                });
                map.insert(layer.id, record.index);
            }
            Err(err) => {
                warn!(
                    "Skipping layer {} '{}': could not read bounds: {:#}",
                    layer.id, layer.name, err
                );
                failures.push(LayoutError::GeometryQueryFailure {
                    layer: layer.id,
                    reason: format!("{:#}", err),
                });
            }
        }
    }

    let match_count = map.len();
    Ok(Reconciliation {
        records,
        map,
        match_count,
        failures,
    })
}
