//! Session controller.
//!
//! [`Session`] owns everything that lives between user actions: the loaded
//! record batch, the layer map of the last reconciliation pass, selection and
//! filter, and the status line. Each user action is one method; the outcome
//! is returned and also written to the status line.

use tracing::{info, warn};

use crate::canvas::{Canvas, ScriptExecutor};
use crate::dimension::{self, validate_target};
use crate::error::LayoutError;
use crate::model::{DesignRecord, PhysicalSize, ScaleFactors};
use crate::reconcile::{self, LayerMap};
use crate::selection::{self, SelectionState, ViewEntry};
use crate::table::{RecordStore, TableSource};

pub const STATUS_READY: &str = "Ready";

#[derive(Debug, Clone)]
pub struct Session {
    store: RecordStore,
    source_name: Option<String>,
    map: LayerMap,
    selection: SelectionState,
    status: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            source_name: None,
            map: LayerMap::default(),
            selection: SelectionState::new(),
            status: STATUS_READY.to_string(),
        }
    }

    pub fn records(&self) -> &[DesignRecord] {
        self.store.records()
    }

    pub fn map(&self) -> &LayerMap {
        &self.map
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Message describing the outcome of the most recent operation.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn report(&mut self, message: impl Into<String>) {
        self.status = message.into();
        info!(target: "printlayout::status", "{}", self.status);
    }

    fn report_error(&mut self, err: &LayoutError) {
        self.status = format!("Error: {}", err);
        warn!(target: "printlayout::status", "{}", self.status);
    }

    // ────────────────────────────────────────────────────────────────────
    // Table
    // ────────────────────────────────────────────────────────────────────

    /// Replace the record batch with the rows of `source`.
    ///
    /// On failure the previous batch stays loaded.
    pub fn load_table(
        &mut self,
        name: &str,
        source: &mut dyn TableSource,
    ) -> Result<usize, LayoutError> {
        match RecordStore::load(source) {
            Ok(store) => {
                let count = store.len();
                self.store = store;
                self.source_name = Some(name.to_string());
                self.map = LayerMap::default();
                self.selection.clear_selection();
                self.report(format!("Loaded {} records from {}", count, name));
                Ok(count)
            }
            Err(err) => {
                self.report_error(&err);
                Err(err)
            }
        }
    }

    /// Forget the loaded table.
    pub fn clear(&mut self) {
        self.store = RecordStore::new();
        self.source_name = None;
        self.map = LayerMap::default();
        self.selection.clear_selection();
        self.report("Table cleared");
    }

    // ────────────────────────────────────────────────────────────────────
    // Reconciliation
    // ────────────────────────────────────────────────────────────────────

    /// Run a reconciliation pass and swap in its result. Returns the match count.
    pub fn refresh(&mut self, canvas: &dyn Canvas) -> Result<usize, LayoutError> {
        let pass = match reconcile::reconcile(self.store.records(), canvas) {
            Ok(pass) => pass,
            Err(err) => {
                self.report_error(&err);
                return Err(err);
            }
        };
        let count = pass.match_count;
        let skipped = pass.failures.len();
        let first_skipped = pass.failures.iter().find_map(|f| match f {
            LayoutError::GeometryQueryFailure { layer, .. } => Some(*layer),
            _ => None,
        });
        self.store.replace_records(pass.records);
        self.map = pass.map;

        let skipped_note = match first_skipped {
            Some(layer) if skipped > 1 => format!(
                "{} layers skipped, first {}: could not read bounds",
                skipped, layer
            ),
            Some(layer) => format!("layer {} skipped: could not read bounds", layer),
            None => String::new(),
        };
        if count == 0 && skipped > 0 {
            self.report(format!("No prints measured ({})", skipped_note));
        } else if count == 0 {
            self.report("No matched layers: layer names must contain article codes");
        } else if skipped > 0 {
            self.report(format!("Found {} prints on the canvas ({})", count, skipped_note));
        } else {
            self.report(format!("Found {} prints on the canvas", count));
        }
        Ok(count)
    }

    /// Run a layout script, then refresh.
    pub fn run_script(
        &mut self,
        script: &str,
        executor: &mut dyn ScriptExecutor,
        canvas: &mut dyn Canvas,
    ) -> Result<usize, LayoutError> {
        if self.store.is_empty() {
            let err = LayoutError::SourceUnavailable("load a table first".into());
            self.report_error(&err);
            return Err(err);
        }
        if let Err(e) = executor.execute(script, canvas) {
            let err = LayoutError::ScriptFailure(format!("{:#}", e));
            self.report_error(&err);
            return Err(err);
        }
        self.refresh(canvas)
    }

    // ────────────────────────────────────────────────────────────────────
    // Selection & filter
    // ────────────────────────────────────────────────────────────────────

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.selection.set_filter(query);
    }

    pub fn view(&self) -> Vec<ViewEntry<'_>> {
        self.selection.view(self.store.records())
    }

    pub fn visible(&self) -> Vec<ViewEntry<'_>> {
        self.selection.visible(self.store.records())
    }

    pub fn selected_record(&self) -> Option<&DesignRecord> {
        self.selection.selected_record(self.store.records())
    }

    /// Select the record at `view_index` of the matched view and highlight its
    /// layer. Returns `false` (and changes nothing) when there is no document
    /// or no matched record at that index.
    pub fn select(&mut self, view_index: usize, canvas: &mut dyn Canvas) -> bool {
        if !canvas.has_document() {
            self.report_error(&LayoutError::NoActiveDocument);
            return false;
        }
        let found = selection::matched_records(self.store.records())
            .nth(view_index)
            .map(|r| (r.article_code.clone(), r.matched_layer_id()));
        let Some((article, layer)) = found else {
            self.report(format!("No matched print at position {}", view_index));
            return false;
        };

        self.selection.select(view_index);
        if let Some(layer) = layer {
            if let Err(e) = canvas.activate_layer(layer) {
                warn!("Could not activate layer {}: {:#}", layer, e);
            }
        }
        self.report(format!("Selected: {}", article));
        true
    }

    // ────────────────────────────────────────────────────────────────────
    // Dimensioning
    // ────────────────────────────────────────────────────────────────────

    /// Resize the selected record's layer to `target`.
    ///
    /// The record keeps the requested size until the next [`Session::refresh`].
    pub fn apply_size(
        &mut self,
        target: PhysicalSize,
        canvas: &mut dyn Canvas,
    ) -> Result<ScaleFactors, LayoutError> {
        let outcome = self.try_apply_size(target, canvas);
        match &outcome {
            Ok(_) => self.report(format!("Size changed: {}", target)),
            Err(err) => self.report_error(err),
        }
        outcome
    }

    fn try_apply_size(
        &mut self,
        target: PhysicalSize,
        canvas: &mut dyn Canvas,
    ) -> Result<ScaleFactors, LayoutError> {
        let view_index = self.selection.selected().ok_or(LayoutError::NoSelection)?;
        validate_target(target)?;
        let position = selection::matched_position(self.store.records(), view_index)
            .ok_or(LayoutError::NoSelection)?;
        let record = self
            .store
            .get_mut(position)
            .ok_or(LayoutError::NoSelection)?;
        dimension::resize_on_canvas(record, target, canvas)
    }
}
