//! Selection and filter state over the matched view.
//!
//! The matched view is the subsequence of records that currently have a
//! layer, in table order. Selection indices point into that view, not into
//! the raw table. The filter only decides visibility; it never touches the
//! selection.

use crate::model::DesignRecord;

/// Case-insensitive substring filter on the article code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    query: String,
    needle: String,
}

impl RecordFilter {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// An empty filter shows everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &DesignRecord) -> bool {
        record.article_code.to_lowercase().contains(&self.needle)
    }
}

/// One row of the matched view.
#[derive(Debug, Clone, Copy)]
pub struct ViewEntry<'a> {
    /// Position in the matched view (what selection refers to).
    pub view_index: usize,
    pub record: &'a DesignRecord,
    /// False when hidden by the filter.
    pub visible: bool,
    pub selected: bool,
}

/// Records with a layer, in table order.
pub fn matched_records(records: &[DesignRecord]) -> impl Iterator<Item = &DesignRecord> {
    records.iter().filter(|r| r.is_matched())
}

/// Table index of the record at `view_index` in the matched view.
pub fn matched_position(records: &[DesignRecord], view_index: usize) -> Option<usize> {
    matched_records(records).nth(view_index).map(|r| r.index)
}

/// Current selection and filter.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<usize>,
    filter: RecordFilter,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, view_index: usize) {
        self.selected = Some(view_index);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = RecordFilter::new(query);
    }

    /// Record currently selected, if the index still resolves.
    pub fn selected_record<'a>(&self, records: &'a [DesignRecord]) -> Option<&'a DesignRecord> {
        self.selected.and_then(|i| matched_records(records).nth(i))
    }

    /// All entries of the matched view with visibility and selection flags.
    pub fn view<'a>(&self, records: &'a [DesignRecord]) -> Vec<ViewEntry<'a>> {
        matched_records(records)
            .enumerate()
            .map(|(view_index, record)| ViewEntry {
                view_index,
                record,
                visible: self.filter.matches(record),
                selected: self.selected == Some(view_index),
            })
            .collect()
    }

    /// Entries not hidden by the filter.
    pub fn visible<'a>(&self, records: &'a [DesignRecord]) -> Vec<ViewEntry<'a>> {
        self.view(records).into_iter().filter(|e| e.visible).collect()
    }
}
