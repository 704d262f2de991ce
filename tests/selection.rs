use printlayout::model::{DesignRecord, LayerId, LayerMatch, PhysicalSize};
use printlayout::selection::{RecordFilter, SelectionState, matched_position};

fn rec(index: usize, article: &str, layer: Option<u64>) -> DesignRecord {
    DesignRecord {
        index,
        source_row: index + 1,
        image_ref: None,
        nominal_size: "M".into(),
        order_id: String::new(),
        display_name: String::new(),
        color: String::new(),
        article_code: article.into(),
        layer_match: layer.map(|id| LayerMatch {
            layer_id: LayerId(id),
            size: PhysicalSize::new(10.0, 10.0),
        }),
    }
}

fn sample() -> Vec<DesignRecord> {
    vec![
        rec(0, "TIGER-01", Some(5)),
        rec(1, "WOLF-02", None),
        rec(2, "tiger-03", Some(6)),
        rec(3, "Bear-04", Some(7)),
    ]
}

#[test]
fn view_contains_only_matched_records() {
    let records = sample();
    let state = SelectionState::new();
    let view = state.view(&records);
    let articles: Vec<_> = view.iter().map(|e| e.record.article_code.as_str()).collect();
    assert_eq!(articles, vec!["TIGER-01", "tiger-03", "Bear-04"]);
    assert_eq!(view[1].view_index, 1);
    assert!(view.iter().all(|e| e.visible && !e.selected));
}

#[test]
fn view_index_maps_to_table_position() {
    let records = sample();
    assert_eq!(matched_position(&records, 0), Some(0));
    assert_eq!(matched_position(&records, 1), Some(2));
    assert_eq!(matched_position(&records, 2), Some(3));
    assert_eq!(matched_position(&records, 3), None);
}

#[test]
fn filter_is_case_insensitive() {
    let f = RecordFilter::new("TiGeR");
    let records = sample();
    assert!(f.matches(&records[0]));
    assert!(f.matches(&records[2]));
    assert!(!f.matches(&records[3]));
    assert!(RecordFilter::default().is_empty());
    assert!(RecordFilter::default().matches(&records[3]));
}

#[test]
fn filter_hides_without_touching_selection() {
    let records = sample();
    let mut state = SelectionState::new();
    state.select(2);
    state.set_filter("tiger");

    assert_eq!(state.selected(), Some(2));
    let view = state.view(&records);
    let hidden: Vec<_> = view
        .iter()
        .filter(|e| !e.visible)
        .map(|e| e.record.article_code.as_str())
        .collect();
    assert_eq!(hidden, vec!["Bear-04"]);
    assert!(view[2].selected, "hidden entry stays selected");

    let visible = state.visible(&records);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|e| !e.selected));
    assert_eq!(
        state.selected_record(&records).map(|r| r.article_code.as_str()),
        Some("Bear-04")
    );

    state.set_filter("");
    assert_eq!(state.visible(&records).len(), 3);
    assert_eq!(state.selected(), Some(2));
}

#[test]
fn stale_selection_does_not_resolve() {
    let records = sample();
    let mut state = SelectionState::new();
    state.select(10);
    assert!(state.selected_record(&records).is_none());
    state.clear_selection();
    assert_eq!(state.selected(), None);
}
