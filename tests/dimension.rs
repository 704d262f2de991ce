use printlayout::LayoutError;
use printlayout::canvas::{Canvas, CanvasDoc, JsonCanvas, LayerDoc};
use printlayout::dimension::{apply_size, commit_size, resize_on_canvas};
use printlayout::model::{DesignRecord, LayerId, LayerMatch, PhysicalSize, PixelRect};

fn record(layer: Option<u64>) -> DesignRecord {
    DesignRecord {
        index: 0,
        source_row: 1,
        image_ref: None,
        nominal_size: "M".into(),
        order_id: String::new(),
        display_name: String::new(),
        color: String::new(),
        article_code: "ART-1".into(),
        layer_match: layer.map(|id| LayerMatch {
            layer_id: LayerId(id),
            size: PhysicalSize::new(70.6, 35.3),
        }),
    }
}

fn bounds(w: f64, h: f64) -> PixelRect {
    PixelRect::new(0.0, 0.0, w, h)
}

#[test]
fn computes_independent_axis_scales() {
    let target = PhysicalSize::new(50.8, 50.8);
    let s = apply_size(&record(Some(1)), target, bounds(200.0, 100.0)).unwrap();
    assert!((s.scale_x_percent - 72.0).abs() < 1e-9, "{:?}", s);
    assert!((s.scale_y_percent - 144.0).abs() < 1e-9, "{:?}", s);
}

#[test]
fn unmatched_record_is_no_selection() {
    let target = PhysicalSize::new(10.0, 10.0);
    let err = apply_size(&record(None), target, bounds(10.0, 10.0)).unwrap_err();
    assert_eq!(err, LayoutError::NoSelection);
}

#[test]
fn rejects_invalid_targets() {
    let r = record(Some(1));
    for (w, h) in [
        (0.0, 10.0),
        (10.0, 0.0),
        (-5.0, 10.0),
        (f64::NAN, 10.0),
        (10.0, f64::INFINITY),
    ] {
        let err = apply_size(&r, PhysicalSize::new(w, h), bounds(10.0, 10.0)).unwrap_err();
        assert!(
            matches!(err, LayoutError::InvalidDimensions { .. }),
            "({}, {}) gave {:?}",
            w,
            h,
            err
        );
    }
}

#[test]
fn zero_size_layer_is_degenerate() {
    let r = record(Some(3));
    for b in [bounds(0.0, 10.0), bounds(10.0, 0.0)] {
        let err = apply_size(&r, PhysicalSize::new(10.0, 10.0), b).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateLayer { layer: LayerId(3), .. }));
    }
}

#[test]
fn invalid_dimensions_are_checked_before_degenerate_bounds() {
    let target = PhysicalSize::new(0.0, 0.0);
    let err = apply_size(&record(Some(1)), target, bounds(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidDimensions { .. }));
}

#[test]
fn commit_stores_target_size() {
    let mut r = record(Some(4));
    commit_size(&mut r, PhysicalSize::new(12.5, 40.0)).unwrap();
    assert_eq!(r.matched_layer_id(), Some(LayerId(4)));
    assert_eq!(r.physical_width_mm(), Some(12.5));
    assert_eq!(r.physical_height_mm(), Some(40.0));

    let mut unmatched = record(None);
    assert_eq!(
        commit_size(&mut unmatched, PhysicalSize::new(1.0, 1.0)),
        Err(LayoutError::NoSelection)
    );
}

#[test]
fn resize_on_canvas_scales_layer_about_center() {
    let mut canvas = JsonCanvas::new(CanvasDoc {
        name: String::new(),
        layers: vec![LayerDoc::new(1, "ART-1", PixelRect::new(100.0, 100.0, 300.0, 200.0))],
    });
    let mut r = record(Some(1));
    let target = PhysicalSize::new(50.8, 25.4);
    let s = resize_on_canvas(&mut r, target, &mut canvas).unwrap();
    assert!((s.scale_x_percent - 72.0).abs() < 1e-9);
    assert!((s.scale_y_percent - 72.0).abs() < 1e-9);
    assert_eq!(r.physical_size(), Some(target));

    let b = canvas.layer_bounds(LayerId(1)).unwrap();
    assert!((b.width() - 144.0).abs() < 1e-6);
    assert!((b.height() - 72.0).abs() < 1e-6);
    let (cx, cy) = b.center();
    assert!((cx - 200.0).abs() < 1e-6 && (cy - 150.0).abs() < 1e-6);
}

#[test]
fn resize_on_canvas_reports_missing_layer() {
    let mut canvas = JsonCanvas::new(CanvasDoc::default());
    let mut r = record(Some(9));
    let err = resize_on_canvas(&mut r, PhysicalSize::new(10.0, 10.0), &mut canvas).unwrap_err();
    assert!(matches!(err, LayoutError::GeometryQueryFailure { layer: LayerId(9), .. }));
    assert_eq!(r.physical_width_mm(), Some(70.6), "record untouched on failure");
}

#[test]
fn resize_on_canvas_reports_failed_transform() {
    let mut doc = CanvasDoc::default();
    let mut layer = LayerDoc::new(2, "ART-1", PixelRect::new(0.0, 0.0, 10.0, 10.0));
    layer.background = true;
    doc.layers.push(layer);
    let mut canvas = JsonCanvas::new(doc);
    let mut r = record(Some(2));
    let err = resize_on_canvas(&mut r, PhysicalSize::new(10.0, 10.0), &mut canvas).unwrap_err();
    assert!(matches!(err, LayoutError::TransformFailure(_)));
    assert_eq!(r.physical_width_mm(), Some(70.6));
}

#[test]
fn resize_without_document() {
    let mut canvas = JsonCanvas::without_document();
    let mut r = record(Some(2));
    let err = resize_on_canvas(&mut r, PhysicalSize::new(10.0, 10.0), &mut canvas).unwrap_err();
    assert_eq!(err, LayoutError::NoActiveDocument);
}
