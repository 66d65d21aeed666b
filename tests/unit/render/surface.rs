use super::*;
use crate::{foundation::core::Point, render::layers::standard_layers};

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment {
        line: Line::new(Point::new(x0, y0), Point::new(x1, y1)),
        color: Rgba::white(),
    }
}

#[test]
fn empty_surface_has_no_bounds_and_full_view_box() {
    let s = SvgSurface::new(Canvas::default(), Rgba::black());
    assert_eq!(s.segment_count(), 0);
    assert!(s.content_bounds().is_none());

    let svg = s.to_svg_string(true);
    assert!(svg.contains(r#"viewBox="0 0 1440 432""#));
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(!svg.contains("<g "));
}

#[test]
fn bounds_include_half_stroke_and_clip_to_canvas() {
    let layers = standard_layers(2.0);
    let main = layers.iter().find(|l| l.kind == LayerKind::Main).unwrap();

    let mut s = SvgSurface::new(Canvas::default(), Rgba::black());
    let h = s.begin_layer(main);
    s.push(h, seg(100.0, 200.0, 300.0, 220.0));
    let b = s.content_bounds().unwrap();
    assert_eq!(b, Rect::new(99.0, 199.0, 301.0, 221.0));

    s.push(h, seg(-50.0, 10.0, 0.0, 10.0));
    let b = s.content_bounds().unwrap();
    assert_eq!(b.x0, 0.0);
    assert_eq!(b.y0, 9.0);
}

#[test]
fn layers_serialize_in_z_order_regardless_of_open_order() {
    let layers = standard_layers(2.8);
    let edge = layers.iter().find(|l| l.kind == LayerKind::Edge).unwrap();
    let shadow = layers.iter().find(|l| l.kind == LayerKind::Shadow).unwrap();

    let mut s = SvgSurface::new(Canvas::default(), Rgba::black());
    let e = s.begin_layer(edge);
    let sh = s.begin_layer(shadow);
    s.push(e, seg(10.0, 10.0, 20.0, 20.0));
    s.push(sh, seg(10.0, 12.0, 20.0, 22.0));

    let svg = s.to_svg_string(false);
    let shadow_at = svg.find(r#"id="shadow""#).unwrap();
    let edge_at = svg.find(r#"id="edge""#).unwrap();
    assert!(shadow_at < edge_at);
    assert_eq!(s.segments_of(LayerKind::Edge).len(), 1);
    assert!(s.segments_of(LayerKind::Main).is_empty());
}

#[test]
fn extend_preserves_append_order() {
    let layers = standard_layers(1.0);
    let main = layers.iter().find(|l| l.kind == LayerKind::Main).unwrap();
    let mut s = SvgSurface::new(Canvas::default(), Rgba::black());
    let h = s.begin_layer(main);
    s.extend(h, vec![seg(0.0, 0.0, 1.0, 1.0), seg(1.0, 1.0, 2.0, 2.0)]);
    s.extend(h, vec![seg(2.0, 2.0, 3.0, 3.0)]);
    let xs: Vec<f64> = s
        .segments_of(LayerKind::Main)
        .iter()
        .map(|sg| sg.line.p0.x)
        .collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
}

#[test]
fn output_parses_as_svg() {
    let layers = standard_layers(2.8);
    let mut s = SvgSurface::new(Canvas::default(), Rgba::black());
    for layer in &layers {
        let h = s.begin_layer(layer);
        s.push(h, seg(100.0, 100.0, 200.0, 150.0));
    }
    let svg = s.to_svg_string(true);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert!(tree.size().width() > 0.0);
    assert_eq!(svg.matches("<g ").count(), layers.len());
}

#[test]
fn numbers_are_compact() {
    assert_eq!(fmt_num(1440.0), "1440");
    assert_eq!(fmt_num(0.18), "0.18");
    assert_eq!(fmt_num(2.0004), "2");
    assert_eq!(fmt_num(-0.0001), "0");
    assert_eq!(fmt_num(12.3456), "12.346");
}
