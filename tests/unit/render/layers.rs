use super::*;

#[test]
fn standard_stack_is_sorted_by_z_order() {
    let layers = standard_layers(2.8);
    assert_eq!(layers.len(), 10);
    let z: Vec<u8> = layers.iter().map(|l| l.kind.z_order()).collect();
    let mut sorted = z.clone();
    sorted.sort();
    assert_eq!(z, sorted);
    assert_eq!(layers.first().unwrap().kind, LayerKind::Shadow);
    assert_eq!(layers.last().unwrap().kind, LayerKind::Edge);
}

#[test]
fn glow_passes_widen_and_fade() {
    let layers = standard_layers(2.8);
    let glows: Vec<&RenderLayer> = layers
        .iter()
        .filter(|l| l.kind == LayerKind::Glow)
        .collect();
    assert_eq!(glows.len(), usize::from(GLOW_PASSES));

    let alphas: Vec<f64> = glows
        .iter()
        .map(|l| match l.color {
            LayerColor::Gradient { alpha: Some(a) } => a,
            _ => panic!("glow must use the gradient with an alpha override"),
        })
        .collect();
    for w in glows.windows(2) {
        assert!(w[1].stroke_width > w[0].stroke_width);
    }
    for w in alphas.windows(2) {
        assert!(w[1] < w[0]);
    }
    assert!((glows[0].stroke_width - 5.8).abs() < 1e-9);
    assert!((alphas[0] - 0.36).abs() < 1e-9);
    assert!((alphas[5] - 0.06).abs() < 1e-9);
}

#[test]
fn offsets_push_shadow_down_and_highlight_up() {
    let layers = standard_layers(2.8);
    let shadow = layers.iter().find(|l| l.kind == LayerKind::Shadow).unwrap();
    let highlight = layers
        .iter()
        .find(|l| l.kind == LayerKind::Highlight)
        .unwrap();
    assert!(shadow.offset_frac < 0.0);
    assert!(highlight.offset_frac > 0.0);
    assert!(highlight.offset_frac.abs() < shadow.offset_frac.abs());
}

#[test]
fn layer_ids_are_unique() {
    let layers = standard_layers(1.0);
    let mut ids: Vec<String> = layers.iter().map(RenderLayer::id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), layers.len());
    assert!(ids.contains(&"glow-6".to_string()));
}

#[test]
fn color_rules_resolve() {
    let grad = Rgba::new(0.2, 0.4, 0.6, 1.0);
    assert_eq!(LayerColor::Gradient { alpha: None }.resolve(&grad), grad);
    assert_eq!(
        LayerColor::Gradient { alpha: Some(0.5) }.resolve(&grad).a,
        0.5
    );
    let fixed = Rgba::white().with_alpha(0.1);
    assert_eq!(LayerColor::Fixed(fixed).resolve(&grad), fixed);
}
