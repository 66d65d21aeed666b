use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn turbo_runs_dark_to_green_to_red() {
    let lo = Colormap::Turbo.sample(0.0);
    assert!(lo.r < 0.25 && lo.g < 0.15 && lo.b < 0.25);

    let mid = Colormap::Turbo.sample(0.5);
    assert!(mid.g > 0.9);

    let hi = Colormap::Turbo.sample(1.0);
    assert!(hi.r > 0.45 && hi.g < 0.1 && hi.b < 0.05);
}

#[test]
fn viridis_endpoints_match_reference() {
    let lo = Colormap::Viridis.sample(0.0);
    assert!(close(lo.r, 0.267) && close(lo.g, 0.005) && close(lo.b, 0.329));
    let hi = Colormap::Viridis.sample(1.0);
    assert!(close(hi.r, 0.993) && close(hi.g, 0.906) && close(hi.b, 0.144));
}

#[test]
fn samples_are_clamped_and_opaque() {
    for cmap in [Colormap::Turbo, Colormap::Viridis] {
        for t in [-1.0, 0.0, 0.3, 0.7, 1.0, 2.0, f64::NAN] {
            let c = cmap.sample(t);
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
            assert_eq!(c.a, 1.0);
        }
        assert_eq!(cmap.sample(-5.0), cmap.sample(0.0));
        assert_eq!(cmap.sample(5.0), cmap.sample(1.0));
    }
}

#[test]
fn gradient_spans_whole_map() {
    assert!(Colormap::Turbo.gradient(0).is_empty());
    assert_eq!(Colormap::Turbo.gradient(1), vec![Colormap::Turbo.sample(0.0)]);

    let g = Colormap::Turbo.gradient(5);
    assert_eq!(g.len(), 5);
    assert_eq!(g[0], Colormap::Turbo.sample(0.0));
    assert_eq!(g[4], Colormap::Turbo.sample(1.0));
}

#[test]
fn colormap_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&Colormap::Viridis).unwrap(),
        "\"viridis\""
    );
    let c: Colormap = serde_json::from_str("\"turbo\"").unwrap();
    assert_eq!(c, Colormap::Turbo);
}
