use super::*;

const CURVES: [SlideCurve; 3] = [SlideCurve::Linear, SlideCurve::Decelerate, SlideCurve::Settle];

#[test]
fn starts_full_and_lands_at_rest() {
    for curve in CURVES {
        assert_eq!(curve.remaining(0.0), 1.0);
        assert_eq!(curve.remaining(1.0), 0.0);
        assert_eq!(curve.remaining(-1.0), 1.0);
        assert_eq!(curve.remaining(2.0), 0.0);
    }
}

#[test]
fn never_moves_back_down() {
    for curve in CURVES {
        let samples: Vec<f64> = (0..=20).map(|i| curve.remaining(i as f64 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] >= w[1]), "{curve:?}");
    }
}

#[test]
fn slower_landings_cover_more_ground_early() {
    let t = 0.3;
    assert!(SlideCurve::Decelerate.remaining(t) < SlideCurve::Linear.remaining(t));
    assert!(SlideCurve::Settle.remaining(t) < SlideCurve::Decelerate.remaining(t));
}

#[test]
fn names_are_snake_case() {
    let c: SlideCurve = serde_json::from_str("\"decelerate\"").unwrap();
    assert_eq!(c, SlideCurve::Decelerate);
    assert_eq!(serde_json::to_string(&SlideCurve::Linear).unwrap(), "\"linear\"");
}
