use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-2.0), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
    }
}

#[test]
fn curves_are_monotonic_non_decreasing() {
    for ease in ALL {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v >= prev - 1e-12, "{ease:?} dipped at sample {i}");
            prev = v;
        }
    }
}

#[test]
fn in_out_cubic_is_smooth_not_linear() {
    assert!(Ease::InOutCubic.apply(0.25) < 0.25);
    assert!(Ease::InOutCubic.apply(0.75) > 0.75);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
}
