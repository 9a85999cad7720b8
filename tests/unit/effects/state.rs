use super::*;

fn params() -> EffectParams {
    EffectParams::default()
}

fn state(effect: EffectKind, elapsed: f64, dur: f64) -> AnimationState {
    animation_state(effect, &params(), elapsed, dur, 5, 0.0)
}

#[test]
fn parse_covers_the_closed_effect_set() {
    assert_eq!(EffectKind::parse(""), Some(EffectKind::None));
    assert_eq!(EffectKind::parse("none"), Some(EffectKind::None));
    assert_eq!(EffectKind::parse(" Fade "), Some(EffectKind::Fade));
    assert_eq!(EffectKind::parse("scale"), Some(EffectKind::Scale));
    assert_eq!(EffectKind::parse("wave"), Some(EffectKind::Wave));
    assert_eq!(EffectKind::parse("typewriter"), Some(EffectKind::Typewriter));
    assert_eq!(EffectKind::parse("color_shift"), Some(EffectKind::ColorShift));
    assert_eq!(EffectKind::parse("sparkle"), None);
}

#[test]
fn none_is_neutral() {
    assert_eq!(state(EffectKind::None, 0.3, 1.0), AnimationState::neutral());
}

#[test]
fn fade_in_hits_zero_then_one_monotonically() {
    // fade_in_sec defaults to 0.2
    assert_eq!(state(EffectKind::Fade, 0.0, 2.0).opacity, 0.0);
    assert_eq!(state(EffectKind::Fade, 0.2, 2.0).opacity, 1.0);

    let mut prev = 0.0;
    for i in 0..=20 {
        let opacity = state(EffectKind::Fade, 0.2 * f64::from(i) / 20.0, 2.0).opacity;
        assert!(opacity >= prev);
        prev = opacity;
    }
}

#[test]
fn fade_out_mirrors_toward_word_end() {
    // fade_out_sec defaults to 0.1; word is 1s long.
    assert_eq!(state(EffectKind::Fade, 0.9, 1.0).opacity, 1.0);
    assert!((state(EffectKind::Fade, 0.95, 1.0).opacity - 0.5).abs() < 1e-9);
    assert_eq!(state(EffectKind::Fade, 1.0, 1.0).opacity, 0.0);
}

#[test]
fn scale_spans_min_to_max_with_smooth_easing() {
    let p = params();
    assert_eq!(state(EffectKind::Scale, 0.0, 1.0).scale, p.scale_min);
    assert_eq!(state(EffectKind::Scale, 1.0, 1.0).scale, p.scale_max);

    // A smooth (ease-in-out) curve lags the linear ramp early on.
    let linear_quarter = p.scale_min + (p.scale_max - p.scale_min) * 0.25;
    assert!(state(EffectKind::Scale, 0.25, 1.0).scale < linear_quarter);
}

#[test]
fn wave_is_a_sine_of_elapsed_time() {
    let p = params();
    // period 0.5s: quarter period peaks at the amplitude.
    let peak = state(EffectKind::Wave, 0.125, 10.0).dy_px;
    assert!((peak - p.wave_amplitude_px).abs() < 1e-9);

    let zero = state(EffectKind::Wave, 0.25, 10.0).dy_px;
    assert!(zero.abs() < 1e-9);
}

#[test]
fn typewriter_reveals_floor_of_progress() {
    // "HELLO": 5 chars over 1s.
    assert_eq!(state(EffectKind::Typewriter, 0.0, 1.0).visible_chars, Some(0));
    assert_eq!(state(EffectKind::Typewriter, 0.6, 1.0).visible_chars, Some(3));
    assert_eq!(state(EffectKind::Typewriter, 1.0, 1.0).visible_chars, Some(5));
    assert_eq!(state(EffectKind::Typewriter, 2.0, 1.0).visible_chars, Some(5));
}

#[test]
fn zero_duration_words_are_instantaneous() {
    let p = params();
    assert_eq!(state(EffectKind::Fade, 0.0, 0.0).opacity, 1.0);
    assert_eq!(state(EffectKind::Scale, 0.0, 0.0).scale, p.scale_max);
    assert_eq!(state(EffectKind::Typewriter, 0.0, 0.0).visible_chars, Some(5));
}

#[test]
fn negative_elapsed_clamps_to_onset() {
    let p = params();
    assert_eq!(state(EffectKind::Fade, -0.5, 1.0).opacity, 0.0);
    assert_eq!(state(EffectKind::Scale, -0.5, 1.0).scale, p.scale_min);
    assert_eq!(state(EffectKind::Typewriter, -0.5, 1.0).visible_chars, Some(0));
}

#[test]
fn color_shift_lerps_by_importance() {
    let p = params();
    let at = |importance: f64| {
        animation_state(EffectKind::ColorShift, &p, 0.1, 1.0, 5, importance)
            .color
            .unwrap()
    };
    assert_eq!(at(0.0), p.color_a);
    assert_eq!(at(1.0), p.color_b);
    assert_eq!(at(5.0), p.color_b); // clamped
    assert_eq!(at(0.5), p.color_a.lerp(p.color_b, 0.5));
}

#[test]
fn params_validation_rejects_bad_knobs() {
    let mut p = params();
    p.fade_in_sec = -0.1;
    assert!(p.validate().is_err());

    let mut p = params();
    p.scale_max = p.scale_min - 0.1;
    assert!(p.validate().is_err());

    assert!(params().validate().is_ok());
}

#[test]
fn params_deserialize_with_partial_json() {
    let p: EffectParams = serde_json::from_value(serde_json::json!({
        "fade_in_sec": 0.4
    }))
    .unwrap();
    assert_eq!(p.fade_in_sec, 0.4);
    assert_eq!(p.fade_out_sec, EffectParams::default().fade_out_sec);
}
