use super::*;

#[test]
fn group_line_size_sums_scaled_widths_with_spacing() {
    let scaled = [(10.0, 5.0), (20.0, 8.0), (6.0, 4.0)];
    let (w, h) = group_line_size(&scaled, 4.0);
    assert_eq!(w, 10.0 + 20.0 + 6.0 + 2.0 * 4.0);
    assert_eq!(h, 8.0);
}

#[test]
fn group_line_size_single_word_has_no_spacing() {
    let (w, h) = group_line_size(&[(30.0, 12.0)], 100.0);
    assert_eq!(w, 30.0);
    assert_eq!(h, 12.0);
}

#[test]
fn group_line_size_empty_is_zero() {
    assert_eq!(group_line_size(&[], 4.0), (0.0, 0.0));
}

#[test]
fn anchor_tops_place_the_line_per_anchor() {
    let frame_h = 100.0;
    let line_h = 10.0;
    let margin = 0.1;

    assert_eq!(
        anchor_group_top(Anchor::BottomCenter, frame_h, line_h, margin),
        80.0
    );
    assert_eq!(
        anchor_group_top(Anchor::TopCenter, frame_h, line_h, margin),
        10.0
    );
    assert_eq!(anchor_group_top(Anchor::Center, frame_h, line_h, margin), 45.0);
}

#[test]
fn compositor_surfaces_font_errors_eagerly() {
    let (mut style, _) = crate::resolve_style("modern_bold", "none", &Default::default());
    style.font_family = "Definitely Missing Face 404".to_string();

    let store = FontStore::new();
    let err = Compositor::with_default_scorer(style, &store).unwrap_err();
    assert!(matches!(err, SublineError::Font { .. }));
}

#[test]
fn compositor_rejects_invalid_styles_before_loading_fonts() {
    let (mut style, _) = crate::resolve_style("modern_bold", "none", &Default::default());
    style.font_size_px = -1.0;

    let store = FontStore::new();
    let err = Compositor::with_default_scorer(style, &store).unwrap_err();
    assert!(matches!(err, SublineError::Validation(_)));
}
