use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_halves_contribution() {
    let dst = [0, 0, 0, 255];
    let out = over(dst, [255, 255, 255, 255], 0.5);
    // src contributes ~half, dst keeps the rest; alpha stays opaque.
    assert_eq!(out[3], 255);
    assert!(out[0] >= 126 && out[0] <= 129);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 12], 1.0).is_err());

    let mut dst = vec![0u8; 6];
    assert!(over_in_place(&mut dst, &[0u8; 6], 1.0).is_err());
}

#[test]
fn premul_over_in_place_blends_overlay_onto_frame() {
    let mut dst = [10u8, 10, 10, 255].repeat(4);
    let mut src = vec![0u8; 16];
    src[0..4].copy_from_slice(&[255, 0, 0, 255]); // one opaque red pixel

    premul_over_in_place(&mut dst, &src).unwrap();
    assert_eq!(&dst[0..4], &[255, 0, 0, 255]);
    assert_eq!(&dst[4..8], &[10, 10, 10, 255]); // untouched where src is clear
}
