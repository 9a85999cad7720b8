use super::*;

#[test]
fn solid_fills_and_pixel_reads_back() {
    let frame = RenderFrame::solid(4, 2, Rgba8::rgb(255, 0, 0), 0.0).unwrap();
    assert_eq!(frame.data.len(), 4 * 2 * 4);
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(3, 1), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(4, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn solid_premultiplies_translucent_colors() {
    let frame = RenderFrame::solid(1, 1, Rgba8::new(255, 0, 0, 128), 0.0).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([128, 0, 0, 128]));
}

#[test]
fn constructors_validate_geometry_and_time() {
    assert!(RenderFrame::new(0, 10, 0.0).is_err());
    assert!(RenderFrame::new(10, 0, 0.0).is_err());
    assert!(RenderFrame::new(10, 10, f64::NAN).is_err());
    assert!(RenderFrame::from_rgba8(2, 2, vec![0; 15], 0.0).is_err());
    assert!(RenderFrame::from_rgba8(2, 2, vec![0; 16], 0.5).is_ok());
}

#[test]
fn png_roundtrip_preserves_pixels() {
    let frame = RenderFrame::solid(3, 3, Rgba8::rgb(12, 200, 99), 1.25).unwrap();
    let png = frame.encode_png().unwrap();
    let back = RenderFrame::decode_image(&png, 1.25).unwrap();
    assert_eq!(back.width, 3);
    assert_eq!(back.height, 3);
    assert_eq!(back.data, frame.data);
    assert_eq!(back.t_sec, 1.25);
}

#[test]
fn png_roundtrip_preserves_translucent_pixels() {
    let frame = RenderFrame::solid(2, 2, Rgba8::new(200, 100, 40, 128), 0.0).unwrap();
    let png = frame.encode_png().unwrap();
    let back = RenderFrame::decode_image(&png, 0.0).unwrap();
    // Premultiply/unpremultiply is lossy by at most one step per channel.
    for (a, b) in frame.data.iter().zip(&back.data) {
        assert!(a.abs_diff(*b) <= 1, "channel drifted: {a} vs {b}");
    }
}

#[test]
fn decode_rejects_garbage_bytes() {
    assert!(RenderFrame::decode_image(b"not an image", 0.0).is_err());
}
