use super::*;

#[test]
fn frame_rejects_bad_dimensions_and_lengths() {
    assert!(FrameRgba::new(0, 4, Vec::new()).is_err());
    assert!(FrameRgba::new(2, 2, vec![0; 15]).is_err());
    assert!(FrameRgba::new(70_000, 1, vec![0; 70_000 * 4]).is_err());
    assert!(FrameRgba::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn solid_frame_and_pixel_access() {
    let mut f = FrameRgba::solid(3, 2, Rgb8::new(10, 20, 30)).unwrap();
    assert_eq!(f.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(f.pixel(3, 0), None);

    f.put_pixel(1, 1, [1, 2, 3, 255]);
    f.put_pixel(-1, 0, [9, 9, 9, 9]);
    f.put_pixel(0, 5, [9, 9, 9, 9]);
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(f.pixel(0, 0), Some([10, 20, 30, 255]));
}

#[test]
fn rgb8_hex_parsing() {
    assert_eq!(Rgb8::parse_hex("#ff3366").unwrap(), Rgb8::new(255, 0x33, 0x66));
    assert_eq!("00ff00".parse::<Rgb8>().unwrap(), Rgb8::new(0, 255, 0));
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("zzzzzz").is_err());
    assert_eq!(Rgb8::WHITE.to_hex(), "#ffffff");
}

#[test]
fn rgb8_serde_accepts_hex_and_array() {
    let a: Rgb8 = serde_json::from_str("\"#102030\"").unwrap();
    let b: Rgb8 = serde_json::from_str("[16, 32, 48]").unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), "\"#102030\"");
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
    assert!((Fps::new(30000, 1001).unwrap().as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn pixel_pos_maps_to_pixel_center() {
    let p = PixelPos::new(3, -2).to_point();
    assert_eq!((p.x, p.y), (3.5, -1.5));
}

#[test]
fn frame_index_defaults_to_zero() {
    assert_eq!(FrameIndex::default(), FrameIndex(0));
}
