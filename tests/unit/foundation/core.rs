use super::*;

#[test]
fn zero_sized_canvas_is_invalid_input() {
    assert!(matches!(
        Canvas::new(0, 10, [0, 0, 0]),
        Err(MemeError::InvalidInput(_))
    ));
    assert!(matches!(
        Canvas::from_raw(4, 0, vec![]),
        Err(MemeError::InvalidInput(_))
    ));
}

#[test]
fn from_raw_checks_buffer_length() {
    assert!(Canvas::from_raw(2, 2, vec![0; 12]).is_ok());
    assert!(matches!(
        Canvas::from_raw(2, 2, vec![0; 11]),
        Err(MemeError::InvalidInput(_))
    ));
}

#[test]
fn from_dynamic_normalizes_to_rgb8() {
    let img = DynamicImage::ImageRgb16(image::ImageBuffer::from_pixel(
        3,
        3,
        image::Rgb([65535u16, 0, 32896]),
    ));
    let canvas = Canvas::from_dynamic(&img).unwrap();
    assert_eq!(canvas.pixels().get_pixel(1, 1).0, [255, 0, 128]);

    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        3,
        2,
        image::Rgba([10, 20, 30, 0]),
    ));
    let canvas = Canvas::from_dynamic(&img).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (3, 2));
    assert_eq!(canvas.pixels().get_pixel(0, 0).0, [10, 20, 30]);
}

#[test]
fn frame_sequence_requires_frames_of_one_size() {
    assert!(FrameSequence::new(vec![]).is_err());

    let a = Frame::from(Canvas::new(4, 4, [0, 0, 0]).unwrap());
    let b = Frame::from(Canvas::new(4, 5, [0, 0, 0]).unwrap());
    assert!(FrameSequence::new(vec![a.clone(), b]).is_err());

    let seq = FrameSequence::new(vec![a.clone(), a]).unwrap();
    assert_eq!(seq.len(), 2);
    assert!(!seq.is_empty());
}

#[test]
fn anchor_parses_case_insensitively() {
    assert_eq!("Top".parse::<Anchor>().unwrap(), Anchor::Top);
    assert_eq!("CENTER".parse::<Anchor>().unwrap(), Anchor::Center);
    assert_eq!(" bottom ".parse::<Anchor>().unwrap(), Anchor::Bottom);
    assert!("left".parse::<Anchor>().is_err());

    let a: Anchor = serde_json::from_str("\"middle\"").unwrap();
    assert_eq!(a, Anchor::Center);
}
