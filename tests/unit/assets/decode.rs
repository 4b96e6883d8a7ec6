use std::io::Cursor;

use super::*;
use crate::foundation::error::MemeError;

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_drops_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let canvas = decode_image(&png_bytes(DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (1, 1));
    assert_eq!(canvas.pixels().get_pixel(0, 0).0, [100, 50, 200]);
}

#[test]
fn oversized_images_are_capped_preserving_aspect() {
    let img = DynamicImage::ImageRgb8(image::RgbImage::new(2400, 600));
    let canvas = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (2000, 500));
}

#[test]
fn garbage_is_an_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, MemeError::Other(_)));
}

#[test]
fn sixteen_bit_png_is_scaled_to_rgb8() {
    let img = image::ImageBuffer::from_pixel(2, 2, image::Rgb([65535u16, 32896, 0]));
    let canvas = decode_image(&png_bytes(DynamicImage::ImageRgb16(img))).unwrap();
    assert_eq!(canvas.pixels().get_pixel(1, 0).0, [255, 128, 0]);
}
