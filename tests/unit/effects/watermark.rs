use super::*;
use crate::assets::bitmap::BitmapFont;

fn bitmap() -> FontFace {
    FontFace::Bitmap(BitmapFont::builtin())
}

#[test]
fn stamps_only_the_bottom_right_region() {
    let mut canvas = Canvas::new(600, 400, [0, 0, 0]).unwrap();
    apply_watermark(&mut canvas, &WatermarkSpec::default(), &bitmap()).unwrap();

    // 40 px bitmap text: 8 glyphs measure 235 px, line height 40, margin 12.
    let (x0, y0) = (600 - 235 - 12, 400 - 40 - 12);
    let mut touched = 0;
    for (x, y, px) in canvas.pixels().enumerate_pixels() {
        if px.0 != [0, 0, 0] {
            touched += 1;
            assert!(x >= x0 && y >= y0, "ink at ({x}, {y})");
            assert!(x < 600 - 12 && y < 400 - 12, "ink in margin at ({x}, {y})");
            assert_eq!(px.0, [128, 128, 128]);
        }
    }
    assert!(touched > 0);
}

#[test]
fn zero_opacity_is_a_no_op() {
    let mut canvas = Canvas::new(300, 200, [10, 20, 30]).unwrap();
    let before = canvas.clone();
    let spec = WatermarkSpec {
        opacity: 0.0,
        ..WatermarkSpec::default()
    };
    apply_watermark(&mut canvas, &spec, &bitmap()).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn rejects_bad_opacity_and_empty_text() {
    let mut canvas = Canvas::new(100, 100, [0, 0, 0]).unwrap();
    for spec in [
        WatermarkSpec {
            opacity: 1.5,
            ..WatermarkSpec::default()
        },
        WatermarkSpec {
            opacity: f32::NAN,
            ..WatermarkSpec::default()
        },
        WatermarkSpec {
            text: "   ".to_owned(),
            ..WatermarkSpec::default()
        },
    ] {
        let err = apply_watermark(&mut canvas, &spec, &bitmap()).unwrap_err();
        assert!(matches!(err, MemeError::InvalidInput(_)));
    }
}

#[test]
fn deserializes_partial_json() {
    let spec: WatermarkSpec = serde_json::from_str(r#"{"opacity": 0.25}"#).unwrap();
    assert_eq!(spec.text, "@MemeGen");
    assert_eq!(spec.opacity, 0.25);
}
