use super::*;
use crate::foundation::core::Anchor;

#[test]
fn parses_a_minimal_request() {
    let req = MemeRequest::from_json_str(
        r#"{
            "captions": [
                {"text": "one does not simply", "anchor": "top"},
                {"text": "write a meme engine", "fill": "yellow", "outline": [0, 0, 0]}
            ],
            "animation": "fade_in",
            "filter": "sepia",
            "watermark": {"text": "@me"}
        }"#,
    )
    .unwrap();
    req.validate().unwrap();

    assert_eq!(req.captions.len(), 2);
    assert_eq!(req.captions[0].anchor, Anchor::Top);
    assert_eq!(req.captions[1].anchor, Anchor::Bottom);
    assert_eq!(req.animation, AnimationMode::FadeIn);
    assert_eq!(req.filter, Filter::Sepia);
    assert_eq!(req.watermark.as_ref().map(|w| w.opacity), Some(0.5));
    assert_eq!(req.output_format(), OutputFormat::Animated);
}

#[test]
fn format_defaults_follow_animation() {
    let req = MemeRequest::default();
    assert_eq!(req.output_format(), OutputFormat::Static);

    let req = MemeRequest {
        animation: AnimationMode::Typing,
        format: Some(OutputFormat::Static),
        ..MemeRequest::default()
    };
    assert_eq!(req.output_format(), OutputFormat::Static);
}

#[test]
fn duration_overrides_encode_settings() {
    let req = MemeRequest::from_json_str(r#"{"duration_ms": 40}"#).unwrap();
    assert_eq!(req.encode_settings().frame_duration_ms, 40);
    assert_eq!(req.encode_settings().jpeg_quality, 95);

    let req = MemeRequest::from_json_str(r#"{"duration_ms": 0}"#).unwrap();
    assert!(matches!(req.validate(), Err(MemeError::InvalidInput(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MemeRequest::from_json_str(r#"{"animation": "wobble"}"#).unwrap_err();
    assert!(matches!(err, MemeError::Serde(_)));
    assert!(MemeRequest::from_json_str("{").is_err());
}

#[test]
fn missing_file_reports_the_path() {
    let err = MemeRequest::from_path("/nonexistent/memeframe/request.json").unwrap_err();
    assert!(format!("{err:#}").contains("request.json"));
}
