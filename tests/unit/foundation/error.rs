use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MemeError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        MemeError::font_unavailable("x")
            .to_string()
            .contains("font unavailable:")
    );
    assert!(
        MemeError::render_failure("x")
            .to_string()
            .contains("render failure:")
    );
    assert!(
        MemeError::encode_failure("x")
            .to_string()
            .contains("encode failure:")
    );
    assert!(
        MemeError::upstream_image_unavailable("x")
            .to_string()
            .contains("upstream image unavailable:")
    );
    assert!(
        MemeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MemeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: MemeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MemeError::Serde(_)));
}
