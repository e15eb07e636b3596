use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TracerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TracerError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(TracerError::media("x").to_string().contains("media error:"));
    assert!(
        TracerError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TracerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
