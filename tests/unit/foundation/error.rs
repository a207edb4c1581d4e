use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WebtileError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        WebtileError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WebtileError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
