use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CyclographError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CyclographError::missing_coefficient(-3)
            .to_string()
            .contains("missing fourier coefficient for index -3")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CyclographError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
