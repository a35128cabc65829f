use kea_core::errors::{ErrorInfo, KeaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("argument", "location")
        .with_context("value", "1.5")
}

#[test]
fn validation_error_is_user_facing() {
    let err = KeaError::Validation(sample_info("V001", "location out of range"));
    assert_eq!(err.info().code, "V001");
    assert!(err.info().context.contains_key("argument"));
    assert!(err.is_user_facing());
}

#[test]
fn input_error_is_user_facing() {
    let err = KeaError::Input(sample_info("I001", "non-finite magnitude"));
    assert!(err.is_user_facing());
}

#[test]
fn mode_error_is_fatal() {
    let err = KeaError::Mode(sample_info("M001", "debug with batch"));
    assert_eq!(err.info().code, "M001");
    assert!(!err.is_user_facing());
}

#[test]
fn resource_error_is_fatal() {
    let err = KeaError::Resource(sample_info("R001", "missing file").with_hint("check --data-dir"));
    assert_eq!(err.info().hint.as_deref(), Some("check --data-dir"));
    assert!(!err.is_user_facing());
}

#[test]
fn display_includes_context_and_hint() {
    let err = KeaError::Serde(
        ErrorInfo::new("S001", "bad cell")
            .with_context("column", "c1")
            .with_hint("numeric values only"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("serde error: bad cell (code: S001)"));
    assert!(rendered.contains("column=c1"));
    assert!(rendered.contains("hint: numeric values only"));
}

#[test]
fn display_lists_context_in_key_order() {
    let info = ErrorInfo::new("invalid-location-step", "location step must lie within (0, 1]")
        .with_context("location_step", "0")
        .with_context("command", "displ-profile");
    assert_eq!(
        info.to_string(),
        "location step must lie within (0, 1] (code: invalid-location-step) \
         [command=displ-profile, location_step=0]"
    );
    assert_eq!(
        ErrorInfo::new("empty-batch", "at least one scenario is required").to_string(),
        "at least one scenario is required (code: empty-batch)"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = KeaError::Validation(ErrorInfo::new("shape-mismatch", "lengths differ"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Validation");
    assert_eq!(json["detail"]["code"], "shape-mismatch");
    let back: KeaError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
