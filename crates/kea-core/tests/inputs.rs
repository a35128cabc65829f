use kea_core::{
    check_displacements, check_location_range, check_magnitude_range, check_paired_lengths,
    AleatoryLevel, CoefficientSelection, KeaError, ModelId, PointEstimate, Scenario, Style,
};

#[test]
fn styles_parse_case_insensitively() {
    assert_eq!("Strike-Slip".parse::<Style>().unwrap(), Style::StrikeSlip);
    assert_eq!("REVERSE".parse::<Style>().unwrap(), Style::Reverse);
    assert_eq!(" normal ".parse::<Style>().unwrap(), Style::Normal);
}

#[test]
fn unknown_style_is_rejected() {
    let err = "oblique".parse::<Style>().unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
    assert_eq!(err.info().code, "invalid-style");
}

#[test]
fn sum_is_an_invalid_coefficient_type() {
    let err = "sum".parse::<CoefficientSelection>().unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
    assert!(err.info().message.contains("'sum' is an invalid 'coefficient_type'"));
}

#[test]
fn full_selection_is_not_a_point_estimate() {
    assert_eq!(
        CoefficientSelection::Mean.require_point().unwrap(),
        PointEstimate::Mean
    );
    let err = CoefficientSelection::Full.require_point().unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
}

#[test]
fn location_bounds() {
    assert!(check_location_range(0.5).is_ok());
    assert!(matches!(
        check_location_range(-0.01),
        Err(KeaError::Validation(_))
    ));
    assert!(matches!(
        check_location_range(1.01),
        Err(KeaError::Validation(_))
    ));
    assert!(matches!(
        check_location_range(f64::NAN),
        Err(KeaError::Input(_))
    ));
}

#[test]
fn magnitude_outside_range_warns_without_failing() {
    assert!(check_magnitude_range(7.0, Style::StrikeSlip).is_none());
    let warning = check_magnitude_range(8.5, Style::StrikeSlip).expect("warning");
    assert_eq!(warning.range, (6.0, 8.0));
    assert!(warning.to_string().contains("strike-slip"));
    assert!(check_magnitude_range(5.5, Style::Reverse).is_none());
    assert!(check_magnitude_range(5.5, Style::Normal).is_some());
}

#[test]
fn paired_lengths_must_match() {
    assert!(check_paired_lengths(&[0.1, 0.2], &[1.0, 2.0]).is_ok());
    let err = check_paired_lengths(&[0.1, 0.2, 0.3], &[1.0]).unwrap_err();
    assert_eq!(err.info().code, "shape-mismatch");
    assert_eq!(err.info().context["locations"], "3");
    assert_eq!(err.info().context["displacements"], "1");
}

#[test]
fn displacements_must_be_finite_and_non_negative() {
    assert!(check_displacements(&[0.0, 0.5, 10.0]).is_ok());
    assert!(matches!(check_displacements(&[]), Err(KeaError::Input(_))));
    assert!(matches!(
        check_displacements(&[1.0, -0.1]),
        Err(KeaError::Validation(_))
    ));
    assert!(matches!(
        check_displacements(&[f64::INFINITY]),
        Err(KeaError::Input(_))
    ));
}

#[test]
fn percentile_sentinel_selects_the_mean() {
    assert_eq!(AleatoryLevel::from_percentile(-1.0).unwrap(), AleatoryLevel::Mean);
    assert_eq!(
        AleatoryLevel::from_percentile(0.84).unwrap(),
        AleatoryLevel::Quantile(0.84)
    );
    assert!(AleatoryLevel::from_percentile(0.0).is_err());
    assert!(AleatoryLevel::from_percentile(1.0).is_err());
    assert!(AleatoryLevel::from_percentile(-0.5).is_err());
}

#[test]
fn model_ids_parse_from_row_labels() {
    assert_eq!("12".parse::<ModelId>().unwrap(), ModelId::Draw(12));
    assert_eq!(
        "Median".parse::<ModelId>().unwrap(),
        ModelId::Point(PointEstimate::Median)
    );
    assert!("draw-3".parse::<ModelId>().is_err());
}

#[test]
fn model_ids_serialize_as_plain_values() {
    assert_eq!(serde_json::to_string(&ModelId::Draw(4)).unwrap(), "4");
    assert_eq!(
        serde_json::to_string(&ModelId::Point(PointEstimate::Mean)).unwrap(),
        "\"mean\""
    );
}

#[test]
fn complement_mirrors_location() {
    let scenario = Scenario::new(7.0, 0.25, Style::Normal, CoefficientSelection::Median);
    let mirrored = scenario.complement();
    assert_eq!(mirrored.location, 0.75);
    assert_eq!(mirrored.magnitude, scenario.magnitude);
    assert_eq!(mirrored.style, scenario.style);
}
