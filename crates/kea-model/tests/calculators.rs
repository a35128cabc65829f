use std::path::PathBuf;

use kea_coeffs::StoreConfig;
use kea_core::{AleatoryLevel, CoefficientSelection, KeaError, ModelId, Scenario, Style};
use kea_model::transform::{analytic_mean, box_cox, inverse_box_cox, to_meters};
use kea_model::{
    displ_avg, displ_profile, displ_site, displ_site_batch, prob_exceed, prob_occur,
    ExceedanceOptions, ExceedanceOutput, FaultDisplacementModel, ProfileRequest, SiteOptions,
    SiteOutput,
};

fn model() -> FaultDisplacementModel {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures/coefficients");
    FaultDisplacementModel::load(&StoreConfig::with_data_dir(dir)).expect("fixture model")
}

fn median(magnitude: f64, location: f64, style: Style) -> Scenario {
    Scenario::new(magnitude, location, style, CoefficientSelection::Median)
}

#[test]
fn normal_mean_params_at_mid_rupture() {
    let model = model();
    let scenario = Scenario::new(7.0, 0.5, Style::Normal, CoefficientSelection::Mean);
    let prediction = model.predict_params(&scenario).unwrap();
    assert!(prediction.warnings.is_empty());
    assert_eq!(prediction.params.len(), 1);
    let params = prediction.params[0];
    assert!(params.bc_param.is_finite() && params.bc_param != 0.0);
    assert!(params.stdv_total >= params.stdv_within.max(params.stdv_between));
    assert_eq!(params.model_id.to_string(), "mean");
}

#[test]
fn full_selection_returns_every_draw() {
    let model = model();
    let scenario = Scenario::new(6.5, 0.3, Style::StrikeSlip, CoefficientSelection::Full);
    let prediction = model.predict_params(&scenario).unwrap();
    let ids: Vec<ModelId> = prediction.params.iter().map(|p| p.model_id).collect();
    assert_eq!(
        ids,
        vec![ModelId::Draw(1), ModelId::Draw(2), ModelId::Draw(3), ModelId::Draw(4)]
    );
}

#[test]
fn out_of_range_magnitude_warns_but_computes() {
    let model = model();
    let prediction = model.predict_params(&median(4.5, 0.5, Style::Reverse)).unwrap();
    assert_eq!(prediction.warnings.len(), 1);
    assert_eq!(prediction.warnings[0].range, (5.0, 8.0));
    assert_eq!(prediction.params.len(), 1);
}

#[test]
fn location_outside_unit_interval_is_rejected() {
    let model = model();
    for location in [-0.01, 1.2] {
        let err = model
            .predict_params(&median(7.0, location, Style::Normal))
            .unwrap_err();
        assert!(matches!(err, KeaError::Validation(_)), "{err}");
    }
    let err = model
        .predict_params(&median(f64::NAN, 0.5, Style::Normal))
        .unwrap_err();
    assert!(matches!(err, KeaError::Input(_)));
}

#[test]
fn batch_params_keep_scenarios_apart() {
    let model = model();
    let scenarios = [median(6.0, 0.2, Style::Reverse), median(7.5, 0.8, Style::Normal)];
    let batch = model.predict_params_batch(&scenarios).unwrap();
    assert_eq!(batch.len(), 2);
    for (scenario, prediction) in scenarios.iter().zip(&batch) {
        assert_eq!(prediction, &model.predict_params(scenario).unwrap());
    }
    let err = model.predict_params_batch(&[]).unwrap_err();
    assert!(matches!(err, KeaError::Input(_)));
}

#[test]
fn site_debug_rows_are_consistent() {
    let model = model();
    let scenario = Scenario::new(7.0, 0.2, Style::Reverse, CoefficientSelection::Full);
    let opts = SiteOptions {
        debug: true,
        ..SiteOptions::default()
    };
    let output = displ_site(&model, &scenario, AleatoryLevel::Quantile(0.84), &opts).unwrap();
    let SiteOutput::Debug(rows) = output else {
        panic!("expected debug rows");
    };
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.percentile, 0.84);
        assert!((row.y_folded - (row.y_site + row.y_complement) / 2.0).abs() < 1e-15);
        assert_eq!(row.displ_folded_meters, to_meters(row.y_folded, row.bc_param));
        assert!(row.y_site > row.mean_site);
    }
}

#[test]
fn unfolded_median_is_the_back_transformed_mean() {
    let model = model();
    let scenario = median(6.8, 0.35, Style::StrikeSlip);
    let opts = SiteOptions {
        folded: false,
        debug: false,
    };
    let displ = displ_site(&model, &scenario, AleatoryLevel::Quantile(0.5), &opts)
        .unwrap()
        .displacements(false);
    let params = model.predict_params(&scenario).unwrap().params[0];
    let expected = inverse_box_cox(params.mean, params.bc_param);
    assert!((displ[0] - expected).abs() < 1e-9 * expected.max(1.0));
}

#[test]
fn mean_level_exceeds_median_level() {
    let model = model();
    let scenario = median(7.2, 0.5, Style::Normal);
    let opts = SiteOptions::default();
    let at_mean = displ_site(&model, &scenario, AleatoryLevel::Mean, &opts)
        .unwrap()
        .displacements(true);
    let at_median = displ_site(&model, &scenario, AleatoryLevel::Quantile(0.5), &opts)
        .unwrap()
        .displacements(true);
    assert!(at_mean[0] > at_median[0]);
}

#[test]
fn debug_is_rejected_for_batches() {
    let model = model();
    let scenarios = [median(6.0, 0.2, Style::Reverse), median(6.5, 0.4, Style::Reverse)];
    let opts = SiteOptions {
        folded: true,
        debug: true,
    };
    let err =
        displ_site_batch(&model, &scenarios, AleatoryLevel::Quantile(0.5), &opts).unwrap_err();
    assert!(matches!(err, KeaError::Mode(_)));
    assert_eq!(err.info().code, "debug-with-batch");

    let values = displ_site_batch(
        &model,
        &scenarios,
        AleatoryLevel::Quantile(0.5),
        &SiteOptions::default(),
    )
    .unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| v.len() == 1));
}

#[test]
fn both_batch_entry_points_reject_an_empty_batch() {
    let model = model();
    let err = displ_site_batch(
        &model,
        &[],
        AleatoryLevel::Quantile(0.5),
        &SiteOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, KeaError::Input(_)));
    assert_eq!(err.info().code, "empty-batch");

    let err = model.predict_params_batch(&[]).unwrap_err();
    assert_eq!(err.info().code, "empty-batch");
}

#[test]
fn calculators_still_compute_outside_the_magnitude_range() {
    let model = model();
    let scenario = median(4.5, 0.3, Style::Reverse);
    let level = AleatoryLevel::Quantile(0.5);
    match displ_site(&model, &scenario, level, &SiteOptions::default()).unwrap() {
        SiteOutput::Displacements(values) => assert!(values[0].is_finite()),
        other => panic!("unexpected output {other:?}"),
    }
    let avg = displ_avg(&model, 4.5, Style::Reverse, CoefficientSelection::Median).unwrap();
    assert!(avg.is_finite());
    let profile = displ_profile(&model, &ProfileRequest::new(4.5, Style::Reverse, level)).unwrap();
    assert_eq!(profile.locations.len(), profile.displacements.len());
    let ranks = prob_occur(
        &model,
        4.5,
        &[0.3],
        Style::Reverse,
        &[0.1],
        CoefficientSelection::Median,
    )
    .unwrap();
    assert!((0.0..=1.0).contains(&ranks[0]));
}

#[test]
fn reverse_median_average_is_a_finite_nonnegative_scalar() {
    let model = model();
    let avg = displ_avg(&model, 6.0, Style::Reverse, CoefficientSelection::Median).unwrap();
    assert!(avg.is_finite());
    assert!(avg >= 0.0);
}

#[test]
fn average_matches_a_hand_rolled_trapezoid() {
    let model = model();
    let avg = displ_avg(&model, 7.0, Style::Normal, CoefficientSelection::Mean).unwrap();
    let base = Scenario::new(7.0, 0.0, Style::Normal, CoefficientSelection::Mean);
    let mut total = 0.0;
    let mut previous: Option<f64> = None;
    for i in 0..=100 {
        let params = model.predict_params(&base.at(i as f64 / 100.0)).unwrap().params[0];
        let value = analytic_mean(params.bc_param, params.mean, params.stdv_within);
        if let Some(prev) = previous {
            total += 0.01 * (prev + value) / 2.0;
        }
        previous = Some(value);
    }
    assert!((avg - total).abs() < 1e-9 * total.max(1.0));
}

#[test]
fn point_only_calculators_reject_full() {
    let model = model();
    let err = displ_avg(&model, 7.0, Style::Normal, CoefficientSelection::Full).unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));

    let mut request = ProfileRequest::new(7.0, Style::Normal, AleatoryLevel::Quantile(0.5));
    request.selection = CoefficientSelection::Full;
    let err = displ_profile(&model, &request).unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));

    let err = prob_occur(
        &model,
        7.0,
        &[0.5],
        Style::Normal,
        &[1.0],
        CoefficientSelection::Full,
    )
    .unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
}

#[test]
fn unknown_coefficient_type_is_a_validation_error() {
    let err = "sum".parse::<CoefficientSelection>().unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
    assert!(err
        .info()
        .message
        .contains("only 'mean', 'median', or 'full' is allowed"));
}

#[test]
fn profile_is_symmetric_when_folded() {
    let model = model();
    let request = ProfileRequest::new(6.5, Style::Reverse, AleatoryLevel::Quantile(0.5));
    let profile = displ_profile(&model, &request).unwrap();
    assert_eq!(profile.locations.len(), 21);
    assert_eq!(profile.displacements.len(), 21);
    let n = profile.displacements.len();
    for i in 0..n {
        let a = profile.displacements[i];
        let b = profile.displacements[n - 1 - i];
        assert!((a - b).abs() <= 1e-9 * a.max(1.0), "index {i}");
    }
}

#[test]
fn exceedance_decreases_with_displacement() {
    let model = model();
    let trials = [0.01, 0.03, 0.1, 0.3, 1.0, 3.0, 10.0, 30.0];
    let output = prob_exceed(
        &model,
        &median(6.0, 0.2, Style::Reverse),
        &trials,
        &ExceedanceOptions::default(),
    )
    .unwrap();
    let ExceedanceOutput::Curve(curve) = output else {
        panic!("expected a curve");
    };
    assert_eq!(curve.len(), trials.len());
    assert!(curve.windows(2).all(|w| w[1] <= w[0]));
    assert!(curve.iter().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn full_exceedance_is_a_table_per_draw() {
    let model = model();
    let scenario = Scenario::new(7.0, 0.4, Style::StrikeSlip, CoefficientSelection::Full);
    let trials = [0.5, 2.0];
    let folded = prob_exceed(&model, &scenario, &trials, &ExceedanceOptions::default()).unwrap();
    let ExceedanceOutput::Table(rows) = folded else {
        panic!("expected a table");
    };
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.probex_folded.is_some() && r.probex_site.is_none()));
    assert_eq!(rows[1].model_id, ModelId::Draw(1));
    assert_eq!(rows[1].displ_meters, 2.0);

    let unfolded = ExceedanceOptions {
        folded: false,
        debug: false,
    };
    let ExceedanceOutput::Table(rows) = prob_exceed(&model, &scenario, &trials, &unfolded).unwrap()
    else {
        panic!("expected a table");
    };
    assert!(rows.iter().all(|r| r.probex_site.is_some() && r.probex_folded.is_none()));
}

#[test]
fn exceedance_debug_rows_carry_transformed_trials() {
    let model = model();
    let opts = ExceedanceOptions {
        folded: true,
        debug: true,
    };
    let output = prob_exceed(&model, &median(6.5, 0.1, Style::Normal), &[0.2, 1.0], &opts).unwrap();
    let ExceedanceOutput::Debug(rows) = output else {
        panic!("expected debug rows");
    };
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.transformed_displ, box_cox(row.displ_meters, row.bc_param));
        let folded = (row.probex_site + row.probex_complement) / 2.0;
        assert!((row.probex_folded - folded).abs() < 1e-15);
    }
}

#[test]
fn exceedance_rejects_bad_trials() {
    let model = model();
    let scenario = median(6.5, 0.1, Style::Normal);
    let opts = ExceedanceOptions::default();
    let err = prob_exceed(&model, &scenario, &[], &opts).unwrap_err();
    assert!(matches!(err, KeaError::Input(_)));
    let err = prob_exceed(&model, &scenario, &[0.5, -1.0], &opts).unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
}

#[test]
fn percentile_rank_rejects_unequal_arrays() {
    let model = model();
    let err = prob_occur(
        &model,
        6.2,
        &[0.0, 0.4, 0.5],
        Style::Reverse,
        &[0.12, 0.34],
        CoefficientSelection::Median,
    )
    .unwrap_err();
    assert!(matches!(err, KeaError::Validation(_)));
    assert_eq!(err.info().code, "shape-mismatch");
    assert_eq!(err.info().context["locations"], "3");
    assert_eq!(err.info().context["displacements"], "2");
}

#[test]
fn percentile_rank_per_pair() {
    let model = model();
    let locations = [0.0, 0.4, 0.5, 0.7, 0.9, 1.0];
    let displacements = [0.12, 0.34, 0.6, 0.55, 0.4, 0.1];
    let ranks = prob_occur(
        &model,
        6.2,
        &locations,
        Style::Reverse,
        &displacements,
        CoefficientSelection::Median,
    )
    .unwrap();
    assert_eq!(ranks.len(), locations.len());
    assert!(ranks.iter().all(|p| *p > 0.0 && *p < 1.0));
}
