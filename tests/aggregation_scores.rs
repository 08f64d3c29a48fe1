//! Aggregations through the public registry surface, including a small
//! curve-then-aggregate scoring pipeline.

use approx::assert_relative_eq;
use scorekit::aggregation::{aggregation_names, create_aggregation};
use scorekit::desirability::{create_desirability, Desirability};
use scorekit::parameters::{Value, ValueMap};
use scorekit::uncertain::UFloat;
use scorekit::ScoreKitError;

#[test]
fn all_builtin_aggregations_are_listed() {
    assert_eq!(
        aggregation_names(),
        vec![
            "arithmetic_mean",
            "deviation_index",
            "geometric_mean",
            "harmonic_mean",
            "product",
            "summation"
        ]
    );
}

#[test]
fn aggregation_spot_values() {
    let values = [1.0, 2.0, 3.0];
    let weights = [0.2, 0.3, 0.5];

    let arithmetic = create_aggregation("arithmetic_mean").unwrap();
    assert_relative_eq!(
        arithmetic.compute_numeric(&values, Some(&weights)).unwrap(),
        2.3
    );

    let harmonic = create_aggregation("harmonic_mean").unwrap();
    assert_relative_eq!(
        harmonic.compute_numeric(&values, Some(&weights)).unwrap(),
        1.9354838709677418,
        epsilon = 1e-9
    );

    let summation = create_aggregation("summation").unwrap();
    assert_relative_eq!(
        summation.compute_numeric(&values, Some(&weights)).unwrap(),
        2.3
    );

    let deviation = create_aggregation("deviation_index").unwrap();
    assert_relative_eq!(
        deviation.compute_numeric(&values, Some(&weights)).unwrap(),
        1.0 - (1.09f64 / 0.38).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn invalid_input_is_rejected() {
    let aggregator = create_aggregation("geometric_mean").unwrap();

    let err = aggregator.compute_numeric(&[], None).unwrap_err();
    assert!(matches!(err, ScoreKitError::InvalidInput(_)));

    let err = aggregator
        .compute_numeric(&[1.0, -2.0], None)
        .unwrap_err();
    assert!(matches!(err, ScoreKitError::InvalidInput(_)));

    let err = aggregator
        .compute_numeric(&[1.0, 2.0], Some(&[0.0, 0.0]))
        .unwrap_err();
    assert!(matches!(err, ScoreKitError::InvalidInput(_)));
}

#[test]
fn uncertain_scores_aggregate_with_uncertainty() {
    let aggregator = create_aggregation("arithmetic_mean").unwrap();
    let values = [UFloat::new(0.8, 0.05), UFloat::new(0.4, 0.1)];
    let result = aggregator.compute_ufloat(&values, None).unwrap();
    assert_relative_eq!(result.nominal(), 0.6);
    assert!(result.std_dev() > 0.0);
}

#[test]
fn score_two_properties_and_aggregate() {
    // Property 1: higher is better, scored by a rising sigmoid.
    let mut potency = create_desirability("sigmoid").unwrap();
    potency
        .strategy_mut()
        .set_coefficient_parameters_values(&ValueMap::from([
            ("low".to_string(), Value::Float(5.0)),
            ("high".to_string(), Value::Float(9.0)),
        ]))
        .unwrap();

    // Property 2: a target window, scored by a crisp step.
    let mut weight = create_desirability("step").unwrap();
    weight
        .strategy_mut()
        .set_coefficient_parameters_values(&ValueMap::from([
            ("low".to_string(), Value::Float(200.0)),
            ("high".to_string(), Value::Float(500.0)),
        ]))
        .unwrap();

    let scores = [
        potency.compute_numeric(7.0).unwrap(),
        weight.compute_numeric(350.0).unwrap(),
    ];
    assert_relative_eq!(scores[0], 0.5);
    assert_relative_eq!(scores[1], 1.0);

    let aggregator = create_aggregation("geometric_mean").unwrap();
    let overall = aggregator
        .compute_numeric(&scores, Some(&[2.0, 1.0]))
        .unwrap();
    // (0.5^2 * 1.0^1)^(1/3)
    assert_relative_eq!(overall, 0.25f64.powf(1.0 / 3.0), epsilon = 1e-12);
}
