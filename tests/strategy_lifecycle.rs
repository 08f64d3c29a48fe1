//! End-to-end lifecycle of a parameterized strategy: declaration, coefficient
//! configuration, gated computation and attribute reconfiguration.

use scorekit::parameters::{
    AttributeUpdate, ParameterError, ParameterSpec, ParameterWarning, Schema, Value, ValueMap,
};
use scorekit::strategy::{ArgValues, ParameterizedStrategy};
use scorekit::{Result, ScoreKitError};
use std::collections::BTreeMap;

fn wall(args: &ArgValues) -> Result<Value> {
    let x = args.float("x")?;
    let w1 = args.float("w1")?;
    let w2 = args.float("w2")?;
    Ok(Value::Float(if w1 <= x && x <= w2 { 1.0 } else { 0.0 }))
}

fn wall_schema() -> Schema {
    Schema::from([
        ("x".to_string(), ParameterSpec::new("float")),
        ("w1".to_string(), ParameterSpec::new("float")),
        ("w2".to_string(), ParameterSpec::new("float")),
    ])
}

fn wall_strategy() -> ParameterizedStrategy {
    ParameterizedStrategy::new(&wall_schema(), &["w1", "w2"], &["x"], wall).unwrap()
}

fn float_map(entries: &[(&str, f64)]) -> ValueMap {
    entries
        .iter()
        .map(|(name, v)| (name.to_string(), Value::Float(*v)))
        .collect()
}

#[test]
fn wall_strategy_full_lifecycle() {
    let mut strategy = wall_strategy();

    // Computation is blocked until every coefficient holds a value.
    let err = strategy.compute(&float_map(&[("x", 3.0)])).unwrap_err();
    assert!(matches!(
        err,
        ScoreKitError::Parameter(ParameterError::ValueNotSet(_))
    ));

    // Setting one of two coefficients succeeds with an incompleteness warning
    // and still leaves computation blocked on the other.
    let warnings = strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 2.0)]))
        .unwrap();
    assert_eq!(
        warnings,
        vec![ParameterWarning::Incomplete {
            missing: vec!["w2".to_string()]
        }]
    );
    let err = strategy.compute(&float_map(&[("x", 3.0)])).unwrap_err();
    match err {
        ScoreKitError::Parameter(ParameterError::ValueNotSet(msg)) => {
            assert!(msg.contains("w2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let warnings = strategy
        .set_coefficient_parameters_values(&float_map(&[("w2", 5.0)]))
        .unwrap();
    assert_eq!(warnings.len(), 1);

    // Fully configured: inputs vary per call, coefficients stay fixed.
    assert_eq!(
        strategy.compute(&float_map(&[("x", 3.0)])).unwrap(),
        Value::Float(1.0)
    );
    assert_eq!(
        strategy.compute(&float_map(&[("x", 6.0)])).unwrap(),
        Value::Float(0.0)
    );
    assert_eq!(
        strategy.compute(&float_map(&[("x", 2.0)])).unwrap(),
        Value::Float(1.0)
    );
}

#[test]
fn declaration_errors_surface_at_construction() {
    let err = ParameterizedStrategy::new(&wall_schema(), &["w1", "w2"], &["w2"], wall).unwrap_err();
    assert!(matches!(err, ParameterError::Overlap(_)));

    let err = ParameterizedStrategy::new(&wall_schema(), &["w1"], &["x"], wall).unwrap_err();
    assert!(matches!(err, ParameterError::Definition(_)));

    let err =
        ParameterizedStrategy::new(&wall_schema(), &["w1", "w2", "extra"], &["x"], wall)
            .unwrap_err();
    assert!(matches!(err, ParameterError::Definition(_)));
}

#[test]
fn strategy_instances_are_isolated() {
    let mut a = wall_strategy();
    let b = wall_strategy();

    a.set_coefficient_parameters_values(&float_map(&[("w1", 2.0), ("w2", 5.0)]))
        .unwrap();

    assert_eq!(
        a.get_coefficient_parameters_values()["w1"],
        Some(Value::Float(2.0))
    );
    assert_eq!(b.get_coefficient_parameters_values()["w1"], None);
    assert_eq!(b.get_coefficient_parameters_values()["w2"], None);
}

#[test]
fn inputs_are_validated_but_never_stored() {
    let mut strategy = wall_strategy();
    strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 2.0), ("w2", 5.0)]))
        .unwrap();

    // Wrong kind for the declared input parameter.
    let err = strategy
        .compute(&ValueMap::from([(
            "x".to_string(),
            Value::Str("three".to_string()),
        )]))
        .unwrap_err();
    assert!(matches!(
        err,
        ScoreKitError::Parameter(ParameterError::InvalidType(_))
    ));

    // The input parameter stays unset in the manager after a compute call.
    strategy.compute(&float_map(&[("x", 3.0)])).unwrap();
    assert_eq!(strategy.get_parameters_values()["x"], None);
}

#[test]
fn coefficient_attribute_reconfiguration() {
    let mut strategy = wall_strategy();
    strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 2.0), ("w2", 5.0)]))
        .unwrap();

    // Rebuilding w1 with new constraints discards its value.
    let updates = BTreeMap::from([(
        "w1".to_string(),
        AttributeUpdate::new().min(0.0).max(10.0),
    )]);
    strategy.set_coefficient_parameters_attributes(&updates).unwrap();
    assert_eq!(strategy.get_coefficient_parameters_values()["w1"], None);

    // The new constraints are live.
    let err = strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 50.0)]))
        .unwrap_err();
    assert!(matches!(err, ParameterError::OutOfBounds(_)));

    strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 2.0)]))
        .unwrap();
    assert_eq!(
        strategy.compute(&float_map(&[("x", 3.0)])).unwrap(),
        Value::Float(1.0)
    );
}

#[test]
fn bulk_setters_reject_names_outside_the_partition() {
    let mut strategy = wall_strategy();

    let err = strategy
        .set_coefficient_parameters_values(&float_map(&[("x", 1.0)]))
        .unwrap_err();
    assert!(matches!(err, ParameterError::Setting(_)));

    strategy
        .set_coefficient_parameters_values(&float_map(&[("w1", 2.0), ("w2", 5.0)]))
        .unwrap();
    let err = strategy.compute(&float_map(&[("w1", 3.0)])).unwrap_err();
    assert!(matches!(
        err,
        ScoreKitError::Parameter(ParameterError::Setting(_))
    ));
}
