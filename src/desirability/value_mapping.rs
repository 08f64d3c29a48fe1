//! Value mapping desirability
//!
//! A categorical desirability: the input is a string, scored by looking it
//! up in a user-supplied mapping of labels to scores in `[0, 1]`. Labels
//! absent from the mapping score as NaN rather than failing, so one unmapped
//! category does not abort a batch. This is the one curve whose input is not
//! numeric; `compute_numeric` and `compute_ufloat` are rejected and
//! [`Desirability::compute_string`] is the scoring entry point.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value, ValueMap};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::UFloat;
use std::collections::BTreeMap;

use super::{check_shift, Desirability};

/// The value mapping formula. Every mapped score must lie in `[0, 1]`;
/// unmapped labels yield NaN.
pub fn value_mapping(x: &str, mapping: &BTreeMap<String, Value>, shift: f64) -> Result<f64> {
    check_shift(shift)?;
    if mapping.is_empty() {
        return Err(ScoreKitError::Computation(
            "value mapping cannot be empty".to_string(),
        ));
    }
    for (label, entry) in mapping {
        let score = entry.as_float().ok_or_else(|| {
            ScoreKitError::Computation(format!("mapping entry '{label}' is not a float"))
        })?;
        if !(0.0..=1.0).contains(&score) {
            return Err(ScoreKitError::Computation(format!(
                "mapping values must be between 0 and 1, got {score} for '{label}'"
            )));
        }
    }
    let result = mapping.get(x).and_then(Value::as_float).unwrap_or(f64::NAN);
    Ok(result * (1.0 - shift) + shift)
}

fn value_mapping_utility(args: &ArgValues) -> Result<Value> {
    let value = value_mapping(
        args.string("x")?,
        args.map("mapping")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Categorical curve with coefficients `mapping` and `shift`.
#[derive(Debug, Clone)]
pub struct ValueMapping {
    strategy: ParameterizedStrategy,
}

impl ValueMapping {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("str")),
            ("mapping".to_string(), ParameterSpec::new("mapping")),
            (
                "shift".to_string(),
                ParameterSpec::new("float")
                    .with_default(0.0)
                    .with_min(0.0)
                    .with_max(1.0),
            ),
        ]);
        let strategy = ParameterizedStrategy::new(
            &schema,
            &["mapping", "shift"],
            &["x"],
            value_mapping_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for ValueMapping {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_numeric(&self, _x: f64) -> Result<f64> {
        Err(ScoreKitError::Computation(
            "value_mapping scores string inputs; use compute_string".to_string(),
        ))
    }

    fn compute_ufloat(&self, _x: UFloat) -> Result<UFloat> {
        Err(ScoreKitError::Computation(
            "value_mapping scores string inputs; use compute_string".to_string(),
        ))
    }

    fn compute_string(&self, x: &str) -> Result<f64> {
        let out = self
            .strategy
            .compute(&ValueMap::from([("x".to_string(), Value::Str(x.to_string()))]))?;
        out.as_float().ok_or_else(|| {
            ScoreKitError::Computation("desirability utility did not return a float".to_string())
        })
    }
}
