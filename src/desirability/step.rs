//! Crisp step desirability curves
//!
//! Three window variants over `low` and `high`: the two-sided window
//! ([`Step`]), everything at or below `low` ([`LeftStep`]) and everything at
//! or above `high` ([`RightStep`]). An uncertain input is classified by its
//! nominal value; a step has no slope to propagate uncertainty through.

use crate::error::Result;
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{check_shift, float_coefficient, Desirability};

/// Two-sided window: 1 inside `[low, high]`, 0 outside.
pub fn step<S: Scalar>(x: S, low: f64, high: f64, shift: f64) -> Result<S> {
    check_shift(shift)?;
    let inside = low <= x.nominal() && x.nominal() <= high;
    Ok(S::from_f64((if inside { 1.0 } else { 0.0 }) * (1.0 - shift) + shift))
}

/// 1 at or below `low`, 0 above.
pub fn left_step<S: Scalar>(x: S, low: f64, shift: f64) -> Result<S> {
    check_shift(shift)?;
    let inside = x.nominal() <= low;
    Ok(S::from_f64((if inside { 1.0 } else { 0.0 }) * (1.0 - shift) + shift))
}

/// 1 at or above `high`, 0 below.
pub fn right_step<S: Scalar>(x: S, high: f64, shift: f64) -> Result<S> {
    check_shift(shift)?;
    let inside = x.nominal() >= high;
    Ok(S::from_f64((if inside { 1.0 } else { 0.0 }) * (1.0 - shift) + shift))
}

fn step_utility(args: &ArgValues) -> Result<Value> {
    let value = step(
        args.float("x")?,
        args.float("low")?,
        args.float("high")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

fn left_step_utility(args: &ArgValues) -> Result<Value> {
    let value = left_step(args.float("x")?, args.float("low")?, args.float("shift")?)?;
    Ok(Value::Float(value))
}

fn right_step_utility(args: &ArgValues) -> Result<Value> {
    let value = right_step(args.float("x")?, args.float("high")?, args.float("shift")?)?;
    Ok(Value::Float(value))
}

fn step_schema(threshold_names: &[&str]) -> Schema {
    let mut schema = Schema::from([
        ("x".to_string(), ParameterSpec::new("float")),
        (
            "shift".to_string(),
            ParameterSpec::new("float")
                .with_default(0.0)
                .with_min(0.0)
                .with_max(1.0),
        ),
    ]);
    for name in threshold_names {
        schema.insert(name.to_string(), ParameterSpec::new("float"));
    }
    schema
}

/// Two-sided window curve with coefficients `low`, `high` and `shift`.
#[derive(Debug, Clone)]
pub struct Step {
    strategy: ParameterizedStrategy,
}

impl Step {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let strategy = ParameterizedStrategy::new(
            &step_schema(&["low", "high"]),
            &["low", "high", "shift"],
            &["x"],
            step_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for Step {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        step(
            x,
            float_coefficient(&coefficients, "low")?,
            float_coefficient(&coefficients, "high")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}

/// Left step curve with coefficients `low` and `shift`.
#[derive(Debug, Clone)]
pub struct LeftStep {
    strategy: ParameterizedStrategy,
}

impl LeftStep {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let strategy = ParameterizedStrategy::new(
            &step_schema(&["low"]),
            &["low", "shift"],
            &["x"],
            left_step_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for LeftStep {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        left_step(
            x,
            float_coefficient(&coefficients, "low")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}

/// Right step curve with coefficients `high` and `shift`.
#[derive(Debug, Clone)]
pub struct RightStep {
    strategy: ParameterizedStrategy,
}

impl RightStep {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let strategy = ParameterizedStrategy::new(
            &step_schema(&["high"]),
            &["high", "shift"],
            &["x"],
            right_step_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for RightStep {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        right_step(
            x,
            float_coefficient(&coefficients, "high")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ValueMap;
    use approx::assert_relative_eq;

    fn float_map(entries: &[(&str, f64)]) -> ValueMap {
        entries
            .iter()
            .map(|(name, v)| (name.to_string(), Value::Float(*v)))
            .collect()
    }

    #[test]
    fn test_step_window() {
        let mut curve = Step::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&float_map(&[("low", 2.0), ("high", 5.0)]))
            .unwrap();

        assert_relative_eq!(curve.compute_numeric(3.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(2.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(5.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(6.0).unwrap(), 0.0);
        assert_relative_eq!(curve.compute_numeric(1.9).unwrap(), 0.0);
    }

    #[test]
    fn test_left_step() {
        let mut curve = LeftStep::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&float_map(&[("low", 2.0)]))
            .unwrap();

        assert_relative_eq!(curve.compute_numeric(1.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(2.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(2.1).unwrap(), 0.0);
    }

    #[test]
    fn test_right_step() {
        let mut curve = RightStep::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&float_map(&[("high", 5.0)]))
            .unwrap();

        assert_relative_eq!(curve.compute_numeric(5.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(7.0).unwrap(), 1.0);
        assert_relative_eq!(curve.compute_numeric(4.9).unwrap(), 0.0);
    }

    #[test]
    fn test_shift_applies_outside_window() {
        let mut curve = Step::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&float_map(&[
                ("low", 2.0),
                ("high", 5.0),
                ("shift", 0.3),
            ]))
            .unwrap();

        assert_relative_eq!(curve.compute_numeric(0.0).unwrap(), 0.3);
        assert_relative_eq!(curve.compute_numeric(3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_ufloat_classified_by_nominal() {
        let mut curve = Step::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&float_map(&[("low", 2.0), ("high", 5.0)]))
            .unwrap();

        let inside = curve.compute_ufloat(UFloat::new(3.0, 5.0)).unwrap();
        assert_relative_eq!(inside.nominal(), 1.0);
        assert_relative_eq!(inside.std_dev(), 0.0);
    }
}
