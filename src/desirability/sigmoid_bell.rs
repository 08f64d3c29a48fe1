//! Sigmoid bell desirability curve
//!
//! The difference of two sigmoids: one rising over `[x1, x2]` and one rising
//! over `[x3, x4]`. Subtracting the second from the first yields a bell with
//! sigmoid-shaped flanks and a plateau between `x2` and `x3`.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::sigmoid::sigmoid;
use super::{bool_coefficient, check_shift, float_coefficient, Desirability};

/// The sigmoid bell formula, generic over plain and uncertain inputs.
#[allow(clippy::too_many_arguments)]
pub fn sigmoid_bell<S: Scalar>(
    x: S,
    x1: f64,
    x2: f64,
    x3: f64,
    x4: f64,
    k: f64,
    base: f64,
    invert: bool,
    shift: f64,
) -> Result<S> {
    if x3 < x1 || x2 > x4 || x2 < x1 || x4 < x3 {
        return Err(ScoreKitError::Computation(
            "sigmoid bell shape must satisfy x1 <= x2 <= x3 <= x4".to_string(),
        ));
    }
    check_shift(shift)?;

    let rising = sigmoid(x, x1, x2, k, base, 0.0)?;
    let falling = sigmoid(x, x3, x4, k, base, 0.0)?;
    let mut result = rising - falling;
    if invert {
        result = S::from_f64(1.0) - result;
    }
    Ok(result * (1.0 - shift) + shift)
}

fn sigmoid_bell_utility(args: &ArgValues) -> Result<Value> {
    let value = sigmoid_bell(
        args.float("x")?,
        args.float("x1")?,
        args.float("x2")?,
        args.float("x3")?,
        args.float("x4")?,
        args.float("k")?,
        args.float("base")?,
        args.boolean("invert")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Sigmoid bell curve with coefficients `x1`..`x4`, `k`, `base`, `invert` and
/// `shift`. Only the four shape coordinates have to be set before computing.
#[derive(Debug, Clone)]
pub struct SigmoidBell {
    strategy: ParameterizedStrategy,
}

impl SigmoidBell {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("float")),
            ("x1".to_string(), ParameterSpec::new("float")),
            ("x2".to_string(), ParameterSpec::new("float")),
            ("x3".to_string(), ParameterSpec::new("float")),
            ("x4".to_string(), ParameterSpec::new("float")),
            (
                "k".to_string(),
                ParameterSpec::new("float").with_default(1.0).with_min(1.0),
            ),
            (
                "base".to_string(),
                ParameterSpec::new("float").with_default(10.0).with_min(1.0),
            ),
            (
                "invert".to_string(),
                ParameterSpec::new("bool").with_default(false),
            ),
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
            &["x1", "x2", "x3", "x4", "k", "base", "invert", "shift"],
            &["x"],
            sigmoid_bell_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for SigmoidBell {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        sigmoid_bell(
            x,
            float_coefficient(&coefficients, "x1")?,
            float_coefficient(&coefficients, "x2")?,
            float_coefficient(&coefficients, "x3")?,
            float_coefficient(&coefficients, "x4")?,
            float_coefficient(&coefficients, "k")?,
            float_coefficient(&coefficients, "base")?,
            bool_coefficient(&coefficients, "invert")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ValueMap;
    use approx::assert_relative_eq;

    fn configured(x1: f64, x2: f64, x3: f64, x4: f64) -> SigmoidBell {
        let mut curve = SigmoidBell::new().unwrap();
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&ValueMap::from([
                ("x1".to_string(), Value::Float(x1)),
                ("x2".to_string(), Value::Float(x2)),
                ("x3".to_string(), Value::Float(x3)),
                ("x4".to_string(), Value::Float(x4)),
            ]))
            .unwrap();
        curve
    }

    #[test]
    fn test_plateau_between_inner_coordinates() {
        let curve = configured(0.0, 2.0, 8.0, 10.0);
        assert!(curve.compute_numeric(5.0).unwrap() > 0.999);
    }

    #[test]
    fn test_vanishes_far_outside() {
        let curve = configured(0.0, 2.0, 8.0, 10.0);
        assert!(curve.compute_numeric(-20.0).unwrap() < 1e-6);
        assert!(curve.compute_numeric(30.0).unwrap() < 1e-6);
    }

    #[test]
    fn test_half_height_at_flank_midpoints() {
        let curve = configured(0.0, 2.0, 8.0, 10.0);
        // Far from the falling flank the rising sigmoid dominates entirely.
        assert_relative_eq!(curve.compute_numeric(1.0).unwrap(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(curve.compute_numeric(9.0).unwrap(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let curve = configured(5.0, 1.0, 8.0, 10.0);
        let err = curve.compute_numeric(5.0).unwrap_err();
        assert!(matches!(err, ScoreKitError::Computation(_)));
    }

    #[test]
    fn test_invert_flips_bell_into_notch() {
        let mut curve = configured(0.0, 2.0, 8.0, 10.0);
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&ValueMap::from([(
                "invert".to_string(),
                Value::Bool(true),
            )]))
            .unwrap();
        assert!(curve.compute_numeric(5.0).unwrap() < 0.001);
        assert!(curve.compute_numeric(-20.0).unwrap() > 0.999);
    }

    #[test]
    fn test_shift_raises_floor() {
        let mut curve = configured(0.0, 2.0, 8.0, 10.0);
        curve
            .strategy_mut()
            .set_coefficient_parameters_values(&ValueMap::from([(
                "shift".to_string(),
                Value::Float(0.2),
            )]))
            .unwrap();
        assert_relative_eq!(
            curve.compute_numeric(-20.0).unwrap(),
            0.2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_ufloat_nominal_matches_numeric() {
        let curve = configured(0.0, 2.0, 8.0, 10.0);
        let uncertain = curve.compute_ufloat(UFloat::new(1.0, 0.1)).unwrap();
        let plain = curve.compute_numeric(1.0).unwrap();
        assert_relative_eq!(uncertain.nominal(), plain, epsilon = 1e-12);
        assert!(uncertain.std_dev() > 0.0);
    }
}
