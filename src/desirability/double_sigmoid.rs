//! Double sigmoid desirability curve
//!
//! Two sigmoid flanks joined at the middle of `[low, high]`: a rising flank
//! anchored at `low`, a falling flank anchored at `high`, and a plateau of
//! high desirability in between. `coef_si` and `coef_se` steer the steepness
//! of the start and end flanks independently; both are divided by `coef_div`,
//! and a zero `coef_div` degenerates both flanks to hard steps.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::sigmoid::{hard_sigmoid, stable_sigmoid};
use super::{bool_coefficient, check_shift, float_coefficient, Desirability};

/// The double sigmoid formula, generic over plain and uncertain inputs.
#[allow(clippy::too_many_arguments)]
pub fn double_sigmoid<S: Scalar>(
    x: S,
    low: f64,
    high: f64,
    coef_div: f64,
    coef_si: f64,
    coef_se: f64,
    base: f64,
    invert: bool,
    shift: f64,
) -> Result<S> {
    if coef_si < 0.0 {
        return Err(ScoreKitError::Computation(
            "coef_si must be positive".to_string(),
        ));
    }
    if coef_se < 0.0 {
        return Err(ScoreKitError::Computation(
            "coef_se must be positive".to_string(),
        ));
    }
    if base <= 1.0 {
        return Err(ScoreKitError::Computation(
            "double sigmoid base must be greater than 1".to_string(),
        ));
    }
    check_shift(shift)?;

    let center = (high - low) / 2.0 + low;
    let mut result = if x.nominal() < center {
        let offset = x - low;
        if coef_div == 0.0 {
            hard_sigmoid(offset, coef_si)
        } else {
            stable_sigmoid(offset, coef_si / coef_div, base)
        }
    } else {
        let offset = x - high;
        if coef_div == 0.0 {
            S::from_f64(1.0) - hard_sigmoid(offset, coef_se)
        } else {
            S::from_f64(1.0) - stable_sigmoid(offset, coef_se / coef_div, base)
        }
    };
    if invert {
        result = S::from_f64(1.0) - result;
    }
    Ok(result * (1.0 - shift) + shift)
}

fn double_sigmoid_utility(args: &ArgValues) -> Result<Value> {
    let value = double_sigmoid(
        args.float("x")?,
        args.float("low")?,
        args.float("high")?,
        args.float("coef_div")?,
        args.float("coef_si")?,
        args.float("coef_se")?,
        args.float("base")?,
        args.boolean("invert")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Double sigmoid curve with coefficients `low`, `high`, `coef_div`,
/// `coef_si`, `coef_se`, `base`, `invert` and `shift`. Only the range has to
/// be set before computing.
#[derive(Debug, Clone)]
pub struct DoubleSigmoid {
    strategy: ParameterizedStrategy,
}

impl DoubleSigmoid {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("float")),
            ("low".to_string(), ParameterSpec::new("float")),
            ("high".to_string(), ParameterSpec::new("float")),
            (
                "coef_div".to_string(),
                ParameterSpec::new("float").with_default(1.0).with_min(0.0),
            ),
            (
                "coef_si".to_string(),
                ParameterSpec::new("float").with_default(1.0).with_min(0.0),
            ),
            (
                "coef_se".to_string(),
                ParameterSpec::new("float").with_default(1.0).with_min(0.0),
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
            &[
                "low", "high", "coef_div", "coef_si", "coef_se", "base", "invert", "shift",
            ],
            &["x"],
            double_sigmoid_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for DoubleSigmoid {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        double_sigmoid(
            x,
            float_coefficient(&coefficients, "low")?,
            float_coefficient(&coefficients, "high")?,
            float_coefficient(&coefficients, "coef_div")?,
            float_coefficient(&coefficients, "coef_si")?,
            float_coefficient(&coefficients, "coef_se")?,
            float_coefficient(&coefficients, "base")?,
            bool_coefficient(&coefficients, "invert")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}
