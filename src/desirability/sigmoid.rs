//! Sigmoid desirability curve
//!
//! A numerically stable sigmoid that transitions between 0 and 1 over the
//! `[low, high]` range. The steepness coefficient `k` is rescaled by the
//! range width, so a given `k` produces the same visual steepness regardless
//! of the range. When the range collapses to a point the curve degenerates to
//! a hard step around it.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{check_shift, float_coefficient, Desirability};

pub(super) fn hard_sigmoid<S: Scalar>(x: S, k: f64) -> S {
    if k * x.nominal() > 0.0 {
        S::from_f64(1.0)
    } else {
        S::from_f64(0.0)
    }
}

// Evaluates 1 / (1 + base^(-k * x)) without overflowing exp for large |x|.
pub(super) fn stable_sigmoid<S: Scalar>(x: S, k: f64, base: f64) -> S {
    let h = x * (k * base.ln());
    if h.nominal() >= 0.0 {
        S::from_f64(1.0) / ((-h).exp() + 1.0)
    } else {
        h.exp() / (h.exp() + 1.0)
    }
}

/// The sigmoid formula, generic over plain and uncertain inputs.
pub fn sigmoid<S: Scalar>(
    x: S,
    low: f64,
    high: f64,
    k: f64,
    base: f64,
    shift: f64,
) -> Result<S> {
    if base <= 1.0 {
        return Err(ScoreKitError::Computation(
            "sigmoid base must be greater than 1".to_string(),
        ));
    }
    check_shift(shift)?;
    if high < low {
        return Err(ScoreKitError::Computation(
            "sigmoid range must satisfy high >= low".to_string(),
        ));
    }

    let centered = x - (high + low) / 2.0;
    let result = if high == low {
        hard_sigmoid(centered, k)
    } else {
        stable_sigmoid(centered, 10.0 * k / (high - low), base)
    };
    Ok(result * (1.0 - shift) + shift)
}

fn sigmoid_utility(args: &ArgValues) -> Result<Value> {
    let value = sigmoid(
        args.float("x")?,
        args.float("low")?,
        args.float("high")?,
        args.float("k")?,
        args.float("base")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Sigmoid curve with coefficients `low`, `high`, `k`, `base` and `shift`.
///
/// `k`, `base` and `shift` carry defaults, so only the range has to be set
/// before computing.
#[derive(Debug, Clone)]
pub struct Sigmoid {
    strategy: ParameterizedStrategy,
}

impl Sigmoid {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("float")),
            ("low".to_string(), ParameterSpec::new("float")),
            ("high".to_string(), ParameterSpec::new("float")),
            (
                "k".to_string(),
                ParameterSpec::new("float")
                    .with_default(0.5)
                    .with_min(-1.0)
                    .with_max(1.0),
            ),
            (
                "base".to_string(),
                ParameterSpec::new("float")
                    .with_default(10.0)
                    .with_min(1.0)
                    .with_max(10.0),
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
            &["low", "high", "k", "base", "shift"],
            &["x"],
            sigmoid_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for Sigmoid {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        sigmoid(
            x,
            float_coefficient(&coefficients, "low")?,
            float_coefficient(&coefficients, "high")?,
            float_coefficient(&coefficients, "k")?,
            float_coefficient(&coefficients, "base")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}
