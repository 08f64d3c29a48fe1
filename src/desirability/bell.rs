//! Generalized bell desirability curve
//!
//! The membership function `1 / (1 + |(x - center) / width|^(2 * slope))`,
//! peaking at `center` and widening with `width`. `invert` flips the curve
//! into a notch and `shift` raises its floor.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{bool_coefficient, check_shift, float_coefficient, Desirability};

/// The bell formula, generic over plain and uncertain inputs.
pub fn bell<S: Scalar>(
    x: S,
    width: f64,
    slope: f64,
    center: f64,
    invert: bool,
    shift: f64,
) -> Result<S> {
    check_shift(shift)?;
    if width <= 0.0 {
        return Err(ScoreKitError::Computation(
            "bell width must be greater than 0".to_string(),
        ));
    }

    let exponent = 2.0 * slope.abs();
    let base = ((x - center) / width).abs();

    // base^exponent would overflow; the curve is already flat out here.
    if base.nominal() > 1.0 && exponent > f64::MAX.ln() / base.nominal().ln() {
        return Ok(S::from_f64(shift));
    }

    let mut result = S::from_f64(1.0) / (base.powf(exponent) + 1.0);
    if invert {
        result = S::from_f64(1.0) - result;
    }
    Ok(result * (1.0 - shift) + shift)
}

fn bell_utility(args: &ArgValues) -> Result<Value> {
    let value = bell(
        args.float("x")?,
        args.float("width")?,
        args.float("slope")?,
        args.float("center")?,
        args.boolean("invert")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Bell curve with coefficients `width`, `slope`, `center`, `invert` and
/// `shift`. Only `width` and `center` have to be set before computing.
#[derive(Debug, Clone)]
pub struct Bell {
    strategy: ParameterizedStrategy,
}

impl Bell {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("float")),
            (
                "width".to_string(),
                ParameterSpec::new("float").with_min(f64::EPSILON),
            ),
            (
                "slope".to_string(),
                ParameterSpec::new("float").with_default(1.0).with_min(1.0),
            ),
            ("center".to_string(), ParameterSpec::new("float")),
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
            &["width", "slope", "center", "invert", "shift"],
            &["x"],
            bell_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for Bell {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        bell(
            x,
            float_coefficient(&coefficients, "width")?,
            float_coefficient(&coefficients, "slope")?,
            float_coefficient(&coefficients, "center")?,
            bool_coefficient(&coefficients, "invert")?,
            float_coefficient(&coefficients, "shift")?,
        )
    }
}
