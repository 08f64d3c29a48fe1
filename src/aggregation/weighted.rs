//! Weighted aggregation formulas
//!
//! Five formulas over values `x_i` and weights `w_i`:
//!
//! - arithmetic mean: `sum(w_i * x_i) / sum(w_i)`
//! - geometric mean: `prod(x_i ^ (w_i / sum(w_i)))`
//! - harmonic mean: `sum(w_i) / sum(w_i / x_i)`
//! - product: `prod(x_i ^ w_i)`
//! - summation: `sum(w_i * x_i)`
//!
//! Each formula runs the shared validation pipeline before computing.

use crate::error::Result;
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{fill_weights, float_items, validate, Aggregation};

/// Weighted arithmetic mean.
pub fn weighted_arithmetic_mean<S: Scalar>(values: &[S], weights: &[f64]) -> Result<S> {
    validate(values, weights)?;
    let weighted_sum = values
        .iter()
        .zip(weights)
        .fold(S::from_f64(0.0), |acc, (v, w)| acc + *v * *w);
    Ok(weighted_sum / weights.iter().sum::<f64>())
}

/// Weighted geometric mean.
pub fn weighted_geometric_mean<S: Scalar>(values: &[S], weights: &[f64]) -> Result<S> {
    validate(values, weights)?;
    let total_weight: f64 = weights.iter().sum();
    Ok(values
        .iter()
        .zip(weights)
        .fold(S::from_f64(1.0), |acc, (v, w)| {
            acc * v.powf(w / total_weight)
        }))
}

/// Weighted harmonic mean.
pub fn weighted_harmonic_mean<S: Scalar>(values: &[S], weights: &[f64]) -> Result<S> {
    validate(values, weights)?;
    let reciprocal_sum = values
        .iter()
        .zip(weights)
        .fold(S::from_f64(0.0), |acc, (v, w)| acc + S::from_f64(*w) / *v);
    Ok(S::from_f64(weights.iter().sum::<f64>()) / reciprocal_sum)
}

/// Weighted product.
pub fn weighted_product<S: Scalar>(values: &[S], weights: &[f64]) -> Result<S> {
    validate(values, weights)?;
    Ok(values
        .iter()
        .zip(weights)
        .fold(S::from_f64(1.0), |acc, (v, w)| acc * v.powf(*w)))
}

/// Weighted summation.
pub fn weighted_summation<S: Scalar>(values: &[S], weights: &[f64]) -> Result<S> {
    validate(values, weights)?;
    Ok(values
        .iter()
        .zip(weights)
        .fold(S::from_f64(0.0), |acc, (v, w)| acc + *v * *w))
}

fn arithmetic_mean_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    Ok(Value::Float(weighted_arithmetic_mean(&values, &weights)?))
}

fn geometric_mean_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    Ok(Value::Float(weighted_geometric_mean(&values, &weights)?))
}

fn harmonic_mean_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    Ok(Value::Float(weighted_harmonic_mean(&values, &weights)?))
}

fn product_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    Ok(Value::Float(weighted_product(&values, &weights)?))
}

fn summation_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    Ok(Value::Float(weighted_summation(&values, &weights)?))
}

fn aggregation_schema() -> Schema {
    Schema::from([
        ("values".to_string(), ParameterSpec::new("iterable")),
        ("weights".to_string(), ParameterSpec::new("iterable")),
    ])
}

macro_rules! impl_aggregation {
    ($name:ident, $utility:ident, $formula:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone)]
        pub struct $name {
            strategy: ParameterizedStrategy,
        }

        impl $name {
            pub fn new() -> std::result::Result<Self, ParameterError> {
                let strategy = ParameterizedStrategy::new(
                    &aggregation_schema(),
                    &[],
                    &["values", "weights"],
                    $utility,
                )?;
                Ok(Self { strategy })
            }
        }

        impl Aggregation for $name {
            fn strategy(&self) -> &ParameterizedStrategy {
                &self.strategy
            }

            fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
                &mut self.strategy
            }

            fn compute_ufloat(&self, values: &[UFloat], weights: Option<&[f64]>) -> Result<UFloat> {
                let weights = fill_weights(values.len(), weights);
                $formula(values, &weights)
            }
        }
    };
}

impl_aggregation!(
    WeightedArithmeticMean,
    arithmetic_mean_utility,
    weighted_arithmetic_mean,
    "Weighted arithmetic mean aggregation."
);

impl_aggregation!(
    WeightedGeometricMean,
    geometric_mean_utility,
    weighted_geometric_mean,
    "Weighted geometric mean aggregation."
);

impl_aggregation!(
    WeightedHarmonicMean,
    harmonic_mean_utility,
    weighted_harmonic_mean,
    "Weighted harmonic mean aggregation."
);

impl_aggregation!(
    WeightedProduct,
    product_utility,
    weighted_product,
    "Weighted product aggregation."
);

impl_aggregation!(
    WeightedSummation,
    summation_utility,
    weighted_summation,
    "Weighted summation aggregation."
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreKitError;
    use crate::parameters::{ParameterWarning, ValueMap};
    use approx::assert_relative_eq;

    const VALUES: [f64; 3] = [1.0, 2.0, 3.0];
    const WEIGHTS: [f64; 3] = [0.2, 0.3, 0.5];

    #[test]
    fn test_arithmetic_mean() {
        let aggregator = WeightedArithmeticMean::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        assert_relative_eq!(result, 2.3);
    }

    #[test]
    fn test_arithmetic_mean_equal_weights_by_default() {
        let aggregator = WeightedArithmeticMean::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, None).unwrap();
        assert_relative_eq!(result, 2.0);
    }

    #[test]
    fn test_geometric_mean() {
        let aggregator = WeightedGeometricMean::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        let expected = 1.0f64.powf(0.2) * 2.0f64.powf(0.3) * 3.0f64.powf(0.5);
        assert_relative_eq!(result, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_harmonic_mean() {
        let aggregator = WeightedHarmonicMean::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        let expected = 1.0 / (0.2 / 1.0 + 0.3 / 2.0 + 0.5 / 3.0);
        assert_relative_eq!(result, expected, epsilon = 1e-12);
        assert_relative_eq!(result, 1.9354838709677418, epsilon = 1e-9);
    }

    #[test]
    fn test_product() {
        let aggregator = WeightedProduct::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        let expected = 2.0f64.powf(0.3) * 3.0f64.powf(0.5);
        assert_relative_eq!(result, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_summation() {
        let aggregator = WeightedSummation::new().unwrap();
        let result = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        assert_relative_eq!(result, 2.3);
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let aggregator = WeightedArithmeticMean::new().unwrap();
        let err = aggregator
            .compute_numeric(&VALUES, Some(&[1.0]))
            .unwrap_err();
        assert!(matches!(err, ScoreKitError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_weight_sum_is_invalid_input() {
        let aggregator = WeightedSummation::new().unwrap();
        let err = aggregator
            .compute_numeric(&VALUES, Some(&[0.0, 0.0, 0.0]))
            .unwrap_err();
        assert!(matches!(err, ScoreKitError::InvalidInput(_)));
    }

    #[test]
    fn test_setting_coefficients_is_warning_noop() {
        let mut aggregator = WeightedArithmeticMean::new().unwrap();
        let warnings = aggregator
            .strategy_mut()
            .set_coefficient_parameters_values(&ValueMap::from([(
                "values".to_string(),
                Value::List(vec![]),
            )]))
            .unwrap();
        assert_eq!(warnings, vec![ParameterWarning::NoCoefficients]);
    }

    #[test]
    fn test_ufloat_propagation_through_summation() {
        let aggregator = WeightedSummation::new().unwrap();
        let values = [UFloat::new(1.0, 0.1), UFloat::new(2.0, 0.2)];
        let result = aggregator.compute_ufloat(&values, Some(&[1.0, 1.0])).unwrap();
        assert_relative_eq!(result.nominal(), 3.0);
        // sqrt(0.1^2 + 0.2^2)
        assert_relative_eq!(result.std_dev(), 0.05f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_ufloat_harmonic_matches_numeric_nominal() {
        let aggregator = WeightedHarmonicMean::new().unwrap();
        let values = [
            UFloat::new(1.0, 0.1),
            UFloat::new(2.0, 0.2),
            UFloat::new(3.0, 0.3),
        ];
        let uncertain = aggregator.compute_ufloat(&values, Some(&WEIGHTS)).unwrap();
        let plain = aggregator.compute_numeric(&VALUES, Some(&WEIGHTS)).unwrap();
        assert_relative_eq!(uncertain.nominal(), plain, epsilon = 1e-12);
        assert!(uncertain.std_dev() > 0.0);
    }
}
