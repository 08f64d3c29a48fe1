//! Weighted deviation index
//!
//! `1 - sqrt(sum(w_i^2 * (ideal - x_i)^2) / sum(w_i^2))`: scores a set of
//! values by how far they fall from an ideal reference, with each squared
//! deviation amplified by its squared weight. Values at the ideal score 1;
//! the result goes negative once the weighted deviations exceed one unit.
//!
//! Unlike the mean-style aggregations this one carries a coefficient,
//! `ideal_value`, which defaults to 1.0 so the strategy is ready to compute
//! immediately after construction.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{fill_weights, float_items, validate, Aggregation};

/// The deviation index formula, generic over plain and uncertain values.
pub fn weighted_deviation_index<S: Scalar>(
    values: &[S],
    weights: &[f64],
    ideal_value: f64,
) -> Result<S> {
    validate(values, weights)?;
    let weight_squared_sum: f64 = weights.iter().map(|w| w * w).sum();
    let sum_term = values
        .iter()
        .zip(weights)
        .fold(S::from_f64(0.0), |acc, (v, w)| {
            let delta = *v - ideal_value;
            acc + delta * delta * (w * w)
        });
    Ok(S::from_f64(1.0) - (sum_term / weight_squared_sum).powf(0.5))
}

fn deviation_index_utility(args: &ArgValues) -> Result<Value> {
    let values = float_items(args, "values")?;
    let weights = float_items(args, "weights")?;
    let ideal_value = args.float("ideal_value")?;
    Ok(Value::Float(weighted_deviation_index(
        &values,
        &weights,
        ideal_value,
    )?))
}

/// Deviation-from-ideal aggregation with coefficient `ideal_value`.
#[derive(Debug, Clone)]
pub struct WeightedDeviationIndex {
    strategy: ParameterizedStrategy,
}

impl WeightedDeviationIndex {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("values".to_string(), ParameterSpec::new("iterable")),
            ("weights".to_string(), ParameterSpec::new("iterable")),
            (
                "ideal_value".to_string(),
                ParameterSpec::new("float").with_default(1.0),
            ),
        ]);
        let strategy = ParameterizedStrategy::new(
            &schema,
            &["ideal_value"],
            &["values", "weights"],
            deviation_index_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Aggregation for WeightedDeviationIndex {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, values: &[UFloat], weights: Option<&[f64]>) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        let ideal_value = coefficients
            .get("ideal_value")
            .and_then(Value::as_float)
            .ok_or_else(|| {
                ScoreKitError::Computation("coefficient 'ideal_value' is not a float".to_string())
            })?;
        let weights = fill_weights(values.len(), weights);
        weighted_deviation_index(values, &weights, ideal_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ValueMap;
    use approx::assert_relative_eq;

    #[test]
    fn test_deviation_index_against_default_ideal() {
        let aggregator = WeightedDeviationIndex::new().unwrap();
        let result = aggregator
            .compute_numeric(&[1.0, 2.0, 3.0], Some(&[0.2, 0.3, 0.5]))
            .unwrap();
        // sum(w^2 * delta^2) = 0.09 * 1 + 0.25 * 4 = 1.09; sum(w^2) = 0.38.
        let expected = 1.0 - (1.09f64 / 0.38).sqrt();
        assert_relative_eq!(result, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_values_at_ideal_score_one() {
        let aggregator = WeightedDeviationIndex::new().unwrap();
        let result = aggregator
            .compute_numeric(&[1.0, 1.0, 1.0], Some(&[0.2, 0.3, 0.5]))
            .unwrap();
        assert_relative_eq!(result, 1.0);
    }

    #[test]
    fn test_ideal_value_coefficient_recenters_the_index() {
        let mut aggregator = WeightedDeviationIndex::new().unwrap();
        aggregator
            .strategy_mut()
            .set_coefficient_parameters_values(&ValueMap::from([(
                "ideal_value".to_string(),
                Value::Float(2.0),
            )]))
            .unwrap();
        let result = aggregator
            .compute_numeric(&[2.0, 2.0], Some(&[1.0, 1.0]))
            .unwrap();
        assert_relative_eq!(result, 1.0);
    }

    #[test]
    fn test_equal_weights_by_default() {
        let aggregator = WeightedDeviationIndex::new().unwrap();
        let result = aggregator.compute_numeric(&[0.5], None).unwrap();
        assert_relative_eq!(result, 0.5);
    }

    #[test]
    fn test_validation_applies() {
        let aggregator = WeightedDeviationIndex::new().unwrap();
        let err = aggregator
            .compute_numeric(&[1.0, 2.0], Some(&[1.0]))
            .unwrap_err();
        assert!(matches!(err, ScoreKitError::InvalidInput(_)));
    }

    #[test]
    fn test_ufloat_nominal_matches_numeric() {
        let aggregator = WeightedDeviationIndex::new().unwrap();
        let values = [UFloat::new(1.0, 0.1), UFloat::new(2.0, 0.2)];
        let uncertain = aggregator
            .compute_ufloat(&values, Some(&[0.4, 0.6]))
            .unwrap();
        let plain = aggregator
            .compute_numeric(&[1.0, 2.0], Some(&[0.4, 0.6]))
            .unwrap();
        assert_relative_eq!(uncertain.nominal(), plain, epsilon = 1e-12);
        assert!(uncertain.std_dev() > 0.0);
    }
}
