//! Weighted aggregation of desirability scores
//!
//! An aggregation collapses a list of per-property scores into one overall
//! score, optionally weighting each contribution. Aggregations wrap a
//! [`ParameterizedStrategy`] with `values` and `weights` as iterable input
//! parameters. The mean-style aggregations declare no coefficients at all,
//! and the one coefficient the deviation index declares carries a default,
//! so every strategy is ready to compute immediately after construction.
//!
//! Like desirability curves, the formulas are generic over [`Scalar`] and
//! are looked up by name through a process-wide catalogue.

pub mod deviation;
pub mod weighted;

pub use deviation::WeightedDeviationIndex;
pub use weighted::{
    WeightedArithmeticMean, WeightedGeometricMean, WeightedHarmonicMean, WeightedProduct,
    WeightedSummation,
};

use crate::catalogue::{Catalogue, CatalogueError};
use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, Value, ValueMap};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};
use std::sync::{LazyLock, RwLock};

/// A weighted aggregation over a parameterized strategy.
pub trait Aggregation: std::fmt::Debug {
    fn strategy(&self) -> &ParameterizedStrategy;

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy;

    /// Aggregate plain numeric scores. Omitted weights count every value
    /// equally.
    fn compute_numeric(&self, values: &[f64], weights: Option<&[f64]>) -> Result<f64> {
        let weights = fill_weights(values.len(), weights);
        let inputs = ValueMap::from([
            (
                "values".to_string(),
                Value::List(values.iter().map(|v| Value::Float(*v)).collect()),
            ),
            (
                "weights".to_string(),
                Value::List(weights.iter().map(|w| Value::Float(*w)).collect()),
            ),
        ]);
        let out = self.strategy().compute(&inputs)?;
        out.as_float().ok_or_else(|| {
            ScoreKitError::Computation("aggregation utility did not return a float".to_string())
        })
    }

    /// Aggregate uncertain scores, propagating their standard deviations.
    fn compute_ufloat(&self, values: &[UFloat], weights: Option<&[f64]>) -> Result<UFloat>;
}

pub(crate) fn fill_weights(count: usize, weights: Option<&[f64]>) -> Vec<f64> {
    match weights {
        Some(weights) => weights.to_vec(),
        None => vec![1.0; count],
    }
}

pub(crate) fn float_items(args: &ArgValues, name: &str) -> Result<Vec<f64>> {
    args.list(name)?
        .iter()
        .map(|item| {
            item.as_float().ok_or_else(|| {
                ScoreKitError::InvalidInput(format!("'{name}' entries must be floats, got {item}"))
            })
        })
        .collect()
}

/// The shared validation pipeline: length match, non-empty input, finite
/// non-negative data, and a usable total weight.
pub(crate) fn validate<S: Scalar>(values: &[S], weights: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(ScoreKitError::InvalidInput(
            "values must not be empty".to_string(),
        ));
    }
    if values.len() != weights.len() {
        return Err(ScoreKitError::InvalidInput(format!(
            "the length of values ({}) and weights ({}) does not match",
            values.len(),
            weights.len()
        )));
    }
    if values.iter().any(|v| v.nominal().is_nan()) || weights.iter().any(|w| w.is_nan()) {
        return Err(ScoreKitError::InvalidInput(
            "NaN values and weights are not allowed".to_string(),
        ));
    }
    if values.iter().any(|v| v.nominal() < 0.0) {
        return Err(ScoreKitError::InvalidInput(
            "all values must be non-negative".to_string(),
        ));
    }
    if weights.iter().any(|w| *w < 0.0) {
        return Err(ScoreKitError::InvalidInput(
            "all weights must be non-negative".to_string(),
        ));
    }
    if weights.iter().sum::<f64>() == 0.0 {
        return Err(ScoreKitError::InvalidInput(
            "weights must not sum to zero".to_string(),
        ));
    }
    Ok(())
}

/// Constructor for a fresh aggregation instance.
pub type AggregationFactory = fn() -> std::result::Result<Box<dyn Aggregation>, ParameterError>;

static AGGREGATIONS: LazyLock<RwLock<Catalogue<AggregationFactory>>> =
    LazyLock::new(|| RwLock::new(builtin_aggregations()));

fn make_arithmetic_mean() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedArithmeticMean::new()?))
}

fn make_geometric_mean() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedGeometricMean::new()?))
}

fn make_harmonic_mean() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedHarmonicMean::new()?))
}

fn make_product() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedProduct::new()?))
}

fn make_summation() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedSummation::new()?))
}

fn make_deviation_index() -> std::result::Result<Box<dyn Aggregation>, ParameterError> {
    Ok(Box::new(WeightedDeviationIndex::new()?))
}

/// The built-in aggregation registrations.
pub fn builtin_aggregations() -> Catalogue<AggregationFactory> {
    Catalogue::from_iter([
        ("arithmetic_mean", make_arithmetic_mean as AggregationFactory),
        ("geometric_mean", make_geometric_mean as AggregationFactory),
        ("harmonic_mean", make_harmonic_mean as AggregationFactory),
        ("deviation_index", make_deviation_index as AggregationFactory),
        ("product", make_product as AggregationFactory),
        ("summation", make_summation as AggregationFactory),
    ])
}

/// Registered aggregation names, in lexicographic order.
pub fn aggregation_names() -> Vec<String> {
    let guard = AGGREGATIONS.read().unwrap_or_else(|e| e.into_inner());
    guard.list_items().iter().map(|s| s.to_string()).collect()
}

/// Instantiate an aggregation by its registered name.
pub fn create_aggregation(name: &str) -> Result<Box<dyn Aggregation>> {
    let guard = AGGREGATIONS.read().unwrap_or_else(|e| e.into_inner());
    let factory = *guard.get(name)?;
    drop(guard);
    Ok(factory()?)
}

/// Register a custom aggregation factory under a new name.
pub fn register_aggregation(
    name: &str,
    factory: AggregationFactory,
) -> std::result::Result<(), CatalogueError> {
    let mut guard = AGGREGATIONS.write().unwrap_or_else(|e| e.into_inner());
    guard.register(name, factory)
}
