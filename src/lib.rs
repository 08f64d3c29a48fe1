//! # scorekit
//!
//! Declarative, runtime-validated parameters and parameterized scoring
//! strategies.
//!
//! The crate is built around a small set of layered concepts:
//!
//! - **Parameters** ([`parameters`]): typed, boundary-checked values built
//!   from a declarative schema. A [`parameters::ParameterManager`] owns a
//!   named collection and enforces the mutation rules (values change in
//!   place, constraint attributes rebuild the parameter).
//! - **Strategies** ([`strategy`]): a [`strategy::ParameterizedStrategy`]
//!   binds a utility function to a parameter set split into configuration
//!   coefficients and per-call inputs, and gates computation on the
//!   coefficients being fully set.
//! - **Desirability curves** ([`desirability`]): sigmoid, double sigmoid,
//!   bell, sigmoid bell, step, multistep and value mapping scoring curves
//!   over strategies, registered by name.
//! - **Aggregations** ([`aggregation`]): weighted means, product, summation
//!   and the deviation index for collapsing per-property scores into one.
//! - **Uncertainty** ([`uncertain`]): [`uncertain::UFloat`] carries a value
//!   with its standard deviation through every formula via first-order
//!   error propagation.
//!
//! ## Quick start
//!
//! ```rust
//! use scorekit::desirability::{create_desirability, Desirability};
//! use scorekit::parameters::{Value, ValueMap};
//!
//! # fn main() -> scorekit::Result<()> {
//! let mut curve = create_desirability("sigmoid")?;
//! curve.strategy_mut().set_coefficient_parameters_values(&ValueMap::from([
//!     ("low".to_string(), Value::Float(0.0)),
//!     ("high".to_string(), Value::Float(1.0)),
//! ]))?;
//! let score = curve.compute_numeric(0.5)?;
//! assert!((score - 0.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod catalogue;
pub mod desirability;
pub mod error;
pub mod parameters;
pub mod strategy;
pub mod uncertain;

pub use catalogue::{Catalogue, CatalogueError};
pub use error::{Result, ScoreKitError};
pub use parameters::{
    AttributeUpdate, Parameter, ParameterError, ParameterManager, ParameterSpec, ParameterWarning,
    Schema, Value, ValueMap,
};
pub use strategy::{ArgValues, ParameterizedStrategy, UtilityFn};
pub use uncertain::{Scalar, UFloat};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
