//! Desirability curves
//!
//! A desirability function maps a raw property value onto a `[0, 1]` score
//! (before any vertical shift). Each curve wraps a
//! [`ParameterizedStrategy`]: the curve shape is fixed by coefficient
//! parameters, the scored value arrives as the `x` input parameter.
//!
//! Curve formulas are written once, generically over [`Scalar`], so the same
//! code paths serve plain `f64` scoring and uncertainty-propagating
//! [`UFloat`] scoring.
//!
//! Curves are looked up by name through the process-wide catalogue
//! ([`create_desirability`]); custom curves can be added at runtime with
//! [`register_desirability`].

pub mod bell;
pub mod double_sigmoid;
pub mod multistep;
pub mod sigmoid;
pub mod sigmoid_bell;
pub mod step;
pub mod value_mapping;

pub use bell::Bell;
pub use double_sigmoid::DoubleSigmoid;
pub use multistep::MultiStep;
pub use sigmoid::Sigmoid;
pub use sigmoid_bell::SigmoidBell;
pub use step::{LeftStep, RightStep, Step};
pub use value_mapping::ValueMapping;

use crate::catalogue::{Catalogue, CatalogueError};
use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, Value, ValueMap};
use crate::strategy::ParameterizedStrategy;
use crate::uncertain::UFloat;
use std::collections::BTreeMap;
use std::sync::{LazyLock, RwLock};

/// A desirability curve over a parameterized strategy.
///
/// [`compute_numeric`](Desirability::compute_numeric) routes through the
/// strategy's full validation pipeline. [`compute_ufloat`](Desirability::compute_ufloat)
/// is implemented per curve: it passes the same coefficient gate, then calls
/// the scalar-generic formula with an uncertain input.
pub trait Desirability: std::fmt::Debug {
    fn strategy(&self) -> &ParameterizedStrategy;

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy;

    /// Score a plain numeric input.
    fn compute_numeric(&self, x: f64) -> Result<f64> {
        let out = self
            .strategy()
            .compute(&ValueMap::from([("x".to_string(), Value::Float(x))]))?;
        out.as_float().ok_or_else(|| {
            ScoreKitError::Computation("desirability utility did not return a float".to_string())
        })
    }

    /// Score an uncertain input, propagating its standard deviation through
    /// the curve formula.
    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat>;

    /// Score a categorical input. Only mapping-based curves accept strings;
    /// everything else fails with a computation error.
    fn compute_string(&self, x: &str) -> Result<f64> {
        let _ = x;
        Err(ScoreKitError::Computation(
            "this desirability does not accept string inputs".to_string(),
        ))
    }
}

/// Shift moves the whole curve upward inside the unit interval.
pub(crate) fn check_shift(shift: f64) -> Result<()> {
    if (0.0..=1.0).contains(&shift) {
        Ok(())
    } else {
        Err(ScoreKitError::Computation(
            "shift must be between 0 and 1".to_string(),
        ))
    }
}

pub(crate) fn float_coefficient(
    coefficients: &BTreeMap<String, Value>,
    name: &str,
) -> Result<f64> {
    coefficients.get(name).and_then(Value::as_float).ok_or_else(|| {
        ScoreKitError::Computation(format!("coefficient '{name}' is not a float"))
    })
}

pub(crate) fn bool_coefficient(
    coefficients: &BTreeMap<String, Value>,
    name: &str,
) -> Result<bool> {
    coefficients.get(name).and_then(Value::as_bool).ok_or_else(|| {
        ScoreKitError::Computation(format!("coefficient '{name}' is not a bool"))
    })
}

/// Constructor for a freshly parameterized curve instance.
pub type DesirabilityFactory = fn() -> std::result::Result<Box<dyn Desirability>, ParameterError>;

static DESIRABILITIES: LazyLock<RwLock<Catalogue<DesirabilityFactory>>> =
    LazyLock::new(|| RwLock::new(builtin_desirabilities()));

fn make_sigmoid() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(Sigmoid::new()?))
}

fn make_bell() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(Bell::new()?))
}

fn make_step() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(Step::new()?))
}

fn make_leftstep() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(LeftStep::new()?))
}

fn make_rightstep() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(RightStep::new()?))
}

fn make_multistep() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(MultiStep::new()?))
}

fn make_double_sigmoid() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(DoubleSigmoid::new()?))
}

fn make_sigmoid_bell() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(SigmoidBell::new()?))
}

fn make_value_mapping() -> std::result::Result<Box<dyn Desirability>, ParameterError> {
    Ok(Box::new(ValueMapping::new()?))
}

/// The built-in curve registrations.
pub fn builtin_desirabilities() -> Catalogue<DesirabilityFactory> {
    Catalogue::from_iter([
        ("sigmoid", make_sigmoid as DesirabilityFactory),
        ("double_sigmoid", make_double_sigmoid as DesirabilityFactory),
        ("bell", make_bell as DesirabilityFactory),
        ("sigmoid_bell", make_sigmoid_bell as DesirabilityFactory),
        ("step", make_step as DesirabilityFactory),
        ("leftstep", make_leftstep as DesirabilityFactory),
        ("rightstep", make_rightstep as DesirabilityFactory),
        ("multistep", make_multistep as DesirabilityFactory),
        ("value_mapping", make_value_mapping as DesirabilityFactory),
    ])
}

/// Registered curve names, in lexicographic order.
pub fn desirability_names() -> Vec<String> {
    let guard = DESIRABILITIES.read().unwrap_or_else(|e| e.into_inner());
    guard.list_items().iter().map(|s| s.to_string()).collect()
}

/// Instantiate a curve by its registered name.
pub fn create_desirability(name: &str) -> Result<Box<dyn Desirability>> {
    let guard = DESIRABILITIES.read().unwrap_or_else(|e| e.into_inner());
    let factory = *guard.get(name)?;
    drop(guard);
    Ok(factory()?)
}

/// Register a custom curve factory under a new name.
pub fn register_desirability(
    name: &str,
    factory: DesirabilityFactory,
) -> std::result::Result<(), CatalogueError> {
    let mut guard = DESIRABILITIES.write().unwrap_or_else(|e| e.into_inner());
    guard.register(name, factory)
}
