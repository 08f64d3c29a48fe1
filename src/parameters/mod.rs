//! # Parameter System
//!
//! Typed, boundary-checked parameters built from a declarative schema.
//!
//! ## Core Components
//!
//! - [`Value`]: closed sum type carrying a parameter value at runtime
//! - [`Parameter`]: the variant family (int, float, str, bool, ufloat,
//!   iterable, mapping) with validated in-place value assignment
//! - [`ParameterSpec`] / [`Schema`]: the declarative schema protocol
//! - [`ParameterManager`]: a named parameter collection with the controlled
//!   mutation discipline (value updates in place, attribute updates by
//!   merge-then-reconstruct)
//! - the parameter-kind catalogue: kind tags (`"int"`, `"float"`, ...)
//!   resolved to variant constructors at schema-build time
//!
//! ## Example Usage
//!
//! ```rust
//! use scorekit::parameters::{ParameterManager, ParameterSpec, Schema, Value};
//!
//! let schema = Schema::from([
//!     ("k".to_string(), ParameterSpec::new("float").with_default(0.5).with_min(-1.0).with_max(1.0)),
//!     ("mode".to_string(), ParameterSpec::new("str")),
//! ]);
//! let mut manager = ParameterManager::new(&schema).unwrap();
//!
//! assert_eq!(manager.get_parameters_values()["k"], Some(Value::Float(0.5)));
//! manager.set_parameter_value("k", Some(Value::Float(-0.5))).unwrap();
//! assert!(manager.set_parameter_value("k", Some(Value::Float(2.0))).is_err());
//! ```

pub mod manager;
pub mod parameter;
pub mod value;

use crate::catalogue::Catalogue;
use std::sync::LazyLock;

// Re-export key types
pub use manager::{AttributeUpdate, ParameterManager, Schema, ValueMap};
pub use parameter::{Parameter, ParameterError, ParameterSpec, ParameterWarning};
pub use value::Value;

/// Constructor signature for a parameter variant: name plus declared spec.
pub type ParameterFactory = fn(&str, &ParameterSpec) -> Result<Parameter, ParameterError>;

static PARAMETER_KINDS: LazyLock<Catalogue<ParameterFactory>> =
    LazyLock::new(builtin_parameter_kinds);

/// The process-wide catalogue of parameter variants, populated once at first
/// use with the built-in kinds.
pub fn parameter_kinds() -> &'static Catalogue<ParameterFactory> {
    &PARAMETER_KINDS
}

/// The built-in kind registrations, one per [`Parameter`] variant.
pub fn builtin_parameter_kinds() -> Catalogue<ParameterFactory> {
    Catalogue::from_iter([
        ("int", parameter::int_from_spec as ParameterFactory),
        ("float", parameter::float_from_spec as ParameterFactory),
        ("str", parameter::str_from_spec as ParameterFactory),
        ("bool", parameter::bool_from_spec as ParameterFactory),
        ("ufloat", parameter::ufloat_from_spec as ParameterFactory),
        ("iterable", parameter::iterable_from_spec as ParameterFactory),
        ("mapping", parameter::mapping_from_spec as ParameterFactory),
    ])
}
