//! Parameter definition and implementation
//!
//! This module provides the [`Parameter`] family: a closed set of typed,
//! boundary-checked value containers. Each variant enforces its own type and
//! domain constraints on every assignment. The value slot starts unset and is
//! mutated in place through a validated setter; the constraint schema of a
//! parameter never changes after construction — schema changes go through
//! [`ParameterManager::set_parameter_attributes`](crate::parameters::ParameterManager::set_parameter_attributes),
//! which rebuilds the parameter wholesale.

use crate::parameters::value::Value;
use crate::uncertain::UFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when defining or assigning parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Invalid parameter name: {0}")]
    InvalidName(String),

    #[error("Invalid parameter type: {0}")]
    InvalidType(String),

    #[error("Invalid boundary definition: {0}")]
    InvalidBoundaryDefinition(String),

    #[error("Value outside boundary: {0}")]
    OutOfBounds(String),

    #[error("Value not accepted: {0}")]
    NotAccepted(String),

    #[error("Parameter definition error: {0}")]
    Definition(String),

    #[error("Parameters cannot be both coefficients and inputs: {0}")]
    Overlap(String),

    #[error("Parameter '{0}' not found")]
    NotFound(String),

    #[error("Parameter value not set: {0}")]
    ValueNotSet(String),

    #[error("Parameter setting error: {0}")]
    Setting(String),

    #[error("Attribute update failed for parameter '{name}': {source}")]
    AttributeUpdate {
        name: String,
        #[source]
        source: Box<ParameterError>,
    },
}

impl ParameterError {
    /// Prefix the parameter name into the message, preserving the error kind.
    pub(crate) fn with_parameter(self, name: &str) -> Self {
        let tag = |msg: String| format!("parameter '{name}': {msg}");
        match self {
            ParameterError::InvalidName(msg) => ParameterError::InvalidName(tag(msg)),
            ParameterError::InvalidType(msg) => ParameterError::InvalidType(tag(msg)),
            ParameterError::InvalidBoundaryDefinition(msg) => {
                ParameterError::InvalidBoundaryDefinition(tag(msg))
            }
            ParameterError::OutOfBounds(msg) => ParameterError::OutOfBounds(tag(msg)),
            ParameterError::NotAccepted(msg) => ParameterError::NotAccepted(tag(msg)),
            ParameterError::Definition(msg) => ParameterError::Definition(tag(msg)),
            ParameterError::Setting(msg) => ParameterError::Setting(tag(msg)),
            ParameterError::ValueNotSet(msg) => ParameterError::ValueNotSet(tag(msg)),
            other => other,
        }
    }
}

/// Non-fatal conditions reported alongside successful operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterWarning {
    #[error("the following parameters are not modified: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error(
        "the value of parameter '{0}' cannot be updated through attributes; \
         use set_parameter_value instead, the value is left unchanged"
    )]
    ValueIgnored(String),

    #[error("the strategy declares no coefficient parameters; nothing to set")]
    NoCoefficients,
}

/// Declarative description of one parameter: its kind tag plus the optional
/// constraint attributes that apply to that kind.
///
/// This is both the schema-declaration protocol consumed by
/// [`ParameterManager`](crate::parameters::ParameterManager) construction and
/// the attribute snapshot returned by [`Parameter::attributes`] for
/// merge-then-reconstruct updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Kind tag, resolved against the parameter-kind catalogue.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_values: Option<Vec<Value>>,
}

impl ParameterSpec {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            default: None,
            min: None,
            max: None,
            accepted_values: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_min(mut self, value: impl Into<Value>) -> Self {
        self.min = Some(value.into());
        self
    }

    pub fn with_max(mut self, value: impl Into<Value>) -> Self {
        self.max = Some(value.into());
        self
    }

    pub fn with_accepted_values(mut self, values: Vec<Value>) -> Self {
        self.accepted_values = Some(values);
        self
    }
}

fn validate_name(name: &str) -> Result<(), ParameterError> {
    if name.trim().is_empty() {
        return Err(ParameterError::InvalidName(
            "the parameter name is empty".to_string(),
        ));
    }
    Ok(())
}

fn check_range_order<T: PartialOrd + std::fmt::Display>(
    min: &Option<T>,
    max: &Option<T>,
) -> Result<(), ParameterError> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(ParameterError::InvalidBoundaryDefinition(format!(
                "minimum value {lo} is greater than maximum value {hi}"
            )));
        }
    }
    Ok(())
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    value: &T,
    min: &Option<T>,
    max: &Option<T>,
) -> Result<(), ParameterError> {
    let below = min.as_ref().is_some_and(|lo| value < lo);
    let above = max.as_ref().is_some_and(|hi| value > hi);
    if below || above {
        let lo = min.as_ref().map_or("-inf".to_string(), |v| v.to_string());
        let hi = max.as_ref().map_or("+inf".to_string(), |v| v.to_string());
        return Err(ParameterError::OutOfBounds(format!(
            "value {value} is outside the allowed range [{lo}, {hi}]"
        )));
    }
    Ok(())
}

fn type_mismatch(expected: &str, got: &Value) -> ParameterError {
    ParameterError::InvalidType(format!(
        "expected type {expected}, got {} instead",
        got.kind()
    ))
}

fn boundary_type_mismatch(attribute: &str, expected: &str, got: &Value) -> ParameterError {
    ParameterError::InvalidBoundaryDefinition(format!(
        "erroneous type for {attribute}: expected type {expected}, got {} instead",
        got.kind()
    ))
}

fn reject_attribute(kind: &str, attribute: &str, present: bool) -> Result<(), ParameterError> {
    if present {
        return Err(ParameterError::InvalidBoundaryDefinition(format!(
            "attribute '{attribute}' is not supported by parameter kind '{kind}'"
        )));
    }
    Ok(())
}

/// An integer parameter with optional minimum and maximum boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntParameter {
    name: String,
    value: Option<i64>,
    default: Option<i64>,
    min: Option<i64>,
    max: Option<i64>,
}

impl IntParameter {
    pub fn new(
        name: &str,
        default: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        check_range_order(&min, &max)?;
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default,
            min,
            max,
        };
        // The default goes through the same validation as any later assignment.
        if let Some(d) = default {
            param.set_value(Some(d))?;
        }
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<i64>) -> Result<(), ParameterError> {
        if let Some(v) = value {
            check_range(&v, &self.min, &self.max)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

/// A floating-point parameter with optional minimum and maximum boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatParameter {
    name: String,
    value: Option<f64>,
    default: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl FloatParameter {
    pub fn new(
        name: &str,
        default: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        check_range_order(&min, &max)?;
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default,
            min,
            max,
        };
        if let Some(d) = default {
            param.set_value(Some(d))?;
        }
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<f64>) -> Result<(), ParameterError> {
        if let Some(v) = value {
            check_range(&v, &self.min, &self.max)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

/// A string parameter with an optional set of accepted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrParameter {
    name: String,
    value: Option<String>,
    default: Option<String>,
    accepted_values: Option<Vec<String>>,
}

impl StrParameter {
    pub fn new(
        name: &str,
        default: Option<String>,
        accepted_values: Option<Vec<String>>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default: default.clone(),
            accepted_values,
        };
        if let Some(d) = default {
            param.set_value(Some(d))?;
        }
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<String>) -> Result<(), ParameterError> {
        if let (Some(v), Some(accepted)) = (&value, &self.accepted_values) {
            if !accepted.contains(v) {
                return Err(ParameterError::NotAccepted(format!(
                    "value '{v}' is not in the list of accepted values: [{}]",
                    accepted.join(", ")
                )));
            }
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A boolean parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolParameter {
    name: String,
    value: Option<bool>,
    default: Option<bool>,
}

impl BoolParameter {
    pub fn new(name: &str, default: Option<bool>) -> Result<Self, ParameterError> {
        validate_name(name)?;
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default,
        };
        if let Some(d) = default {
            param.set_value(Some(d))?;
        }
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<bool>) -> Result<(), ParameterError> {
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<bool> {
        self.value
    }
}

/// An uncertain-float parameter. The `min`/`max` boundaries constrain the
/// nominal value only; the dispersion component is unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UFloatParameter {
    name: String,
    value: Option<UFloat>,
    default: Option<UFloat>,
    min: Option<f64>,
    max: Option<f64>,
}

impl UFloatParameter {
    pub fn new(
        name: &str,
        default: Option<UFloat>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        check_range_order(&min, &max)?;
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default,
            min,
            max,
        };
        if let Some(d) = default {
            param.set_value(Some(d))?;
        }
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<UFloat>) -> Result<(), ParameterError> {
        if let Some(v) = value {
            check_range(&v.nominal(), &self.min, &self.max)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<UFloat> {
        self.value
    }
}

/// A sequence parameter. Only the container type is checked; elements are not
/// validated. Defaults to an empty sequence when no default is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterableParameter {
    name: String,
    value: Option<Vec<Value>>,
    default: Vec<Value>,
    accepted_values: Option<Vec<Vec<Value>>>,
}

impl IterableParameter {
    pub fn new(
        name: &str,
        default: Option<Vec<Value>>,
        accepted_values: Option<Vec<Vec<Value>>>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        let default = default.unwrap_or_default();
        let mut param = Self {
            name: name.to_string(),
            value: None,
            default: default.clone(),
            accepted_values,
        };
        param.set_value(Some(default))?;
        Ok(param)
    }

    pub fn set_value(&mut self, value: Option<Vec<Value>>) -> Result<(), ParameterError> {
        if let (Some(v), Some(accepted)) = (&value, &self.accepted_values) {
            if !accepted.contains(v) {
                return Err(ParameterError::NotAccepted(format!(
                    "sequence is not in the list of accepted values ({} candidates)",
                    accepted.len()
                )));
            }
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<&[Value]> {
        self.value.as_deref()
    }
}

/// A mapping parameter. Only the container type is checked; entries are not
/// validated. Defaults to an empty mapping when no default is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingParameter {
    name: String,
    value: Option<BTreeMap<String, Value>>,
    default: BTreeMap<String, Value>,
}

impl MappingParameter {
    pub fn new(
        name: &str,
        default: Option<BTreeMap<String, Value>>,
    ) -> Result<Self, ParameterError> {
        validate_name(name)?;
        let default = default.unwrap_or_default();
        Ok(Self {
            name: name.to_string(),
            value: Some(default.clone()),
            default,
        })
    }

    pub fn set_value(&mut self, value: Option<BTreeMap<String, Value>>) -> Result<(), ParameterError> {
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> Option<&BTreeMap<String, Value>> {
        self.value.as_ref()
    }
}

/// A typed, boundary-checked parameter.
///
/// The closed set of variants mirrors the supported kind tags. The enum
/// surface is what the manager and strategies use: kind-checked value
/// assignment through [`Parameter::set_value`], snapshots through
/// [`Parameter::value`], and schema extraction through
/// [`Parameter::attributes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameter {
    Int(IntParameter),
    Float(FloatParameter),
    Str(StrParameter),
    Bool(BoolParameter),
    UFloat(UFloatParameter),
    Iterable(IterableParameter),
    Mapping(MappingParameter),
}

impl Parameter {
    /// Build a parameter of the kind and constraints declared by `spec`.
    ///
    /// Fails with [`ParameterError::Definition`] when the kind tag does not
    /// resolve to a registered variant; constraint and default validation
    /// errors propagate from the variant constructor.
    pub fn from_spec(name: &str, spec: &ParameterSpec) -> Result<Self, ParameterError> {
        let factory = crate::parameters::parameter_kinds()
            .get(&spec.kind)
            .map_err(|_| {
                ParameterError::Definition(format!(
                    "no parameter variant registered for type '{}'",
                    spec.kind
                ))
            })?;
        factory(name, spec)
    }

    /// The parameter's name.
    pub fn name(&self) -> &str {
        match self {
            Parameter::Int(p) => &p.name,
            Parameter::Float(p) => &p.name,
            Parameter::Str(p) => &p.name,
            Parameter::Bool(p) => &p.name,
            Parameter::UFloat(p) => &p.name,
            Parameter::Iterable(p) => &p.name,
            Parameter::Mapping(p) => &p.name,
        }
    }

    /// The kind tag of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Parameter::Int(_) => "int",
            Parameter::Float(_) => "float",
            Parameter::Str(_) => "str",
            Parameter::Bool(_) => "bool",
            Parameter::UFloat(_) => "ufloat",
            Parameter::Iterable(_) => "iterable",
            Parameter::Mapping(_) => "mapping",
        }
    }

    /// Current value, `None` while unset.
    pub fn value(&self) -> Option<Value> {
        match self {
            Parameter::Int(p) => p.value.map(Value::Int),
            Parameter::Float(p) => p.value.map(Value::Float),
            Parameter::Str(p) => p.value.clone().map(Value::Str),
            Parameter::Bool(p) => p.value.map(Value::Bool),
            Parameter::UFloat(p) => p.value.map(Value::UFloat),
            Parameter::Iterable(p) => p.value.clone().map(Value::List),
            Parameter::Mapping(p) => p.value.clone().map(Value::Map),
        }
    }

    /// Whether a value is currently assigned.
    pub fn is_set(&self) -> bool {
        match self {
            Parameter::Int(p) => p.value.is_some(),
            Parameter::Float(p) => p.value.is_some(),
            Parameter::Str(p) => p.value.is_some(),
            Parameter::Bool(p) => p.value.is_some(),
            Parameter::UFloat(p) => p.value.is_some(),
            Parameter::Iterable(p) => p.value.is_some(),
            Parameter::Mapping(p) => p.value.is_some(),
        }
    }

    /// Check that `value` matches this parameter's kind, without assigning.
    pub fn check_type(&self, value: &Value) -> Result<(), ParameterError> {
        if value.kind() != self.kind() {
            return Err(type_mismatch(self.kind(), value));
        }
        Ok(())
    }

    /// Assign a value after validation. `None` clears the value regardless of
    /// constraints. The assignment is strict: the value must be of the
    /// variant's exact kind, a boolean is never accepted as a numeric value.
    pub fn set_value(&mut self, value: Option<Value>) -> Result<(), ParameterError> {
        match (self, value) {
            (Parameter::Int(p), None) => p.set_value(None),
            (Parameter::Int(p), Some(Value::Int(v))) => p.set_value(Some(v)),
            (Parameter::Int(_), Some(other)) => Err(type_mismatch("int", &other)),

            (Parameter::Float(p), None) => p.set_value(None),
            (Parameter::Float(p), Some(Value::Float(v))) => p.set_value(Some(v)),
            (Parameter::Float(_), Some(other)) => Err(type_mismatch("float", &other)),

            (Parameter::Str(p), None) => p.set_value(None),
            (Parameter::Str(p), Some(Value::Str(v))) => p.set_value(Some(v)),
            (Parameter::Str(_), Some(other)) => Err(type_mismatch("str", &other)),

            (Parameter::Bool(p), None) => p.set_value(None),
            (Parameter::Bool(p), Some(Value::Bool(v))) => p.set_value(Some(v)),
            (Parameter::Bool(_), Some(other)) => Err(type_mismatch("bool", &other)),

            (Parameter::UFloat(p), None) => p.set_value(None),
            (Parameter::UFloat(p), Some(Value::UFloat(v))) => p.set_value(Some(v)),
            (Parameter::UFloat(_), Some(other)) => Err(type_mismatch("ufloat", &other)),

            (Parameter::Iterable(p), None) => p.set_value(None),
            (Parameter::Iterable(p), Some(Value::List(v))) => p.set_value(Some(v)),
            (Parameter::Iterable(_), Some(other)) => Err(type_mismatch("iterable", &other)),

            (Parameter::Mapping(p), None) => p.set_value(None),
            (Parameter::Mapping(p), Some(Value::Map(v))) => p.set_value(Some(v)),
            (Parameter::Mapping(_), Some(other)) => Err(type_mismatch("mapping", &other)),
        }
    }

    /// Snapshot of the constraint attributes (kind, default, min, max,
    /// accepted_values). The current value is deliberately excluded: it is not
    /// an attribute and cannot travel through the rebuild path.
    pub fn attributes(&self) -> ParameterSpec {
        match self {
            Parameter::Int(p) => ParameterSpec {
                kind: "int".to_string(),
                default: p.default.map(Value::Int),
                min: p.min.map(Value::Int),
                max: p.max.map(Value::Int),
                accepted_values: None,
            },
            Parameter::Float(p) => ParameterSpec {
                kind: "float".to_string(),
                default: p.default.map(Value::Float),
                min: p.min.map(Value::Float),
                max: p.max.map(Value::Float),
                accepted_values: None,
            },
            Parameter::Str(p) => ParameterSpec {
                kind: "str".to_string(),
                default: p.default.clone().map(Value::Str),
                min: None,
                max: None,
                accepted_values: p
                    .accepted_values
                    .clone()
                    .map(|vs| vs.into_iter().map(Value::Str).collect()),
            },
            Parameter::Bool(p) => ParameterSpec {
                kind: "bool".to_string(),
                default: p.default.map(Value::Bool),
                min: None,
                max: None,
                accepted_values: None,
            },
            Parameter::UFloat(p) => ParameterSpec {
                kind: "ufloat".to_string(),
                default: p.default.map(Value::UFloat),
                min: p.min.map(Value::Float),
                max: p.max.map(Value::Float),
                accepted_values: None,
            },
            Parameter::Iterable(p) => ParameterSpec {
                kind: "iterable".to_string(),
                default: Some(Value::List(p.default.clone())),
                min: None,
                max: None,
                accepted_values: p
                    .accepted_values
                    .clone()
                    .map(|vs| vs.into_iter().map(Value::List).collect()),
            },
            Parameter::Mapping(p) => ParameterSpec {
                kind: "mapping".to_string(),
                default: Some(Value::Map(p.default.clone())),
                min: None,
                max: None,
                accepted_values: None,
            },
        }
    }
}

fn opt_i64(value: &Option<Value>, attribute: &str) -> Result<Option<i64>, ParameterError> {
    match value {
        None => Ok(None),
        Some(Value::Int(v)) => Ok(Some(*v)),
        Some(other) => Err(boundary_type_mismatch(attribute, "int", other)),
    }
}

fn opt_f64(value: &Option<Value>, attribute: &str) -> Result<Option<f64>, ParameterError> {
    match value {
        None => Ok(None),
        Some(Value::Float(v)) => Ok(Some(*v)),
        Some(other) => Err(boundary_type_mismatch(attribute, "float", other)),
    }
}

// Nominal-value boundaries: plain floats or uncertain floats both resolve to
// a nominal bound.
fn opt_nominal(value: &Option<Value>, attribute: &str) -> Result<Option<f64>, ParameterError> {
    match value {
        None => Ok(None),
        Some(Value::Float(v)) => Ok(Some(*v)),
        Some(Value::UFloat(v)) => Ok(Some(v.nominal())),
        Some(other) => Err(boundary_type_mismatch(attribute, "float or ufloat", other)),
    }
}

pub(crate) fn int_from_spec(name: &str, spec: &ParameterSpec) -> Result<Parameter, ParameterError> {
    reject_attribute("int", "accepted_values", spec.accepted_values.is_some())?;
    let min = opt_i64(&spec.min, "min")?;
    let max = opt_i64(&spec.max, "max")?;
    let param = IntParameter::new(name, None, min, max)?;
    let mut param = Parameter::Int(param);
    apply_default(&mut param, spec)?;
    Ok(param)
}

pub(crate) fn float_from_spec(name: &str, spec: &ParameterSpec) -> Result<Parameter, ParameterError> {
    reject_attribute("float", "accepted_values", spec.accepted_values.is_some())?;
    let min = opt_f64(&spec.min, "min")?;
    let max = opt_f64(&spec.max, "max")?;
    let param = FloatParameter::new(name, None, min, max)?;
    let mut param = Parameter::Float(param);
    apply_default(&mut param, spec)?;
    Ok(param)
}

pub(crate) fn str_from_spec(name: &str, spec: &ParameterSpec) -> Result<Parameter, ParameterError> {
    reject_attribute("str", "min", spec.min.is_some())?;
    reject_attribute("str", "max", spec.max.is_some())?;
    let accepted = match &spec.accepted_values {
        None => None,
        Some(values) => {
            let mut accepted = Vec::with_capacity(values.len());
            for v in values {
                match v {
                    Value::Str(s) => accepted.push(s.clone()),
                    other => return Err(boundary_type_mismatch("accepted_values", "str", other)),
                }
            }
            Some(accepted)
        }
    };
    let param = StrParameter::new(name, None, accepted)?;
    let mut param = Parameter::Str(param);
    apply_default(&mut param, spec)?;
    Ok(param)
}

pub(crate) fn bool_from_spec(name: &str, spec: &ParameterSpec) -> Result<Parameter, ParameterError> {
    reject_attribute("bool", "min", spec.min.is_some())?;
    reject_attribute("bool", "max", spec.max.is_some())?;
    reject_attribute("bool", "accepted_values", spec.accepted_values.is_some())?;
    let mut param = Parameter::Bool(BoolParameter::new(name, None)?);
    apply_default(&mut param, spec)?;
    Ok(param)
}

pub(crate) fn ufloat_from_spec(name: &str, spec: &ParameterSpec) -> Result<Parameter, ParameterError> {
    reject_attribute("ufloat", "accepted_values", spec.accepted_values.is_some())?;
    let min = opt_nominal(&spec.min, "min")?;
    let max = opt_nominal(&spec.max, "max")?;
    let param = UFloatParameter::new(name, None, min, max)?;
    let mut param = Parameter::UFloat(param);
    apply_default(&mut param, spec)?;
    Ok(param)
}

pub(crate) fn iterable_from_spec(
    name: &str,
    spec: &ParameterSpec,
) -> Result<Parameter, ParameterError> {
    reject_attribute("iterable", "min", spec.min.is_some())?;
    reject_attribute("iterable", "max", spec.max.is_some())?;
    let accepted = match &spec.accepted_values {
        None => None,
        Some(values) => {
            let mut accepted = Vec::with_capacity(values.len());
            for v in values {
                match v {
                    Value::List(seq) => accepted.push(seq.clone()),
                    other => {
                        return Err(boundary_type_mismatch("accepted_values", "iterable", other))
                    }
                }
            }
            Some(accepted)
        }
    };
    let default = match &spec.default {
        None => None,
        Some(Value::List(seq)) => Some(seq.clone()),
        Some(other) => return Err(type_mismatch("iterable", other)),
    };
    Ok(Parameter::Iterable(IterableParameter::new(
        name, default, accepted,
    )?))
}

pub(crate) fn mapping_from_spec(
    name: &str,
    spec: &ParameterSpec,
) -> Result<Parameter, ParameterError> {
    reject_attribute("mapping", "min", spec.min.is_some())?;
    reject_attribute("mapping", "max", spec.max.is_some())?;
    reject_attribute("mapping", "accepted_values", spec.accepted_values.is_some())?;
    let default = match &spec.default {
        None => None,
        Some(Value::Map(map)) => Some(map.clone()),
        Some(other) => return Err(type_mismatch("mapping", other)),
    };
    Ok(Parameter::Mapping(MappingParameter::new(name, default)?))
}

// Routes the declared default through the regular setter so an invalid
// default fails construction with the same error as a later assignment, then
// records it as the default attribute.
fn apply_default(param: &mut Parameter, spec: &ParameterSpec) -> Result<(), ParameterError> {
    let Some(default) = &spec.default else {
        return Ok(());
    };
    param.set_value(Some(default.clone()))?;
    match param {
        Parameter::Int(p) => p.default = p.value,
        Parameter::Float(p) => p.default = p.value,
        Parameter::Str(p) => p.default = p.value.clone(),
        Parameter::Bool(p) => p.default = p.value,
        Parameter::UFloat(p) => p.default = p.value,
        Parameter::Iterable(_) | Parameter::Mapping(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_default_within_bounds() {
        let spec = ParameterSpec::new("int")
            .with_default(10i64)
            .with_min(0i64)
            .with_max(20i64);
        let param = Parameter::from_spec("n", &spec).unwrap();
        assert_eq!(param.value(), Some(Value::Int(10)));
        assert_eq!(param.kind(), "int");
    }

    #[test]
    fn test_invalid_default_fails_construction() {
        let spec = ParameterSpec::new("int")
            .with_default(50i64)
            .with_min(0i64)
            .with_max(20i64);
        let err = Parameter::from_spec("n", &spec).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfBounds(_)));
    }

    #[test]
    fn test_min_greater_than_max_fails() {
        let spec = ParameterSpec::new("float").with_min(5.0).with_max(1.0);
        let err = Parameter::from_spec("x", &spec).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidBoundaryDefinition(_)));
    }

    #[test]
    fn test_boundary_of_wrong_type_fails() {
        let spec = ParameterSpec::new("float").with_min(Value::Str("low".into()));
        let err = Parameter::from_spec("x", &spec).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidBoundaryDefinition(_)));
    }

    #[test]
    fn test_empty_name_fails() {
        let err = Parameter::from_spec("  ", &ParameterSpec::new("float")).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidName(_)));
    }

    #[test]
    fn test_unregistered_kind_fails() {
        let err = Parameter::from_spec("x", &ParameterSpec::new("complex")).unwrap_err();
        assert!(matches!(err, ParameterError::Definition(_)));
    }

    #[test]
    fn test_set_value_none_always_clears() {
        let spec = ParameterSpec::new("float")
            .with_default(0.5)
            .with_min(0.0)
            .with_max(1.0);
        let mut param = Parameter::from_spec("x", &spec).unwrap();
        assert!(param.is_set());
        param.set_value(None).unwrap();
        assert!(!param.is_set());
        assert_eq!(param.value(), None);
    }

    #[test]
    fn test_out_of_bounds_value_rejected() {
        let spec = ParameterSpec::new("float").with_min(0.0).with_max(1.0);
        let mut param = Parameter::from_spec("x", &spec).unwrap();
        let err = param.set_value(Some(Value::Float(1.5))).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfBounds(_)));
        // The stored value is untouched.
        assert_eq!(param.value(), None);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut param = Parameter::from_spec("x", &ParameterSpec::new("float")).unwrap();
        let err = param.set_value(Some(Value::Int(1))).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidType(_)));
    }

    #[test]
    fn test_bool_rejected_for_numeric_kinds() {
        let mut float_param = Parameter::from_spec("x", &ParameterSpec::new("float")).unwrap();
        let err = float_param.set_value(Some(Value::Bool(true))).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidType(_)));

        let mut int_param = Parameter::from_spec("n", &ParameterSpec::new("int")).unwrap();
        let err = int_param.set_value(Some(Value::Bool(false))).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidType(_)));
    }

    #[test]
    fn test_bool_default_applies_like_assignment() {
        let spec = ParameterSpec::new("bool").with_default(true);
        let param = Parameter::from_spec("invert", &spec).unwrap();
        assert!(param.is_set());
        assert_eq!(param.value(), Some(Value::Bool(true)));
        assert_eq!(param.attributes().default, Some(Value::Bool(true)));
    }

    #[test]
    fn test_str_accepted_values() {
        let spec = ParameterSpec::new("str")
            .with_accepted_values(vec![Value::Str("mean".into()), Value::Str("median".into())]);
        let mut param = Parameter::from_spec("mode", &spec).unwrap();
        param.set_value(Some(Value::Str("mean".into()))).unwrap();
        let err = param.set_value(Some(Value::Str("mode".into()))).unwrap_err();
        assert!(matches!(err, ParameterError::NotAccepted(_)));
    }

    #[test]
    fn test_str_rejects_numeric_boundaries() {
        let spec = ParameterSpec::new("str").with_min(0.0);
        let err = Parameter::from_spec("mode", &spec).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidBoundaryDefinition(_)));
    }

    #[test]
    fn test_ufloat_bounds_apply_to_nominal_only() {
        let spec = ParameterSpec::new("ufloat").with_min(0.0).with_max(1.0);
        let mut param = Parameter::from_spec("u", &spec).unwrap();
        // Huge dispersion is fine as long as the nominal value is in range.
        param
            .set_value(Some(Value::UFloat(UFloat::new(0.5, 100.0))))
            .unwrap();
        let err = param
            .set_value(Some(Value::UFloat(UFloat::new(1.5, 0.0))))
            .unwrap_err();
        assert!(matches!(err, ParameterError::OutOfBounds(_)));
    }

    #[test]
    fn test_iterable_defaults_to_empty_sequence() {
        let param = Parameter::from_spec("coords", &ParameterSpec::new("iterable")).unwrap();
        assert_eq!(param.value(), Some(Value::List(vec![])));
    }

    #[test]
    fn test_mapping_defaults_to_empty_mapping() {
        let param = Parameter::from_spec("extras", &ParameterSpec::new("mapping")).unwrap();
        assert_eq!(param.value(), Some(Value::Map(BTreeMap::new())));
    }

    #[test]
    fn test_iterable_elements_not_validated() {
        let mut param = Parameter::from_spec("coords", &ParameterSpec::new("iterable")).unwrap();
        // Mixed element types pass: only the container type is checked.
        param
            .set_value(Some(Value::List(vec![
                Value::Float(1.0),
                Value::Str("tag".into()),
            ])))
            .unwrap();
    }

    #[test]
    fn test_attributes_exclude_value() {
        let spec = ParameterSpec::new("float")
            .with_default(0.5)
            .with_min(0.0)
            .with_max(1.0);
        let mut param = Parameter::from_spec("x", &spec).unwrap();
        param.set_value(Some(Value::Float(0.9))).unwrap();
        let attrs = param.attributes();
        assert_eq!(attrs.default, Some(Value::Float(0.5)));
        assert_eq!(attrs.min, Some(Value::Float(0.0)));
        assert_eq!(attrs.max, Some(Value::Float(1.0)));
    }

    #[test]
    fn test_error_kind_preserved_with_parameter_context() {
        let err = ParameterError::OutOfBounds("value 7 is outside the allowed range".to_string())
            .with_parameter("w1");
        match err {
            ParameterError::OutOfBounds(msg) => assert!(msg.contains("w1")),
            other => panic!("kind changed: {other:?}"),
        }
    }
}
