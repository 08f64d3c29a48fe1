//! Parameter collection built from a declarative schema
//!
//! [`ParameterManager`] owns a named collection of [`Parameter`] instances
//! instantiated from a [`Schema`]. It enforces the mutation discipline of the
//! architecture: value updates mutate the parameter in place, attribute
//! updates merge over the existing attributes and reconstruct the parameter
//! wholesale (the rebuilt parameter starts unset unless the merged attributes
//! carry a default).

use crate::parameters::parameter::{Parameter, ParameterError, ParameterSpec, ParameterWarning};
use crate::parameters::value::Value;
use std::collections::BTreeMap;

/// Declarative schema: parameter name to [`ParameterSpec`], in name order.
pub type Schema = BTreeMap<String, ParameterSpec>;

/// Bulk value assignment: parameter name to new value.
pub type ValueMap = BTreeMap<String, Value>;

/// A partial attribute override for one parameter.
///
/// Each field distinguishes "leave unchanged" (outer `None`) from "override"
/// (outer `Some`), where the override itself may clear the attribute (inner
/// `None`). A `value` override is never applied; it produces a
/// [`ParameterWarning::ValueIgnored`] and is dropped, since values must go
/// through [`ParameterManager::set_parameter_value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeUpdate {
    pub default: Option<Option<Value>>,
    pub min: Option<Option<Value>>,
    pub max: Option<Option<Value>>,
    pub accepted_values: Option<Option<Vec<Value>>>,
    pub value: Option<Option<Value>>,
}

impl AttributeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(Some(value.into()));
        self
    }

    pub fn clear_default(mut self) -> Self {
        self.default = Some(None);
        self
    }

    pub fn min(mut self, value: impl Into<Value>) -> Self {
        self.min = Some(Some(value.into()));
        self
    }

    pub fn clear_min(mut self) -> Self {
        self.min = Some(None);
        self
    }

    pub fn max(mut self, value: impl Into<Value>) -> Self {
        self.max = Some(Some(value.into()));
        self
    }

    pub fn clear_max(mut self) -> Self {
        self.max = Some(None);
        self
    }

    pub fn accepted_values(mut self, values: Vec<Value>) -> Self {
        self.accepted_values = Some(Some(values));
        self
    }

    pub fn clear_accepted_values(mut self) -> Self {
        self.accepted_values = Some(None);
        self
    }

    /// Attempt to set the value through the attribute path. Always ignored
    /// with a warning; present for contract fidelity and tests.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(Some(value.into()));
        self
    }

    fn merge_into(&self, spec: &mut ParameterSpec) {
        if let Some(default) = &self.default {
            spec.default = default.clone();
        }
        if let Some(min) = &self.min {
            spec.min = min.clone();
        }
        if let Some(max) = &self.max {
            spec.max = max.clone();
        }
        if let Some(accepted) = &self.accepted_values {
            spec.accepted_values = accepted.clone();
        }
    }
}

/// Builds and maintains a named collection of parameters from a schema.
#[derive(Debug, Clone)]
pub struct ParameterManager {
    parameters: BTreeMap<String, Parameter>,
}

impl ParameterManager {
    /// Instantiate every parameter declared in the schema.
    ///
    /// Each kind tag must resolve to a registered parameter variant
    /// ([`ParameterError::Definition`] otherwise); constraint and default
    /// validation errors propagate with the parameter name as context.
    pub fn new(schema: &Schema) -> Result<Self, ParameterError> {
        let mut parameters = BTreeMap::new();
        for (name, spec) in schema {
            let param =
                Parameter::from_spec(name, spec).map_err(|e| e.with_parameter(name))?;
            parameters.insert(name.clone(), param);
        }
        Ok(Self { parameters })
    }

    /// Build a manager from the JSON form of a schema, as embedded in scoring
    /// profiles.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let schema: Schema = serde_json::from_str(text)?;
        Ok(Self::new(&schema)?)
    }

    /// Declared parameter names, in schema order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    /// Borrow a parameter by name.
    pub fn parameter(&self, name: &str) -> Result<&Parameter, ParameterError> {
        self.parameters
            .get(name)
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))
    }

    /// Snapshot of every parameter's current value; unset parameters report
    /// `None`.
    pub fn get_parameters_values(&self) -> BTreeMap<String, Option<Value>> {
        self.parameters
            .iter()
            .map(|(name, param)| (name.clone(), param.value()))
            .collect()
    }

    /// Set one parameter's value in place. The parameter object survives the
    /// assignment; only its value slot changes.
    ///
    /// The underlying validation error is re-raised unchanged in kind, with
    /// the parameter name prefixed into the message.
    pub fn set_parameter_value(
        &mut self,
        name: &str,
        value: Option<Value>,
    ) -> Result<(), ParameterError> {
        let param = self
            .parameters
            .get_mut(name)
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))?;
        param.set_value(value).map_err(|e| e.with_parameter(name))
    }

    /// Apply [`Self::set_parameter_value`] for each entry. Partial coverage of
    /// the declared parameters is allowed here; use
    /// [`Self::check_provided_parameters_values`] beforehand when completeness
    /// matters.
    pub fn set_parameters_values(&mut self, values: &ValueMap) -> Result<(), ParameterError> {
        for (name, value) in values {
            self.set_parameter_value(name, Some(value.clone()))?;
        }
        Ok(())
    }

    /// Check a value map against the declared names: unknown names fail,
    /// omitted declared names produce a non-fatal warning.
    pub fn check_provided_parameters_values(
        &self,
        values: &ValueMap,
    ) -> Result<Vec<ParameterWarning>, ParameterError> {
        let unknown: Vec<&str> = values
            .keys()
            .filter(|name| !self.parameters.contains_key(*name))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(ParameterError::Setting(format!(
                "unknown parameters: {}",
                unknown.join(", ")
            )));
        }

        let missing: Vec<String> = self
            .parameters
            .keys()
            .filter(|name| !values.contains_key(*name))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(vec![])
        } else {
            Ok(vec![ParameterWarning::Incomplete { missing }])
        }
    }

    /// Replace a parameter's constraint schema.
    ///
    /// The update is merged over the parameter's current attributes and a new
    /// parameter of the same kind is constructed from the merged spec; the
    /// old instance is discarded together with its value, so the rebuilt
    /// parameter starts unset unless the merged attributes include a default.
    /// A `value` entry in the update is dropped with a warning rather than
    /// applied or rejected.
    pub fn set_parameter_attributes(
        &mut self,
        name: &str,
        update: &AttributeUpdate,
    ) -> Result<Vec<ParameterWarning>, ParameterError> {
        let current = self
            .parameters
            .get(name)
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))?;

        let mut warnings = Vec::new();
        if update.value.is_some() {
            warnings.push(ParameterWarning::ValueIgnored(name.to_string()));
        }

        let mut merged = current.attributes();
        update.merge_into(&mut merged);

        let rebuilt =
            Parameter::from_spec(name, &merged).map_err(|source| ParameterError::AttributeUpdate {
                name: name.to_string(),
                source: Box::new(source),
            })?;
        self.parameters.insert(name.to_string(), rebuilt);
        Ok(warnings)
    }

    /// Apply [`Self::set_parameter_attributes`] for each entry, collecting the
    /// warnings. Stops at the first failing entry.
    pub fn set_parameters_attributes(
        &mut self,
        updates: &BTreeMap<String, AttributeUpdate>,
    ) -> Result<Vec<ParameterWarning>, ParameterError> {
        let mut warnings = Vec::new();
        for (name, update) in updates {
            warnings.extend(self.set_parameter_attributes(name, update)?);
        }
        Ok(warnings)
    }

    /// Precondition gate: every declared parameter must currently hold a
    /// value. Fails listing the unset names.
    pub fn check_parameters_values_none(&self) -> Result<(), ParameterError> {
        let unset: Vec<&str> = self
            .parameters
            .iter()
            .filter(|(_, param)| !param.is_set())
            .map(|(name, _)| name.as_str())
            .collect();
        if unset.is_empty() {
            Ok(())
        } else {
            Err(ParameterError::ValueNotSet(format!(
                "the following parameters are not set: {}",
                unset.join(", ")
            )))
        }
    }
}
