//! Parameterized strategy composition
//!
//! A [`ParameterizedStrategy`] binds a [`ParameterManager`] to a utility
//! function and partitions the declared parameters into two disjoint roles:
//! coefficients, fixed at configuration time, and inputs, supplied on every
//! call. The [`compute`](ParameterizedStrategy::compute) entry point
//! validates the supplied inputs, gates on all coefficients being set, and
//! invokes the utility function with the coefficient values partially
//! applied.
//!
//! The parameter schema is declared explicitly alongside the function rather
//! than recovered from its signature, so the strategy-definition contract is
//! visible at the call site and checkable without reflection.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{
    AttributeUpdate, ParameterError, ParameterManager, ParameterWarning, Schema, Value, ValueMap,
};
use crate::uncertain::UFloat;
use std::collections::BTreeMap;

/// Named arguments handed to a utility function: the strategy's coefficient
/// values merged with the per-call inputs.
#[derive(Debug, Clone)]
pub struct ArgValues {
    values: BTreeMap<String, Value>,
}

impl ArgValues {
    pub(crate) fn new(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Borrow an argument by name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| ParameterError::NotFound(name.to_string()).into())
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        self.get(name)?.as_float().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a float")),
            )
        })
    }

    pub fn integer(&self, name: &str) -> Result<i64> {
        self.get(name)?.as_int().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not an int")),
            )
        })
    }

    pub fn boolean(&self, name: &str) -> Result<bool> {
        self.get(name)?.as_bool().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a bool")),
            )
        })
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        self.get(name)?.as_str().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a str")),
            )
        })
    }

    pub fn ufloat(&self, name: &str) -> Result<UFloat> {
        self.get(name)?.as_ufloat().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a ufloat")),
            )
        })
    }

    pub fn list(&self, name: &str) -> Result<&[Value]> {
        self.get(name)?.as_list().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a sequence")),
            )
        })
    }

    pub fn map(&self, name: &str) -> Result<&BTreeMap<String, Value>> {
        self.get(name)?.as_map().ok_or_else(|| {
            ScoreKitError::Parameter(
                ParameterError::InvalidType(format!("argument '{name}' is not a mapping")),
            )
        })
    }
}

/// A utility function: receives the merged named arguments and returns the
/// computed result. Range and shape guarantees on the result are the
/// formula's own responsibility.
pub type UtilityFn = fn(&ArgValues) -> Result<Value>;

/// A computation bound to a validated, role-partitioned parameter set.
///
/// # Lifecycle
///
/// Construction fixes the name partition, builds the schema, and leaves all
/// parameters unset. Coefficients are then set zero or more times; once all
/// of them hold values, [`compute`](Self::compute) may be called repeatedly
/// with varying inputs. Every construction builds a fresh
/// [`ParameterManager`], so no two strategy instances share parameter state.
#[derive(Debug, Clone)]
pub struct ParameterizedStrategy {
    manager: ParameterManager,
    coefficient_names: Vec<String>,
    input_names: Vec<String>,
    utility: UtilityFn,
}

impl ParameterizedStrategy {
    /// Create a strategy from a schema, a coefficient/input name partition,
    /// and a utility function.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::Overlap`] when a name appears in both partitions;
    /// - [`ParameterError::Definition`] when the partition does not exactly
    ///   cover the schema, or a kind tag is unregistered;
    /// - any parameter validation error raised while building the schema.
    pub fn new(
        schema: &Schema,
        coefficient_names: &[&str],
        input_names: &[&str],
        utility: UtilityFn,
    ) -> std::result::Result<Self, ParameterError> {
        let overlap: Vec<&str> = coefficient_names
            .iter()
            .filter(|name| input_names.contains(*name))
            .copied()
            .collect();
        if !overlap.is_empty() {
            return Err(ParameterError::Overlap(overlap.join(", ")));
        }

        let declared: Vec<&str> = coefficient_names
            .iter()
            .chain(input_names.iter())
            .copied()
            .collect();
        let undeclared: Vec<&str> = schema
            .keys()
            .map(String::as_str)
            .filter(|name| !declared.contains(name))
            .collect();
        if !undeclared.is_empty() {
            return Err(ParameterError::Definition(format!(
                "parameters required by the utility function are missing from the \
                 coefficient/input declaration: {}",
                undeclared.join(", ")
            )));
        }
        let unknown: Vec<&str> = declared
            .iter()
            .filter(|name| !schema.contains_key(**name))
            .copied()
            .collect();
        if !unknown.is_empty() {
            return Err(ParameterError::Definition(format!(
                "declared parameters not found in the utility function schema: {}",
                unknown.join(", ")
            )));
        }

        Ok(Self {
            manager: ParameterManager::new(schema)?,
            coefficient_names: coefficient_names.iter().map(|s| s.to_string()).collect(),
            input_names: input_names.iter().map(|s| s.to_string()).collect(),
            utility,
        })
    }

    pub fn coefficient_parameters_names(&self) -> &[String] {
        &self.coefficient_names
    }

    pub fn input_parameters_names(&self) -> &[String] {
        &self.input_names
    }

    /// The underlying parameter manager.
    pub fn parameter_manager(&self) -> &ParameterManager {
        &self.manager
    }

    /// Snapshot of every parameter's value, coefficients and inputs alike.
    pub fn get_parameters_values(&self) -> BTreeMap<String, Option<Value>> {
        self.manager.get_parameters_values()
    }

    /// Snapshot of the coefficient values only.
    pub fn get_coefficient_parameters_values(&self) -> BTreeMap<String, Option<Value>> {
        let all = self.manager.get_parameters_values();
        self.coefficient_names
            .iter()
            .map(|name| (name.clone(), all.get(name).cloned().flatten()))
            .collect()
    }

    // Unknown names in a coefficient edit fail; coefficients left out of the
    // edit produce a non-fatal warning.
    fn check_coefficient_editing(
        &self,
        names: &[&String],
    ) -> std::result::Result<Vec<ParameterWarning>, ParameterError> {
        let unknown: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !self.coefficient_names.contains(*name))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(ParameterError::Setting(format!(
                "unknown coefficient parameters: {}",
                unknown.join(", ")
            )));
        }

        let missing: Vec<String> = self
            .coefficient_names
            .iter()
            .filter(|name| !names.contains(name))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(vec![])
        } else {
            Ok(vec![ParameterWarning::Incomplete { missing }])
        }
    }

    /// Set values for coefficient parameters.
    ///
    /// A strategy with zero declared coefficients turns any attempt into a
    /// warning no-op. Covering only part of the coefficient set succeeds with
    /// an [`ParameterWarning::Incomplete`] warning.
    pub fn set_coefficient_parameters_values(
        &mut self,
        values: &ValueMap,
    ) -> std::result::Result<Vec<ParameterWarning>, ParameterError> {
        if self.coefficient_names.is_empty() {
            return Ok(vec![ParameterWarning::NoCoefficients]);
        }
        let warnings = self.check_coefficient_editing(&values.keys().collect::<Vec<_>>())?;
        for (name, value) in values {
            self.manager
                .set_parameter_value(name, Some(value.clone()))?;
        }
        Ok(warnings)
    }

    /// Replace constraint attributes for coefficient parameters, with the
    /// same partition restrictions as the value setter.
    pub fn set_coefficient_parameters_attributes(
        &mut self,
        updates: &BTreeMap<String, AttributeUpdate>,
    ) -> std::result::Result<Vec<ParameterWarning>, ParameterError> {
        if self.coefficient_names.is_empty() {
            return Ok(vec![ParameterWarning::NoCoefficients]);
        }
        let mut warnings = self.check_coefficient_editing(&updates.keys().collect::<Vec<_>>())?;
        for (name, update) in updates {
            warnings.extend(self.manager.set_parameter_attributes(name, update)?);
        }
        Ok(warnings)
    }

    /// Gate: every coefficient parameter must hold a value.
    pub fn check_coefficient_parameters_values(&self) -> std::result::Result<(), ParameterError> {
        let unset: Vec<&str> = self
            .coefficient_names
            .iter()
            .filter(|name| {
                self.manager
                    .parameter(name)
                    .map(|param| !param.is_set())
                    .unwrap_or(true)
            })
            .map(String::as_str)
            .collect();
        if unset.is_empty() {
            Ok(())
        } else {
            Err(ParameterError::ValueNotSet(format!(
                "all coefficient parameters must be set before computation; unset: {}",
                unset.join(", ")
            )))
        }
    }

    /// The current coefficient values, after passing the set-ness gate.
    pub fn coefficient_values(&self) -> std::result::Result<BTreeMap<String, Value>, ParameterError> {
        self.check_coefficient_parameters_values()?;
        Ok(self
            .get_coefficient_parameters_values()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect())
    }

    /// Invoke the utility function with the bound coefficients plus the
    /// supplied inputs.
    ///
    /// Inputs are validated for kind against their declared parameters
    /// (never for being "pre-set": they exist only for the duration of the
    /// call); unknown input names fail with a setting error; unset
    /// coefficients fail with [`ParameterError::ValueNotSet`]. The utility
    /// function's result is returned unchanged.
    pub fn compute(&self, inputs: &ValueMap) -> Result<Value> {
        for (name, value) in inputs {
            if !self.input_names.contains(name) {
                return Err(ParameterError::Setting(format!(
                    "unknown input parameters: {name}"
                ))
                .into());
            }
            let param = self.manager.parameter(name)?;
            param
                .check_type(value)
                .map_err(|e| e.with_parameter(name))?;
        }

        let mut args = self.coefficient_values()?;
        for (name, value) in inputs {
            args.insert(name.clone(), value.clone());
        }
        (self.utility)(&ArgValues::new(args))
    }
}
