//! The construction plan
//!
//! A [`ConstructionPlan`] records, per parameter and per member, what the
//! builder decided: supply an argument, assign after construction, report an
//! error, or count a warning. It is immutable once built and can be executed
//! any number of times, from any number of threads.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::callable::{Argument, Callable, CallableKind};
use crate::error::ConstructionError;
use crate::slot::{MemberSlot, ParameterSlot};

/// A deterministic plan for producing a `T`
pub struct ConstructionPlan<T> {
    pub(crate) type_name: String,
    pub(crate) callable: Arc<dyn Callable<T>>,
    pub(crate) with_parameters: Vec<(ParameterSlot, Argument)>,
    pub(crate) defaulted_parameters: Vec<ParameterSlot>,
    pub(crate) then_set_properties: Vec<(MemberSlot, Value)>,
    pub(crate) parameter_errors: Vec<(ParameterSlot, ConstructionError)>,
    pub(crate) property_errors: Vec<(MemberSlot, ConstructionError)>,
    pub(crate) unset_properties: Vec<MemberSlot>,
    pub(crate) nonmatching_provider_entries: BTreeSet<String>,
}

impl<T> ConstructionPlan<T> {
    /// Name of the target type
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the callable the plan invokes
    pub fn callable_name(&self) -> &str {
        self.callable.name()
    }

    pub fn callable_kind(&self) -> CallableKind {
        self.callable.kind()
    }

    /// Arguments supplied to the callable, in parameter order
    pub fn with_parameters(&self) -> &[(ParameterSlot, Argument)] {
        &self.with_parameters
    }

    /// Parameters left to the callable's own defaults
    pub fn defaulted_parameters(&self) -> &[ParameterSlot] {
        &self.defaulted_parameters
    }

    /// Assignments applied after the callable returns, in member order
    pub fn then_set_properties(&self) -> &[(MemberSlot, Value)] {
        &self.then_set_properties
    }

    pub fn parameter_errors(&self) -> &[(ParameterSlot, ConstructionError)] {
        &self.parameter_errors
    }

    pub fn property_errors(&self) -> &[(MemberSlot, ConstructionError)] {
        &self.property_errors
    }

    /// Settable members with no value; each one is a warning
    pub fn unset_properties(&self) -> &[MemberSlot] {
        &self.unset_properties
    }

    /// Value source keys that matched neither a parameter nor a member
    pub fn nonmatching_provider_entries(&self) -> &BTreeSet<String> {
        &self.nonmatching_provider_entries
    }

    pub fn error_count(&self) -> usize {
        self.parameter_errors.len() + self.property_errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.unset_properties.len()
    }

    /// Check if the plan can be executed
    pub fn is_executable(&self) -> bool {
        self.error_count() == 0
    }

    /// Argument supplied for a parameter, by name
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.with_parameters
            .iter()
            .find(|(slot, _)| slot.name == name)
            .map(|(_, arg)| arg)
    }

    /// Value assigned to a member after construction, by name
    pub fn assignment(&self, name: &str) -> Option<&Value> {
        self.then_set_properties
            .iter()
            .find(|(slot, _)| slot.name == name)
            .map(|(_, value)| value)
    }
}

impl<T> Clone for ConstructionPlan<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            callable: Arc::clone(&self.callable),
            with_parameters: self.with_parameters.clone(),
            defaulted_parameters: self.defaulted_parameters.clone(),
            then_set_properties: self.then_set_properties.clone(),
            parameter_errors: self.parameter_errors.clone(),
            property_errors: self.property_errors.clone(),
            unset_properties: self.unset_properties.clone(),
            nonmatching_provider_entries: self.nonmatching_provider_entries.clone(),
        }
    }
}

impl<T> fmt::Debug for ConstructionPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionPlan")
            .field("type_name", &self.type_name)
            .field("callable", &self.callable.name())
            .field("with_parameters", &self.with_parameters)
            .field("then_set_properties", &self.then_set_properties)
            .field("parameter_errors", &self.parameter_errors)
            .field("property_errors", &self.property_errors)
            .field("unset_properties", &self.unset_properties)
            .field("nonmatching_provider_entries", &self.nonmatching_provider_entries)
            .finish()
    }
}
