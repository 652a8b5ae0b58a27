//! Plan building
//!
//! Reconciles a callable's parameter list, the target's declared members and
//! a value source into a [`ConstructionPlan`]. Parameters are resolved first;
//! a member whose name was already handled as a parameter is skipped, so no
//! name is ever planned twice.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::callable::{Argument, Callable};
use crate::error::{ConstructionError, PlanError};
use crate::plan::ConstructionPlan;
use crate::provider::ValueProvider;
use crate::slot::{MemberSlot, ParameterSlot};
use crate::target::Constructible;

impl<T: Constructible> ConstructionPlan<T> {
    /// Build a plan for invoking `callable` with values from `provider`
    pub fn build<C, P>(callable: C, provider: &P) -> Result<Self, PlanError>
    where
        C: Callable<T> + 'static,
        P: ValueProvider + ?Sized,
    {
        Self::build_shared(Arc::new(callable), provider)
    }

    /// Build a plan around a callable shared with other plans
    pub fn build_shared<P>(callable: Arc<dyn Callable<T>>, provider: &P) -> Result<Self, PlanError>
    where
        P: ValueProvider + ?Sized,
    {
        let type_name = T::type_name();
        debug!(type_name, callable = callable.name(), "ConstructionPlan::build: called");

        if callable.owner() != type_name {
            return Err(PlanError::ForeignCallable {
                callable: callable.name().to_string(),
                owner: callable.owner().to_string(),
                target: type_name.to_string(),
            });
        }

        let parameters = callable.parameters();
        validate_parameters(callable.name(), &parameters)?;
        let members = T::members();
        validate_members(&members)?;

        let mut consumed: BTreeSet<String> = BTreeSet::new();
        let mut parameter_names: HashSet<&str> = HashSet::new();
        let mut with_parameters = Vec::new();
        let mut defaulted_parameters = Vec::new();
        let mut parameter_errors = Vec::new();

        for slot in &parameters {
            if slot.is_receiver {
                debug!("ConstructionPlan::build: synthesizing receiver");
                with_parameters.push((slot.clone(), Argument::Receiver));
                continue;
            }
            parameter_names.insert(slot.name.as_str());

            match provider.get(&slot.name) {
                Some(value) => {
                    debug!(param = %slot.name, "ConstructionPlan::build: parameter from source");
                    consumed.insert(slot.name.clone());
                    with_parameters.push((slot.clone(), Argument::Value(value)));
                }
                None if slot.has_default => {
                    debug!(param = %slot.name, "ConstructionPlan::build: parameter left to default");
                    defaulted_parameters.push(slot.clone());
                }
                None => {
                    debug!(param = %slot.name, "ConstructionPlan::build: required parameter missing");
                    parameter_errors.push((slot.clone(), ConstructionError::MissingRequiredParameter));
                }
            }
        }

        let mut then_set_properties = Vec::new();
        let mut property_errors = Vec::new();
        let mut unset_properties = Vec::new();

        for member in members {
            if parameter_names.contains(member.name.as_str()) {
                continue;
            }

            match provider.get(&member.name) {
                Some(value) if member.settable => {
                    debug!(member = %member.name, "ConstructionPlan::build: member set after construction");
                    consumed.insert(member.name.clone());
                    then_set_properties.push((member, value));
                }
                Some(_) => {
                    debug!(member = %member.name, "ConstructionPlan::build: value for non-settable member");
                    consumed.insert(member.name.clone());
                    property_errors.push((member, ConstructionError::NonSettableProperty));
                }
                None if member.settable => {
                    debug!(member = %member.name, "ConstructionPlan::build: settable member left unset");
                    unset_properties.push(member);
                }
                // Fixed member with no value keeps whatever the callable gives it
                None => {}
            }
        }

        let nonmatching_provider_entries: BTreeSet<String> =
            provider.keys().difference(&consumed).cloned().collect();

        let plan = Self {
            type_name: type_name.to_string(),
            callable,
            with_parameters,
            defaulted_parameters,
            then_set_properties,
            parameter_errors,
            property_errors,
            unset_properties,
            nonmatching_provider_entries,
        };

        debug!(
            type_name,
            errors = plan.error_count(),
            warnings = plan.warning_count(),
            arguments = plan.with_parameters.len(),
            assignments = plan.then_set_properties.len(),
            unused = plan.nonmatching_provider_entries.len(),
            "ConstructionPlan::build: done"
        );
        Ok(plan)
    }
}

fn validate_parameters(callable: &str, parameters: &[ParameterSlot]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for (position, slot) in parameters.iter().enumerate() {
        if slot.is_receiver {
            if position != 0 {
                return Err(PlanError::MisplacedReceiver {
                    callable: callable.to_string(),
                    position,
                });
            }
            continue;
        }
        if !seen.insert(slot.name.as_str()) {
            return Err(PlanError::DuplicateParameter {
                name: slot.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_members(members: &[MemberSlot]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for member in members {
        if !seen.insert(member.name.as_str()) {
            return Err(PlanError::DuplicateMember {
                name: member.name.clone(),
            });
        }
    }
    Ok(())
}
