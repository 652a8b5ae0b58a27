//! Error types for planning and execution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single parameter or member could not be planned.
///
/// These are data, not failures: they are recorded on the plan and make it
/// non-executable, but `build` still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstructionError {
    /// A value was supplied for a member that cannot be assigned after construction
    NonSettableProperty,
    /// A parameter without a default had no value
    MissingRequiredParameter,
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonSettableProperty => write!(f, "NON_SETTABLE_PROPERTY"),
            Self::MissingRequiredParameter => write!(f, "MISSING_REQUIRED_PARAMETER"),
        }
    }
}

impl std::str::FromStr for ConstructionError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NON_SETTABLE_PROPERTY" => Ok(Self::NonSettableProperty),
            "MISSING_REQUIRED_PARAMETER" => Ok(Self::MissingRequiredParameter),
            _ => Err(format!("Unknown construction error: {}", s)),
        }
    }
}

/// Malformed inputs to the plan builder
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Callable {callable} belongs to {owner}, not {target}")]
    ForeignCallable {
        callable: String,
        owner: String,
        target: String,
    },

    #[error("Parameter {name} declared more than once")]
    DuplicateParameter { name: String },

    #[error("Member {name} declared more than once")]
    DuplicateMember { name: String },

    #[error("Callable {callable} has a receiver at position {position}, expected a single leading receiver")]
    MisplacedReceiver { callable: String, position: usize },
}

/// Failures while executing a plan
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Cannot execute a plan with {error_count} error(s)")]
    InvalidPlan { error_count: usize },

    #[error("Required argument {name} was not supplied")]
    MissingArgument { name: String },

    #[error("Value for {name} has the wrong shape: {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Member {name} cannot be assigned after construction")]
    NotSettable { name: String },

    #[error("Unknown member: {name}")]
    UnknownMember { name: String },

    #[error("Callable failed: {0}")]
    Callable(String),
}

impl ExecuteError {
    /// Check if the plan itself was rejected before anything ran
    pub fn is_invalid_plan(&self) -> bool {
        matches!(self, ExecuteError::InvalidPlan { .. })
    }
}
