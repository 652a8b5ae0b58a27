//! Parameter and member slots
//!
//! Slots are the planner's view of a callable's signature and a type's
//! declared shape. They carry names and flags only; values live in the plan.

use serde::{Deserialize, Serialize};

/// One formal parameter of a callable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterSlot {
    /// Parameter name, unique within the callable
    pub name: String,

    /// The callable supplies its own value when this argument is omitted
    pub has_default: bool,

    /// Implicit leading instance argument (companion/static factories)
    pub is_receiver: bool,
}

impl ParameterSlot {
    /// A parameter that must be supplied
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: false,
            is_receiver: false,
        }
    }

    /// A parameter the callable can default
    pub fn defaulted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: true,
            is_receiver: false,
        }
    }

    /// The implicit receiver of a factory call
    pub fn receiver() -> Self {
        Self {
            name: RECEIVER_NAME.to_string(),
            has_default: false,
            is_receiver: true,
        }
    }
}

/// Name given to receiver slots. It never collides with a value source key
/// because receivers are not looked up.
pub const RECEIVER_NAME: &str = "<receiver>";

/// One declared data member of a target type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSlot {
    /// Member name, unique within the type
    pub name: String,

    /// Can be assigned after construction
    pub settable: bool,

    /// A default value is known at the declaration site
    pub has_default: bool,
}

impl MemberSlot {
    /// A member assignable after construction (`var`)
    pub fn settable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settable: true,
            has_default: false,
        }
    }

    /// A member fixed at construction time (`val`)
    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settable: false,
            has_default: false,
        }
    }

    /// Mark the member as having a declaration-site default
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}
