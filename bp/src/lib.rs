//! binderplan - construction planning for named values
//!
//! Given a target type, one already-chosen constructor or factory, and a
//! name-keyed value source, the planner decides for every name whether it
//! becomes a call argument, a post-construction assignment, an error, a
//! warning, or an unused entry. The resulting [`ConstructionPlan`] can be
//! inspected before anything is built, then executed.
//!
//! # Example
//!
//! ```ignore
//! use binderplan::{ConstructionPlan, FnCallable, MapValueProvider, constructible};
//!
//! struct Account { id: u64, owner: String, note: Option<String> }
//!
//! constructible! {
//!     Account {
//!         val id: u64,
//!         var owner: String,
//!         var note: Option<String>,
//!     }
//! }
//!
//! let ctor = FnCallable::<Account>::constructor("new")
//!     .param("id")
//!     .build(|args| Ok(Account { id: args.required("id")?, owner: String::new(), note: None }));
//!
//! let values = MapValueProvider::new().with("id", 7).with("owner", "ada");
//! let plan = ConstructionPlan::build(ctor, &values)?;
//! assert_eq!(plan.warning_count(), 1); // note left unset
//! let account = plan.execute()?;
//! ```

mod builder;
pub mod callable;
pub mod config;
pub mod error;
mod executor;
pub mod plan;
pub mod provider;
pub mod slot;
pub mod summary;
pub mod target;

pub use callable::{Argument, Arguments, Callable, CallableKind, FnCallable, FnCallableBuilder};
pub use config::{Config, PlanPolicy, PolicyViolation};
pub use error::{ConstructionError, ExecuteError, PlanError};
pub use plan::ConstructionPlan;
pub use provider::{MapValueProvider, ValueProvider};
pub use slot::{MemberSlot, ParameterSlot};
pub use summary::{PlanDiagnostic, PlanSummary};
pub use target::{Constructible, decode, decode_or};

// Dynamic value type carried from sources to targets
pub use serde_json::Value;
