//! Callables that produce a target type
//!
//! A [`Callable`] exposes its parameter list to the planner and is invoked
//! by the executor with the resolved [`Arguments`]. [`FnCallable`] wraps a
//! closure so constructors and factories can be registered without a
//! hand-written trait impl.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ExecuteError;
use crate::slot::ParameterSlot;
use crate::target::{Constructible, decode};

/// What sort of callable produces the instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    PrimaryConstructor,
    SecondaryConstructor,
    /// Method on a companion/singleton instance; takes a receiver
    CompanionFactory,
    StaticFactory,
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryConstructor => write!(f, "primary_constructor"),
            Self::SecondaryConstructor => write!(f, "secondary_constructor"),
            Self::CompanionFactory => write!(f, "companion_factory"),
            Self::StaticFactory => write!(f, "static_factory"),
        }
    }
}

/// A resolved argument in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    /// Synthesized owning instance; never looked up by name
    Receiver,
    /// Value taken from the value source
    Value(Value),
}

impl Argument {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Receiver => None,
            Self::Value(v) => Some(v),
        }
    }

    pub fn is_receiver(&self) -> bool {
        matches!(self, Self::Receiver)
    }
}

/// Read-only view of the arguments a plan supplies to a callable
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    entries: &'a [(ParameterSlot, Argument)],
}

impl<'a> Arguments<'a> {
    pub fn new(entries: &'a [(ParameterSlot, Argument)]) -> Self {
        Self { entries }
    }

    /// Raw value supplied for `name`
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(slot, _)| !slot.is_receiver && slot.name == name)
            .and_then(|(_, arg)| arg.value())
    }

    /// Whether the receiver was synthesized for this call
    pub fn has_receiver(&self) -> bool {
        self.entries.iter().any(|(_, arg)| arg.is_receiver())
    }

    /// Decode a required argument
    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, ExecuteError> {
        match self.get(name) {
            Some(v) => decode(name, v),
            None => Err(ExecuteError::MissingArgument { name: name.to_string() }),
        }
    }

    /// Decode an argument, falling back to the callable's own default
    pub fn optional_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T, ExecuteError> {
        crate::target::decode_or(name, self.get(name), default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A constructor-like callable belonging to `T`
pub trait Callable<T>: Send + Sync {
    /// Callable name, for diagnostics
    fn name(&self) -> &str;

    fn kind(&self) -> CallableKind;

    /// Name of the type this callable belongs to
    fn owner(&self) -> &str;

    /// Formal parameters, in declaration order
    fn parameters(&self) -> Vec<ParameterSlot>;

    /// Invoke with the resolved arguments
    fn call(&self, args: &Arguments<'_>) -> Result<T, ExecuteError>;
}

type Body<T> = Box<dyn Fn(&Arguments<'_>) -> Result<T, ExecuteError> + Send + Sync>;

/// A callable backed by a closure
pub struct FnCallable<T> {
    name: String,
    kind: CallableKind,
    owner: String,
    params: Vec<ParameterSlot>,
    body: Body<T>,
}

impl<T: Constructible> FnCallable<T> {
    /// Start declaring a primary constructor
    pub fn constructor(name: impl Into<String>) -> FnCallableBuilder<T> {
        FnCallableBuilder::new(name, CallableKind::PrimaryConstructor)
    }

    /// Start declaring a secondary constructor
    pub fn secondary_constructor(name: impl Into<String>) -> FnCallableBuilder<T> {
        FnCallableBuilder::new(name, CallableKind::SecondaryConstructor)
    }

    /// Start declaring a companion factory; the receiver slot is added first
    pub fn companion_factory(name: impl Into<String>) -> FnCallableBuilder<T> {
        FnCallableBuilder::new(name, CallableKind::CompanionFactory).receiver()
    }

    /// Start declaring a static factory; it still resolves through the
    /// owning instance, so the receiver slot is added first
    pub fn static_factory(name: impl Into<String>) -> FnCallableBuilder<T> {
        FnCallableBuilder::new(name, CallableKind::StaticFactory).receiver()
    }
}

impl<T> fmt::Debug for FnCallable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCallable")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("owner", &self.owner)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<T> Callable<T> for FnCallable<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallableKind {
        self.kind
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn parameters(&self) -> Vec<ParameterSlot> {
        self.params.clone()
    }

    fn call(&self, args: &Arguments<'_>) -> Result<T, ExecuteError> {
        (self.body)(args)
    }
}

/// Declares the parameter list of a [`FnCallable`]
#[derive(Debug, Clone)]
pub struct FnCallableBuilder<T> {
    name: String,
    kind: CallableKind,
    owner: String,
    params: Vec<ParameterSlot>,
    _target: std::marker::PhantomData<fn() -> T>,
}

impl<T: Constructible> FnCallableBuilder<T> {
    fn new(name: impl Into<String>, kind: CallableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            owner: T::type_name().to_string(),
            params: Vec::new(),
            _target: std::marker::PhantomData,
        }
    }

    /// Add a required parameter
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterSlot::required(name));
        self
    }

    /// Add a parameter the callable defaults when omitted
    pub fn param_with_default(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterSlot::defaulted(name));
        self
    }

    /// Add the implicit receiver slot
    pub fn receiver(mut self) -> Self {
        self.params.push(ParameterSlot::receiver());
        self
    }

    /// Override the owning type name
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Finish with the callable body
    pub fn build<F>(self, body: F) -> FnCallable<T>
    where
        F: Fn(&Arguments<'_>) -> Result<T, ExecuteError> + Send + Sync + 'static,
    {
        FnCallable {
            name: self.name,
            kind: self.kind,
            owner: self.owner,
            params: self.params,
            body: Box::new(body),
        }
    }
}
