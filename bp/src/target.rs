//! Target-type introspection
//!
//! A type that can be planned for implements [`Constructible`]: it reports
//! its declared members and accepts post-construction assignments by name.
//! The [`constructible!`](crate::constructible) macro generates both from a
//! field list.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ExecuteError;
use crate::slot::MemberSlot;

/// A type whose shape the planner can see
pub trait Constructible: Sized + 'static {
    /// Name used when matching callables to their owner
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declared members, in declaration order
    fn members() -> Vec<MemberSlot>;

    /// Assign a value to a settable member of a constructed instance
    fn assign(&mut self, name: &str, value: &Value) -> Result<(), ExecuteError>;
}

/// Decode a source value into a field or argument type
pub fn decode<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T, ExecuteError> {
    <T as Deserialize>::deserialize(value).map_err(|source| ExecuteError::InvalidValue {
        name: name.to_string(),
        source,
    })
}

/// Deserialize helper for optional arguments that default when absent
pub fn decode_or<T: DeserializeOwned>(name: &str, value: Option<&Value>, default: T) -> Result<T, ExecuteError> {
    match value {
        Some(v) => decode(name, v),
        None => Ok(default),
    }
}

/// Implement [`Constructible`] for a struct from its member list.
///
/// `var` members are settable after construction, `val` members are not.
/// Append `= default` to record a declaration-site default.
///
/// ```ignore
/// struct Account { id: u64, owner: String, note: Option<String> }
///
/// binderplan::constructible! {
///     Account {
///         val id: u64,
///         var owner: String,
///         var note: Option<String> = default,
///     }
/// }
/// ```
#[macro_export]
macro_rules! constructible {
    (@slot var $field:ident) => {
        $crate::MemberSlot::settable(stringify!($field))
    };
    (@slot var $field:ident $dflt:ident) => {
        $crate::MemberSlot::settable(stringify!($field)).with_default()
    };
    (@slot val $field:ident) => {
        $crate::MemberSlot::fixed(stringify!($field))
    };
    (@slot val $field:ident $dflt:ident) => {
        $crate::MemberSlot::fixed(stringify!($field)).with_default()
    };

    (@assign $this:ident, $name:ident, $value:ident, var, $field:ident, $fty:ty) => {{
        $this.$field = $crate::decode::<$fty>($name, $value)?;
        Ok(())
    }};
    (@assign $this:ident, $name:ident, $value:ident, val, $field:ident, $fty:ty) => {{
        let _ = $value;
        Err($crate::ExecuteError::NotSettable { name: $name.to_string() })
    }};

    ($ty:ident { $( $kind:ident $field:ident : $fty:ty $(= $dflt:ident)? ),* $(,)? }) => {
        impl $crate::Constructible for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn members() -> Vec<$crate::MemberSlot> {
                vec![ $( $crate::constructible!(@slot $kind $field $($dflt)?) ),* ]
            }

            fn assign(
                &mut self,
                name: &str,
                value: &$crate::Value,
            ) -> ::std::result::Result<(), $crate::ExecuteError> {
                $(
                    if name == stringify!($field) {
                        return $crate::constructible!(@assign self, name, value, $kind, $field, $fty);
                    }
                )*
                Err($crate::ExecuteError::UnknownMember { name: name.to_string() })
            }
        }
    };
}
