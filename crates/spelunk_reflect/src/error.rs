//! Reflection error types.

use thiserror::Error;

/// Errors raised while inspecting or mutating a reflected value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The handle does not refer to addressable, writable storage.
    #[error("cannot set value of type `{type_name}`")]
    NotSettable {
        /// Type held by the handle.
        type_name: &'static str,
    },

    /// The held value is not of the requested type.
    #[error("type mismatch: expected {expected}, found `{found}`")]
    TypeMismatch {
        /// What the caller asked for.
        expected: String,
        /// Type actually held by the handle.
        found: &'static str,
    },

    /// A shared pointer was resolved while its target is still borrowed,
    /// which happens with aliasing or cyclic data.
    #[error("value of type `{type_name}` is already borrowed")]
    AlreadyBorrowed {
        /// Type of the shared pointer.
        type_name: &'static str,
    },

    /// A numeric value does not fit in the target type.
    #[error("value {value} is out of range for `{type_name}`")]
    OutOfRange {
        /// The rejected value, rendered.
        value: String,
        /// Target type.
        type_name: &'static str,
    },
}

impl ReflectError {
    /// Creates a not-settable error.
    pub fn not_settable(type_name: &'static str) -> Self {
        Self::NotSettable { type_name }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: &'static str) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found,
        }
    }

    /// Returns true if this is a [`ReflectError::NotSettable`] error.
    pub fn is_not_settable(&self) -> bool {
        matches!(self, Self::NotSettable { .. })
    }
}
