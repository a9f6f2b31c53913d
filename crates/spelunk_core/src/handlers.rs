//! Ready-made handlers.
//!
//! Every handler here resolves one level of indirection when the value is
//! a non-null pointer, requires the result to be settable, then checks its
//! kind before mutating.

use std::fmt;

use serde::{Deserialize, Serialize};
use spelunk_reflect::{Kind, ReflectError, Value};

use crate::SpelunkError;
use crate::annotation::Directive;
use crate::spelunker::Handler;

/// Resolves a non-null indirection by one level, then applies `apply`.
fn resolve_then<E>(
    mut value: Value<'_>,
    apply: impl FnOnce(Value<'_>) -> Result<(), E>,
) -> Result<(), E>
where
    E: From<ReflectError>,
{
    if value.kind() == Kind::Indirection {
        if let Some(target) = value.elem()? {
            return apply(target);
        }
    }
    apply(value)
}

fn ensure_settable(value: &Value<'_>) -> Result<(), ReflectError> {
    if value.can_set() {
        Ok(())
    } else {
        Err(ReflectError::not_settable(value.type_name()))
    }
}

/// Sets the value to the zero value of its type.
///
/// Fails with a not-settable error when the value, after resolving one
/// level of indirection, cannot be written.
pub fn zeroer<E>(_name: &str, _path: &str, _directive: &str, value: Value<'_>) -> Result<(), E>
where
    E: From<ReflectError>,
{
    resolve_then(value, |mut target| target.set_zero().map_err(E::from))
}

fn rewrite_string(
    value: Value<'_>,
    rewrite: impl FnOnce(&str) -> String,
) -> Result<(), SpelunkError> {
    resolve_then(value, |mut target| {
        ensure_settable(&target)?;
        let updated = match target.str() {
            Some(current) => rewrite(current),
            None => {
                return Err(ReflectError::type_mismatch("a string", target.type_name()).into());
            }
        };
        target.set_string(updated)?;
        Ok(())
    })
}

/// Strips surrounding whitespace from a string.
pub fn trim(_name: &str, _path: &str, _directive: &str, value: Value<'_>) -> Result<(), SpelunkError> {
    rewrite_string(value, |text| text.trim().to_string())
}

pub fn lowercase(
    _name: &str,
    _path: &str,
    _directive: &str,
    value: Value<'_>,
) -> Result<(), SpelunkError> {
    rewrite_string(value, str::to_lowercase)
}

pub fn uppercase(
    _name: &str,
    _path: &str,
    _directive: &str,
    value: Value<'_>,
) -> Result<(), SpelunkError> {
    rewrite_string(value, str::to_uppercase)
}

/// Uppercases the first character of a string. Empty strings are left alone.
pub fn capitalize(
    _name: &str,
    _path: &str,
    _directive: &str,
    value: Value<'_>,
) -> Result<(), SpelunkError> {
    rewrite_string(value, |text| {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    })
}

#[derive(Debug, Clone, Copy)]
enum Limit {
    Min,
    Max,
}

impl Limit {
    /// Returns the bound when `current` lies on the wrong side of it.
    fn clamp<T: Ord>(self, current: T, bound: T) -> Option<T> {
        match self {
            Limit::Min if current < bound => Some(bound),
            Limit::Max if current > bound => Some(bound),
            _ => None,
        }
    }
}

fn clamp_integer(limit: Limit, directive: &str, value: Value<'_>) -> Result<(), SpelunkError> {
    let directive = Directive::new(directive);
    resolve_then(value, |mut target| {
        ensure_settable(&target)?;
        if let Some(current) = target.int() {
            if let Some(bound) = limit.clamp(current, directive.parse_argument()?) {
                target.set_int(bound)?;
            }
        } else if let Some(current) = target.uint() {
            if let Some(bound) = limit.clamp(current, directive.parse_argument()?) {
                target.set_uint(bound)?;
            }
        } else {
            return Err(ReflectError::type_mismatch("an integer", target.type_name()).into());
        }
        Ok(())
    })
}

/// Raises an integer to at least the bound given as `min:<n>`.
pub fn min(_name: &str, _path: &str, directive: &str, value: Value<'_>) -> Result<(), SpelunkError> {
    clamp_integer(Limit::Min, directive, value)
}

/// Lowers an integer to at most the bound given as `max:<n>`.
pub fn max(_name: &str, _path: &str, directive: &str, value: Value<'_>) -> Result<(), SpelunkError> {
    clamp_integer(Limit::Max, directive, value)
}

/// The built-in handlers, nameable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    Zero,
    Trim,
    Lowercase,
    Uppercase,
    Capitalize,
    Min,
    Max,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::Zero,
        Builtin::Trim,
        Builtin::Lowercase,
        Builtin::Uppercase,
        Builtin::Capitalize,
        Builtin::Min,
        Builtin::Max,
    ];

    /// The key this handler is conventionally registered under.
    pub const fn key(self) -> &'static str {
        match self {
            Builtin::Zero => "zero",
            Builtin::Trim => "trim",
            Builtin::Lowercase => "lowercase",
            Builtin::Uppercase => "uppercase",
            Builtin::Capitalize => "capitalize",
            Builtin::Min => "min",
            Builtin::Max => "max",
        }
    }

    /// Runs this handler.
    pub fn apply(
        self,
        name: &str,
        path: &str,
        directive: &str,
        value: Value<'_>,
    ) -> Result<(), SpelunkError> {
        match self {
            Builtin::Zero => zeroer(name, path, directive, value),
            Builtin::Trim => trim(name, path, directive, value),
            Builtin::Lowercase => lowercase(name, path, directive, value),
            Builtin::Uppercase => uppercase(name, path, directive, value),
            Builtin::Capitalize => capitalize(name, path, directive, value),
            Builtin::Min => min(name, path, directive, value),
            Builtin::Max => max(name, path, directive, value),
        }
    }

    /// Boxes this handler for registration on a spelunker with error type `E`.
    pub fn handler<E>(self) -> Handler<E>
    where
        E: From<SpelunkError>,
    {
        Box::new(move |name: &str, path: &str, directive: &str, value: Value<'_>| {
            self.apply(name, path, directive, value).map_err(E::from)
        })
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
