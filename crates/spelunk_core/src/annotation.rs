//! Annotation parsing.
//!
//! A raw annotation such as `"trim, min:3"` is split on
//! [`DIRECTIVE_SEPARATOR`] into directives. Each directive is trimmed, and its
//! key is the text before the first [`ARGUMENT_SEPARATOR`]. Whatever follows
//! is left for the handler to interpret.
//!
//! An empty annotation still yields one directive with an empty key, so every
//! visited field gets at least one dispatch attempt.

use std::fmt::Display;
use std::str::{FromStr, Split};

use crate::SpelunkError;

/// Separates directives within one annotation.
pub const DIRECTIVE_SEPARATOR: char = ',';

/// Separates a directive's key from its argument.
pub const ARGUMENT_SEPARATOR: char = ':';

/// Splits a raw annotation into directives, left to right.
pub fn parse(raw: &str) -> Directives<'_> {
    Directives {
        pieces: raw.split(DIRECTIVE_SEPARATOR),
    }
}

/// Iterator returned by [`parse`].
#[derive(Debug, Clone)]
pub struct Directives<'a> {
    pieces: Split<'a, char>,
}

impl<'a> Iterator for Directives<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pieces.next().map(Directive::new)
    }
}

/// One parsed directive, borrowing from the raw annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    text: &'a str,
}

impl<'a> Directive<'a> {
    /// Creates a directive from one piece of an annotation; surrounding
    /// whitespace is trimmed.
    pub fn new(piece: &'a str) -> Self {
        Self { text: piece.trim() }
    }

    /// Full directive text, argument included. This is what handlers receive.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Handler key.
    pub fn key(&self) -> &'a str {
        self.text
            .split_once(ARGUMENT_SEPARATOR)
            .map_or(self.text, |(key, _)| key)
    }

    /// Raw argument payload, if the directive has one.
    pub fn argument(&self) -> Option<&'a str> {
        self.text
            .split_once(ARGUMENT_SEPARATOR)
            .map(|(_, argument)| argument)
    }

    /// Parses the argument payload.
    ///
    /// A missing or malformed argument is reported as
    /// [`SpelunkError::InvalidArgument`].
    pub fn parse_argument<T>(&self) -> Result<T, SpelunkError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let argument = self
            .argument()
            .ok_or_else(|| SpelunkError::invalid_argument(self.text, "missing argument"))?;
        argument
            .trim()
            .parse()
            .map_err(|e: T::Err| SpelunkError::invalid_argument(self.text, e.to_string()))
    }
}

impl Display for Directive<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text)
    }
}
