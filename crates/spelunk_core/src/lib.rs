//! # spelunk_core
//!
//! Annotation-driven traversal engine for Spelunk.
//!
//! This crate provides:
//! - The [`Spelunker`] engine, which walks nested values depth-first
//! - Annotation parsing and field path construction
//! - Ready-made handlers (`zero`, `trim`, `min`, ...)
//! - JSON configuration binding directive keys to built-in handlers
//!
//! ## Example
//!
//! ```rust
//! use spelunk_core::{Spelunker, SpelunkerConfig};
//! use spelunk_reflect::Record;
//!
//! #[derive(Record)]
//! struct Person {
//!     #[tags(spelunk = "trim,capitalize")]
//!     name: String,
//!     #[tags(spelunk = "min:18")]
//!     age: u32,
//! }
//!
//! let config = SpelunkerConfig::with_builtins();
//! let spelunker: Spelunker = Spelunker::from_config(&config);
//!
//! let mut person = Person { name: "   gopher  ".into(), age: 3 };
//! spelunker.spelunk(&mut person)?;
//!
//! assert_eq!(person.name, "Gopher");
//! assert_eq!(person.age, 18);
//! # Ok::<(), spelunk_core::SpelunkError>(())
//! ```

pub mod annotation;
mod config;
mod error;
pub mod handlers;
pub mod path;
mod spelunker;

pub use config::SpelunkerConfig;
pub use error::SpelunkError;
pub use handlers::{Builtin, zeroer};
pub use spelunker::{DEFAULT_TAG, Handler, Spelunker};

// Re-export the value model so handlers only need this crate.
pub use spelunk_reflect::{Dynamic, Kind, ReflectError, Value};
