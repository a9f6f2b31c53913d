//! # spelunk_reflect
//!
//! Runtime introspection for Spelunk.
//!
//! Rust has no built-in reflection, so this crate provides the value model
//! the traversal engine walks:
//!
//! - [`Reflect`] - kind classification and structural views for any type
//! - [`Value`] - a transient handle that knows whether it may be written
//! - [`Record`], [`Sequence`], [`Map`], [`Holder`], [`Indirection`] - capability traits
//! - `#[derive(Record)]` - field descriptors and annotations for user structs
//!
//! ## Example
//!
//! ```rust
//! use spelunk_reflect::{Kind, Record, Value};
//!
//! #[derive(Record)]
//! struct User {
//!     #[tags(spelunk = "trim")]
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut user = User { name: "  ada ".into(), age: 36 };
//! let mut value = Value::from(&mut user);
//! assert_eq!(value.kind(), Kind::Record);
//!
//! let fields = value.field_descriptors().unwrap();
//! assert_eq!(fields[0].tag("spelunk"), Some("trim"));
//!
//! value.field(1).unwrap().set_uint(37).unwrap();
//! drop(value);
//! assert_eq!(user.age, 37);
//! ```

extern crate self as spelunk_reflect;

mod dynamic;
mod error;
mod impls;
mod kind;
mod reflect;
mod value;

pub use dynamic::Dynamic;
pub use error::ReflectError;
pub use kind::Kind;
pub use reflect::{
    FieldDescriptor, Holder, Indirection, Map, Record, Reflect, ReflectMut, ReflectRef, Sequence,
};
pub use value::Value;

// The derive shares its name with the trait it implements.
pub use spelunk_derive::Record;
