//! # spelunk_derive
//!
//! `#[derive(Record)]` for Spelunk.
//!
//! Use it through the re-export in `spelunk_reflect`:
//!
//! ```rust,ignore
//! use spelunk_reflect::Record;
//!
//! #[derive(Record)]
//! struct Account {
//!     #[tags(spelunk = "trim,lowercase", audit = "min:3")]
//!     email: String,
//!     #[tags(rename = "Age", spelunk = "min:18")]
//!     age: u8,
//! }
//! ```
//!
//! # Field attributes
//!
//! - `#[tags(<tag> = "<annotation>")]` - attach a raw annotation under a tag name
//! - `#[tags(rename = "<name>")]` - override the name reported for the field

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod record;

/// Derives `Reflect` and `Record` for a struct.
#[proc_macro_derive(Record, attributes(tags))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
