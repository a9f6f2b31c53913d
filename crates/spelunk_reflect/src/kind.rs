//! Kind classification for reflected values.

use serde::{Deserialize, Serialize};

/// The discoverable kind of a reflected value.
///
/// Traversal only cares about the coarse shape of a value: whether it is a
/// record with named fields, something that contains other values, a
/// pointer-like indirection, or a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Kind {
    // Scalars
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// `f32` / `f64`.
    Float,
    /// `char`.
    Char,
    /// `String`.
    String,

    // Composites
    /// A record with declared fields.
    Record,
    /// A growable sequence (`Vec`, `VecDeque`).
    Sequence,
    /// A fixed-size sequence (`[T; N]`).
    Array,
    /// An associative container (`HashMap`, `BTreeMap`).
    Map,
    /// A polymorphic holder that may be empty ([`Dynamic`](crate::Dynamic)).
    Holder,
    /// A pointer or optional reference (`Option`, `Box`, `Rc<RefCell<_>>`, ...).
    Indirection,

    /// Anything that cannot be introspected further.
    Opaque,
}

impl Kind {
    /// Returns true for the kinds that receive structural descent when
    /// they appear as record members.
    #[inline]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Kind::Record | Kind::Sequence | Kind::Array | Kind::Map | Kind::Holder
        )
    }

    /// Returns true if values of this kind may be null or empty.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Kind::Indirection | Kind::Holder)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Record => "record",
            Kind::Sequence => "sequence",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Holder => "holder",
            Kind::Indirection => "indirection",
            Kind::Opaque => "opaque",
        };
        write!(f, "{}", name)
    }
}
