//! The `Reflect` trait and the capability traits for composite values.
//!
//! Every type that can be walked implements [`Reflect`]. Composite types
//! additionally implement exactly one capability trait, exposed through
//! [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`]:
//!
//! - [`Record`] - declared fields with static [`FieldDescriptor`]s
//! - [`Sequence`] - indexed elements (`Vec`, `VecDeque`, arrays)
//! - [`Map`] - keyed entries, read-only
//! - [`Holder`] - a polymorphic value that may be empty, read-only
//! - [`Indirection`] - a pointer that resolves to another [`Value`]

use std::any::Any;

use crate::{Kind, ReflectError, Value};

/// A value whose shape can be discovered at runtime.
///
/// Most implementations come from `#[derive(Record)]` or the built-in
/// impls for standard library types.
pub trait Reflect: Any {
    /// Returns the kind of this value.
    fn kind(&self) -> Kind;

    /// Returns the fully qualified type name of this value.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns this value as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns this value as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns a read-only view of this value's structure.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable view of this value's structure.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Resets this value to the zero value of its type.
    ///
    /// Fails only when a shared pointer's target is already borrowed.
    fn set_zero(&mut self) -> Result<(), ReflectError>;
}

/// Read-only structural view returned by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Record(&'a dyn Record),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn Map),
    Holder(&'a dyn Holder),
    Indirection(&'a dyn Indirection),
    /// No members.
    Leaf,
}

/// Mutable structural view returned by [`Reflect::reflect_mut`].
///
/// Maps and holders report [`ReflectMut::Leaf`]: their contents are never
/// handed out as addressable storage.
pub enum ReflectMut<'a> {
    Record(&'a mut dyn Record),
    Sequence(&'a mut dyn Sequence),
    Indirection(&'a mut dyn Indirection),
    /// No addressable members.
    Leaf,
}

/// Static metadata for one field of a record.
///
/// Derived from the type definition, never from an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: &'static str,
    /// Raw annotations keyed by tag name.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    #[inline]
    pub const fn new(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, tags }
    }

    /// Returns the raw annotation attached under `tag`, if any.
    pub fn tag(&self, tag: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, value)| *value)
    }
}

/// A value with declared fields.
pub trait Record: Reflect {
    /// Returns the descriptors of all fields in declaration order.
    fn field_descriptors(&self) -> &'static [FieldDescriptor];

    /// Returns the field at `index` (declaration order).
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// An ordered collection of elements addressed by index.
pub trait Sequence: Reflect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the element at `index` mutably.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// An associative container.
///
/// Entries are only exposed read-only; a [`Value`] built from one is never
/// settable. Store shared pointers as map values to mutate through a map.
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every entry with its key rendered through `Display`.
    ///
    /// The order is whatever the underlying container iterates in.
    fn entries(&self) -> Vec<(String, &dyn Reflect)>;
}

/// A polymorphic holder that may be empty.
pub trait Holder: Reflect {
    /// Returns the held value, or `None` when empty.
    fn held(&self) -> Option<&dyn Reflect>;
}

/// A pointer-like value.
pub trait Indirection: Reflect {
    /// Returns true if there is nothing to resolve to.
    fn is_null(&self) -> bool;

    /// Resolves through a shared borrow.
    ///
    /// Owned pointers yield a read-only handle; shared pointers with
    /// interior mutability yield a settable one.
    fn target(&self) -> Result<Option<Value<'_>>, ReflectError>;

    /// Resolves through an exclusive borrow, always yielding a settable handle.
    fn target_mut(&mut self) -> Result<Option<Value<'_>>, ReflectError>;
}
