//! Transient handles to reflected values.
//!
//! A [`Value`] never owns data. It borrows a location for as long as the
//! traversal that produced it, and remembers whether that location may be
//! written to.
//!
//! # Settability
//!
//! - built from `&T`: read-only
//! - built from `&mut T`: settable
//! - resolved through `Rc<RefCell<T>>` or `Arc<Mutex<T>>`: settable, even
//!   when the pointer itself was reached through a read-only handle
//! - map entries and holder contents: always read-only
//!
//! Owned children (record fields, sequence elements, `Option`/`Box`
//! targets) inherit settability from their parent.

use std::any::Any;
use std::fmt;
use std::ops::DerefMut;

use crate::{FieldDescriptor, Kind, Reflect, ReflectError, ReflectMut, ReflectRef};

macro_rules! read_as {
    ($any:expr, $target:ty, [$($ty:ty),+]) => {{
        let any: &dyn Any = $any;
        None::<$target>$(.or_else(|| {
            any.downcast_ref::<$ty>()
                .and_then(|value| <$target>::try_from(*value).ok())
        }))+
    }};
}

macro_rules! write_as {
    ($any:expr, $value:expr, [$($ty:ty),+]) => {{
        let any: &mut dyn Any = $any;
        let value = $value;
        $(
            if let Some(slot) = any.downcast_mut::<$ty>() {
                return match <$ty>::try_from(value) {
                    Ok(converted) => {
                        *slot = converted;
                        Ok(())
                    }
                    Err(_) => Err(ReflectError::OutOfRange {
                        value: value.to_string(),
                        type_name: std::any::type_name::<$ty>(),
                    }),
                };
            }
        )+
    }};
}

/// A handle to a reflected value.
pub struct Value<'a> {
    repr: Repr<'a>,
}

enum Repr<'a> {
    Shared(&'a dyn Reflect),
    Exclusive(&'a mut dyn Reflect),
    Guarded(Box<dyn DerefMut<Target = dyn Reflect + 'static> + 'a>),
}

enum Access<'b> {
    Read(&'b dyn Reflect),
    Write(&'b mut dyn Reflect),
}

impl<'a> Value<'a> {
    /// Creates a read-only handle.
    pub fn shared(value: &'a dyn Reflect) -> Self {
        Self {
            repr: Repr::Shared(value),
        }
    }

    /// Creates a settable handle.
    pub fn exclusive(value: &'a mut dyn Reflect) -> Self {
        Self {
            repr: Repr::Exclusive(value),
        }
    }

    /// Creates a settable handle that keeps a borrow guard alive.
    pub fn guarded<G>(guard: G) -> Self
    where
        G: DerefMut<Target = dyn Reflect + 'static> + 'a,
    {
        Self {
            repr: Repr::Guarded(Box::new(guard)),
        }
    }

    /// Returns the referenced value.
    pub fn get(&self) -> &dyn Reflect {
        match &self.repr {
            Repr::Shared(value) => *value,
            Repr::Exclusive(value) => &**value,
            Repr::Guarded(guard) => &***guard,
        }
    }

    fn access(&mut self) -> Access<'_> {
        match &mut self.repr {
            Repr::Shared(value) => Access::Read(*value),
            Repr::Exclusive(value) => Access::Write(&mut **value),
            Repr::Guarded(guard) => Access::Write(&mut ***guard),
        }
    }

    /// Returns the referenced value mutably, or a not-settable error.
    pub fn get_mut(&mut self) -> Result<&mut dyn Reflect, ReflectError> {
        let type_name = self.type_name();
        match self.access() {
            Access::Write(value) => Ok(value),
            Access::Read(_) => Err(ReflectError::not_settable(type_name)),
        }
    }

    /// Returns a shorter-lived handle to the same location.
    pub fn reborrow(&mut self) -> Value<'_> {
        match self.access() {
            Access::Read(value) => Value::shared(value),
            Access::Write(value) => Value::exclusive(value),
        }
    }

    /// Returns true if the handle refers to writable storage.
    pub fn can_set(&self) -> bool {
        !matches!(self.repr, Repr::Shared(_))
    }

    pub fn kind(&self) -> Kind {
        self.get().kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.get().type_name()
    }

    /// Returns true for a null indirection or an empty holder.
    pub fn is_nil(&self) -> bool {
        match self.get().reflect_ref() {
            ReflectRef::Indirection(pointer) => pointer.is_null(),
            ReflectRef::Holder(holder) => holder.held().is_none(),
            _ => false,
        }
    }

    /// Resolves an indirection or holder by one level.
    ///
    /// Returns `Ok(None)` when the value is null, empty, or not pointer-like.
    pub fn elem(&mut self) -> Result<Option<Value<'_>>, ReflectError> {
        match self.access() {
            Access::Read(value) => match value.reflect_ref() {
                ReflectRef::Indirection(pointer) => pointer.target(),
                ReflectRef::Holder(holder) => Ok(holder.held().map(Value::shared)),
                _ => Ok(None),
            },
            Access::Write(value) if value.kind() == Kind::Holder => {
                let value: &dyn Reflect = value;
                match value.reflect_ref() {
                    ReflectRef::Holder(holder) => Ok(holder.held().map(Value::shared)),
                    _ => Ok(None),
                }
            }
            Access::Write(value) => match value.reflect_mut() {
                ReflectMut::Indirection(pointer) => pointer.target_mut(),
                _ => Ok(None),
            },
        }
    }

    /// Returns the field descriptors if this is a record.
    pub fn field_descriptors(&self) -> Option<&'static [FieldDescriptor]> {
        match self.get().reflect_ref() {
            ReflectRef::Record(record) => Some(record.field_descriptors()),
            _ => None,
        }
    }

    /// Returns a handle to the record field at `index`.
    pub fn field(&mut self, index: usize) -> Option<Value<'_>> {
        match self.access() {
            Access::Read(value) => match value.reflect_ref() {
                ReflectRef::Record(record) => record.field(index).map(Value::shared),
                _ => None,
            },
            Access::Write(value) => match value.reflect_mut() {
                ReflectMut::Record(record) => record.field_mut(index).map(Value::exclusive),
                _ => None,
            },
        }
    }

    /// Returns the number of elements or entries; zero for anything else.
    pub fn len(&self) -> usize {
        match self.get().reflect_ref() {
            ReflectRef::Sequence(sequence) => sequence.len(),
            ReflectRef::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a handle to the sequence element at `index`.
    pub fn element(&mut self, index: usize) -> Option<Value<'_>> {
        match self.access() {
            Access::Read(value) => match value.reflect_ref() {
                ReflectRef::Sequence(sequence) => sequence.element(index).map(Value::shared),
                _ => None,
            },
            Access::Write(value) => match value.reflect_mut() {
                ReflectMut::Sequence(sequence) => {
                    sequence.element_mut(index).map(Value::exclusive)
                }
                _ => None,
            },
        }
    }

    /// Returns read-only handles to every map entry, keyed by rendered key.
    pub fn entries(&self) -> Vec<(String, Value<'_>)> {
        match self.get().reflect_ref() {
            ReflectRef::Map(map) => map
                .entries()
                .into_iter()
                .map(|(key, value)| (key, Value::shared(value)))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get().as_any().downcast_ref::<T>()
    }

    /// Returns the value as `&mut T`.
    ///
    /// Settability is checked before the type.
    pub fn downcast_mut<T: Reflect>(&mut self) -> Result<&mut T, ReflectError> {
        let found = self.type_name();
        self.get_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| {
                ReflectError::type_mismatch(format!("`{}`", std::any::type_name::<T>()), found)
            })
    }

    /// Replaces the held value.
    pub fn set<T: Reflect>(&mut self, value: T) -> Result<(), ReflectError> {
        *self.downcast_mut::<T>()? = value;
        Ok(())
    }

    /// Replaces the held value with the zero value of its type.
    pub fn set_zero(&mut self) -> Result<(), ReflectError> {
        self.get_mut()?.set_zero()
    }

    pub fn str(&self) -> Option<&str> {
        self.downcast_ref::<String>().map(String::as_str)
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> Result<(), ReflectError> {
        self.set(value.into())
    }

    pub fn bool(&self) -> Option<bool> {
        self.downcast_ref::<bool>().copied()
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), ReflectError> {
        self.set(value)
    }

    /// Reads any signed integer, widened to `i128`.
    pub fn int(&self) -> Option<i128> {
        read_as!(self.get().as_any(), i128, [i8, i16, i32, i64, i128, isize])
    }

    /// Writes a signed integer, failing if it does not fit the held type.
    pub fn set_int(&mut self, value: i128) -> Result<(), ReflectError> {
        let found = self.type_name();
        let any = self.get_mut()?.as_any_mut();
        write_as!(any, value, [i8, i16, i32, i64, i128, isize]);
        Err(ReflectError::type_mismatch("a signed integer", found))
    }

    /// Reads any unsigned integer, widened to `u128`.
    pub fn uint(&self) -> Option<u128> {
        read_as!(self.get().as_any(), u128, [u8, u16, u32, u64, u128, usize])
    }

    /// Writes an unsigned integer, failing if it does not fit the held type.
    pub fn set_uint(&mut self, value: u128) -> Result<(), ReflectError> {
        let found = self.type_name();
        let any = self.get_mut()?.as_any_mut();
        write_as!(any, value, [u8, u16, u32, u64, u128, usize]);
        Err(ReflectError::type_mismatch("an unsigned integer", found))
    }

    pub fn float(&self) -> Option<f64> {
        read_as!(self.get().as_any(), f64, [f32, f64])
    }

    /// Writes a float; `f32` targets are narrowed.
    pub fn set_float(&mut self, value: f64) -> Result<(), ReflectError> {
        let found = self.type_name();
        let any = self.get_mut()?.as_any_mut();
        if let Some(slot) = any.downcast_mut::<f64>() {
            *slot = value;
            return Ok(());
        }
        if let Some(slot) = any.downcast_mut::<f32>() {
            *slot = value as f32;
            return Ok(());
        }
        Err(ReflectError::type_mismatch("a float", found))
    }
}

impl<'a, T: Reflect> From<&'a T> for Value<'a> {
    fn from(value: &'a T) -> Self {
        Value::shared(value)
    }
}

impl<'a, T: Reflect> From<&'a mut T> for Value<'a> {
    fn from(value: &'a mut T) -> Self {
        Value::exclusive(value)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name())
            .field("kind", &self.kind())
            .field("settable", &self.can_set())
            .finish()
    }
}
