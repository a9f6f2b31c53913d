//! A polymorphic holder for values of any reflected type.

use std::any::Any;
use std::fmt;

use crate::{Holder, Kind, Reflect, ReflectError, ReflectMut, ReflectRef};

/// Holds a value of any [`Reflect`] type, or nothing.
///
/// The held value is only reachable read-only. To let handlers mutate
/// through a holder, store a shared pointer such as `Rc<RefCell<T>>`.
///
/// ```rust
/// use spelunk_reflect::{Dynamic, Kind, Value};
///
/// let holder = Dynamic::new(String::from("secret"));
/// let mut value = Value::from(&holder);
/// assert_eq!(value.kind(), Kind::Holder);
///
/// let held = value.elem().unwrap().unwrap();
/// assert_eq!(held.str(), Some("secret"));
/// assert!(!held.can_set());
/// ```
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    /// Creates a holder containing `value`.
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// Creates an empty holder.
    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => f.debug_tuple("Dynamic").field(&value.type_name()).finish(),
            None => f.write_str("Dynamic(<empty>)"),
        }
    }
}

impl Reflect for Dynamic {
    fn kind(&self) -> Kind {
        Kind::Holder
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Holder(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Leaf
    }

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        self.0 = None;
        Ok(())
    }
}

impl Holder for Dynamic {
    fn held(&self) -> Option<&dyn Reflect> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_downcast() {
        let holder = Dynamic::new(42_u32);
        assert!(!holder.is_empty());
        assert_eq!(holder.downcast_ref::<u32>(), Some(&42));
        assert_eq!(holder.downcast_ref::<i32>(), None);
    }

    #[test]
    fn test_default_is_empty() {
        let holder = Dynamic::default();
        assert!(holder.is_empty());
        assert!(holder.held().is_none());
        assert_eq!(format!("{:?}", holder), "Dynamic(<empty>)");
    }

    #[test]
    fn test_set_zero_empties_holder() {
        let mut holder = Dynamic::new(String::from("x"));
        holder.set_zero().unwrap();
        assert!(holder.is_empty());
    }

    #[test]
    fn test_debug_shows_held_type() {
        let holder = Dynamic::new(1.5_f64);
        assert_eq!(format!("{:?}", holder), r#"Dynamic("f64")"#);
    }
}
