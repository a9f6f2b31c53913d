use std::cell::{RefCell, RefMut};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::{Indirection, Kind, Reflect, ReflectError, ReflectMut, ReflectRef, Value};

fn as_reflect<T: Reflect>(value: &mut T) -> &mut (dyn Reflect + 'static) {
    value
}

macro_rules! impl_indirection_reflect {
    () => {
        fn kind(&self) -> Kind {
            Kind::Indirection
        }

        any_methods!();

        fn reflect_ref(&self) -> ReflectRef<'_> {
            ReflectRef::Indirection(self)
        }

        fn reflect_mut(&mut self) -> ReflectMut<'_> {
            ReflectMut::Indirection(self)
        }
    };
}

impl<T: Reflect> Reflect for Option<T> {
    impl_indirection_reflect!();

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        *self = None;
        Ok(())
    }
}

impl<T: Reflect> Indirection for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn target(&self) -> Result<Option<Value<'_>>, ReflectError> {
        Ok(self.as_ref().map(|value| Value::shared(value)))
    }

    fn target_mut(&mut self) -> Result<Option<Value<'_>>, ReflectError> {
        Ok(self.as_mut().map(|value| Value::exclusive(value)))
    }
}

impl<T: Reflect> Reflect for Box<T> {
    impl_indirection_reflect!();

    // A box is never null, so zero what it points to.
    fn set_zero(&mut self) -> Result<(), ReflectError> {
        (**self).set_zero()
    }
}

impl<T: Reflect> Indirection for Box<T> {
    fn is_null(&self) -> bool {
        false
    }

    fn target(&self) -> Result<Option<Value<'_>>, ReflectError> {
        Ok(Some(Value::shared(&**self)))
    }

    fn target_mut(&mut self) -> Result<Option<Value<'_>>, ReflectError> {
        Ok(Some(Value::exclusive(&mut **self)))
    }
}

impl<T: Reflect> Reflect for Rc<RefCell<T>> {
    impl_indirection_reflect!();

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        let type_name = self.type_name();
        self.try_borrow_mut()
            .map_err(|_| ReflectError::AlreadyBorrowed { type_name })?
            .set_zero()
    }
}

impl<T: Reflect> Indirection for Rc<RefCell<T>> {
    fn is_null(&self) -> bool {
        false
    }

    fn target(&self) -> Result<Option<Value<'_>>, ReflectError> {
        match self.try_borrow_mut() {
            Ok(guard) => Ok(Some(Value::guarded(RefMut::map(guard, as_reflect::<T>)))),
            Err(_) => Err(ReflectError::AlreadyBorrowed {
                type_name: self.type_name(),
            }),
        }
    }

    fn target_mut(&mut self) -> Result<Option<Value<'_>>, ReflectError> {
        self.target()
    }
}

thread_local! {
    /// Addresses of the mutexes this thread holds through a [`Value`].
    static HELD_LOCKS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// A mutex guard listed in [`HELD_LOCKS`] for as long as it lives.
struct HeldLock<'a> {
    guard: MappedMutexGuard<'a, dyn Reflect + 'static>,
    address: usize,
}

impl Deref for HeldLock<'_> {
    type Target = dyn Reflect + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.guard
    }
}

impl DerefMut for HeldLock<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.guard
    }
}

impl Drop for HeldLock<'_> {
    fn drop(&mut self) {
        HELD_LOCKS.with_borrow_mut(|held| {
            if let Some(position) = held.iter().rposition(|address| *address == self.address) {
                held.swap_remove(position);
            }
        });
    }
}

/// Locks `shared`, waiting for other threads to release it.
///
/// Fails when this thread already holds the lock through a live [`Value`],
/// which only happens with aliasing or cyclic data.
fn lock_target<T: Reflect>(shared: &Arc<Mutex<T>>) -> Result<HeldLock<'_>, ReflectError> {
    let address = Arc::as_ptr(shared).addr();
    if HELD_LOCKS.with_borrow(|held| held.contains(&address)) {
        return Err(ReflectError::AlreadyBorrowed {
            type_name: shared.type_name(),
        });
    }

    let guard = MutexGuard::map(shared.lock(), as_reflect::<T>);
    HELD_LOCKS.with_borrow_mut(|held| held.push(address));
    Ok(HeldLock { guard, address })
}

// A mutex locked elsewhere on this thread, outside any `Value`, blocks
// forever like any other nested `lock()`.
impl<T: Reflect> Reflect for Arc<Mutex<T>> {
    impl_indirection_reflect!();

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        lock_target(self)?.set_zero()
    }
}

impl<T: Reflect> Indirection for Arc<Mutex<T>> {
    fn is_null(&self) -> bool {
        false
    }

    fn target(&self) -> Result<Option<Value<'_>>, ReflectError> {
        Ok(Some(Value::guarded(lock_target(self)?)))
    }

    fn target_mut(&mut self) -> Result<Option<Value<'_>>, ReflectError> {
        self.target()
    }
}
