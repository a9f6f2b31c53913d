//! `Reflect` implementations for standard library types.

/// Expands to the `as_any` / `as_any_mut` pair every impl needs.
macro_rules! any_methods {
    () => {
        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

mod map;
mod pointer;
mod scalar;
mod sequence;
