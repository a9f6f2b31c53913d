use std::collections::VecDeque;

use crate::{Kind, Reflect, ReflectError, ReflectMut, ReflectRef, Sequence};

impl<T: Reflect> Reflect for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    any_methods!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        *self = Vec::new();
        Ok(())
    }
}

impl<T: Reflect> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|element| element as &mut dyn Reflect)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    any_methods!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        *self = VecDeque::new();
        Ok(())
    }
}

impl<T: Reflect> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|element| element as &mut dyn Reflect)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn kind(&self) -> Kind {
        Kind::Array
    }

    any_methods!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    // Arrays cannot shrink; zero each element instead.
    fn set_zero(&mut self) -> Result<(), ReflectError> {
        for element in self.iter_mut() {
            element.set_zero()?;
        }
        Ok(())
    }
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|element| element as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|element| element as &mut dyn Reflect)
    }
}
