use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use crate::{Kind, Map, Reflect, ReflectError, ReflectMut, ReflectRef};

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Display + 'static,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn kind(&self) -> Kind {
        Kind::Map
    }

    any_methods!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    // Entries are never addressable.
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Leaf
    }

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        self.clear();
        Ok(())
    }
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: Display + 'static,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Vec<(String, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value as &dyn Reflect))
            .collect()
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Display + 'static,
    V: Reflect,
{
    fn kind(&self) -> Kind {
        Kind::Map
    }

    any_methods!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Leaf
    }

    fn set_zero(&mut self) -> Result<(), ReflectError> {
        self.clear();
        Ok(())
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Display + 'static,
    V: Reflect,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Vec<(String, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value as &dyn Reflect))
            .collect()
    }
}
