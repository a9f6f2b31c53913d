//! The traversal engine.
//!
//! A [`Spelunker`] walks a value depth-first. For every record field it
//! first descends into the field's own structure, then dispatches the
//! field's directives: the every-field handler and the keyed handler, in
//! that order, once per directive. The first error aborts the whole walk
//! and is returned unchanged.

use std::collections::BTreeMap;
use std::fmt;

use spelunk_reflect::{FieldDescriptor, Kind, ReflectError, Value};
use tracing::{debug, trace};

use crate::{SpelunkError, annotation, path};

/// Tag name used when none is configured.
pub const DEFAULT_TAG: &str = "spelunk";

/// A handler invoked with `(field name, field path, directive text, value)`.
///
/// The value handle may not be settable; handlers must check before
/// mutating and report failure through the returned error.
pub type Handler<E = SpelunkError> = Box<dyn Fn(&str, &str, &str, Value<'_>) -> Result<(), E>>;

/// Walks values and dispatches annotated fields to registered handlers.
///
/// `E` is the error type shared by every handler. Reflection failures raised
/// by the engine itself are converted into it.
///
/// ```rust
/// use spelunk_core::{Spelunker, handlers};
/// use spelunk_reflect::Record;
///
/// #[derive(Record)]
/// struct Pet {
///     #[tags(spelunk = "trim,capitalize")]
///     name: String,
/// }
///
/// let mut pet = Pet { name: "  geomyidae ".to_string() };
///
/// let mut spelunker = Spelunker::new();
/// spelunker
///     .set_handler("trim", handlers::trim)
///     .set_handler("capitalize", handlers::capitalize);
/// spelunker.spelunk(&mut pet).unwrap();
///
/// assert_eq!(pet.name, "Geomyidae");
/// ```
pub struct Spelunker<E = SpelunkError> {
    tag: String,
    handlers: BTreeMap<String, Handler<E>>,
    every_field_handler: Option<Handler<E>>,
}

impl Spelunker {
    /// Creates a spelunker looking for the `spelunk` tag, with no handlers.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Default for Spelunker<E> {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            handlers: BTreeMap::new(),
            every_field_handler: None,
        }
    }
}

impl<E> Spelunker<E> {
    /// Sets the tag whose annotations are read.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = tag.into();
        self
    }

    /// Registers `handler` under `key`, replacing any previous one.
    pub fn set_handler<F>(&mut self, key: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&str, &str, &str, Value<'_>) -> Result<(), E> + 'static,
    {
        self.insert_handler(key.into(), Box::new(handler));
        self
    }

    /// Registers the handler called once per directive on every field.
    pub fn set_every_field_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&str, &str, &str, Value<'_>) -> Result<(), E> + 'static,
    {
        self.every_field_handler = Some(Box::new(handler));
        self
    }

    pub(crate) fn insert_handler(&mut self, key: String, handler: Handler<E>) {
        if self.handlers.insert(key.clone(), handler).is_some() {
            debug!("Replacing handler for key '{}'", key);
        }
    }

    /// Returns the configured tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_handler(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn has_every_field_handler(&self) -> bool {
        self.every_field_handler.is_some()
    }

    /// Returns the registered keys in sorted order.
    pub fn handler_keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl<E> Spelunker<E>
where
    E: From<ReflectError>,
{
    /// Walks `root`, dispatching every annotated field.
    ///
    /// Pass `&mut` to let handlers mutate the walked data; values reached
    /// through `&` are only settable behind shared pointers.
    pub fn spelunk<'v>(&self, root: impl Into<Value<'v>>) -> Result<(), E> {
        let root = root.into();
        let type_name = root.type_name();
        debug!("Spelunking into {} (tag '{}')", type_name, self.tag);

        let result = self.walk("", root);
        if result.is_err() {
            debug!("Spelunk into {} aborted", type_name);
        }
        result
    }

    fn walk(&self, path: &str, mut value: Value<'_>) -> Result<(), E> {
        let kind = value.kind();
        if kind.is_nullable() {
            if value.is_nil() {
                trace!("Skipping empty {} at '{}'", kind, path);
                return Ok(());
            }
            return match value.elem()? {
                Some(inner) => self.walk(path, inner),
                None => Ok(()),
            };
        }

        let Some(fields) = value.field_descriptors() else {
            return Ok(());
        };

        for (index, descriptor) in fields.iter().enumerate() {
            let field_path = path::field(path, descriptor.name);
            let Some(mut field) = value.field(index) else {
                continue;
            };

            if field.kind().is_structural() {
                self.descend(&field_path, field.reborrow())?;
            }
            self.dispatch(descriptor, &field_path, field)?;
        }

        Ok(())
    }

    fn descend(&self, path: &str, mut member: Value<'_>) -> Result<(), E> {
        match member.kind() {
            Kind::Record | Kind::Holder => self.walk(path, member),
            Kind::Sequence | Kind::Array => {
                for index in 0..member.len() {
                    if let Some(element) = member.element(index) {
                        self.walk(&path::index(path, index), element)?;
                    }
                }
                Ok(())
            }
            Kind::Map => {
                for (key, entry) in member.entries() {
                    self.walk(&path::key(path, &key), entry)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn dispatch(
        &self,
        descriptor: &FieldDescriptor,
        path: &str,
        mut field: Value<'_>,
    ) -> Result<(), E> {
        let raw = descriptor.tag(&self.tag).unwrap_or_default();

        for directive in annotation::parse(raw) {
            if let Some(handler) = &self.every_field_handler {
                trace!("Every-field handler on '{}' ({})", path, directive);
                handler(descriptor.name, path, directive.text(), field.reborrow())?;
            }

            if let Some(handler) = self.handlers.get(directive.key()) {
                trace!("Handler '{}' on '{}'", directive.key(), path);
                handler(descriptor.name, path, directive.text(), field.reborrow())?;
            }
        }

        Ok(())
    }
}

impl<E> fmt::Debug for Spelunker<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spelunker")
            .field("tag", &self.tag)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("every_field_handler", &self.every_field_handler.is_some())
            .finish()
    }
}
