//! Library loading.
//!
//! A library is a shared helper object attached to a script's
//! [`Context`](crate::context::Context) by name. Names are resolved against
//! [`LibrarySource`]s in priority order, so a source registered by the user
//! can shadow a built-in library with the same name.

use std::any::Any;
use std::fmt::{Debug, Formatter};

use log::debug;

/// Upcast helper so loaded libraries can be handed back as their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Library: AsAny {
    /// Called once, right after the library is instantiated.
    fn on_load(&mut self) {}
}

impl Debug for dyn Library {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Library")
    }
}

pub type LibraryFactory = fn() -> Box<dyn Library>;

/// A named search location mapping library names to factories.
#[derive(Clone)]
pub struct LibrarySource {
    name: String,
    factories: Vec<(String, LibraryFactory)>,
}

impl LibrarySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, library: impl Into<String>, factory: LibraryFactory) -> Self {
        self.factories.push((library.into(), factory));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn factory(&self, library: &str) -> Option<LibraryFactory> {
        self.factories
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, factory)| *factory)
    }
}

impl Debug for LibrarySource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LibrarySource")
            .field("name", &self.name)
            .field(
                "libraries",
                &self.factories.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Ordered set of library sources. Earlier sources win.
#[derive(Debug, Clone, Default)]
pub struct LibraryLoader {
    sources: Vec<LibrarySource>,
}

impl LibraryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source with lower priority than the ones already present.
    #[must_use]
    pub fn with_source(mut self, source: LibrarySource) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds a source that takes priority over every existing one.
    pub fn prepend_source(&mut self, source: LibrarySource) {
        self.sources.insert(0, source);
    }

    /// Builds a fresh instance of `library` from the first source that knows it.
    #[must_use]
    pub fn instantiate(&self, library: &str) -> Option<Box<dyn Library>> {
        self.sources.iter().find_map(|source| {
            let factory = source.factory(library)?;
            debug!("Resolved library `{library}` in source `{}`", source.name());
            Some(factory())
        })
    }
}
