//! Libraries shipped with the launcher.

use clip_core::loader::{LibraryLoader, LibrarySource};

pub mod banner;

/// Loader resolving the launcher's built-in libraries.
#[must_use]
pub fn loader() -> LibraryLoader {
    LibraryLoader::new().with_source(LibrarySource::new("clip").with("banner", banner::create))
}
