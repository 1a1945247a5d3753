//! Script catalog and script selection.
//!
//! The launcher knows its scripts by name. With multi-script mode enabled the
//! first argument may name the script to run; otherwise the configured
//! default script runs.

use std::sync::LazyLock;

use clip_core::config::Settings;
use clip_core::error::ConfigurationError;
use clip_core::script::Script;
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;

use crate::scripts::{default_options, main_menu, options};

static SCRIPT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]+$").expect("script name pattern is valid")
});

pub type ScriptFactory = fn() -> Box<dyn Script>;

/// A script the launcher can run.
#[derive(Clone)]
pub struct CatalogEntry {
    pub description: &'static str,
    pub factory: ScriptFactory,
}

/// The script picked for this invocation, with the arguments it should see.
pub struct Selection {
    pub name: String,
    pub script: Box<dyn Script>,
    pub args: Vec<String>,
}

#[derive(Clone, Default)]
pub struct ScriptCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl ScriptCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scripts shipped with the launcher.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with("main", "Lists the available scripts.", main_menu::create)
            .with("options", "Example of how to use options.", options::create)
            .with(
                "default_options",
                "Example of how to change default options.",
                default_options::create,
            )
    }

    #[must_use]
    pub fn with(mut self, name: &str, description: &'static str, factory: ScriptFactory) -> Self {
        self.entries.insert(
            name.to_string(),
            CatalogEntry {
                description,
                factory,
            },
        );
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    #[must_use]
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Script>> {
        self.entries.get(name).map(|entry| (entry.factory)())
    }

    /// Picks the script to run.
    ///
    /// In multi-script mode an argument in position 1 that looks like a
    /// script name selects that script and is removed from `args`. An unknown
    /// name falls back to the default script and stays in `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ScriptNotFound`] when the default script
    /// is not in the catalog.
    pub fn select(
        &self,
        settings: &Settings,
        mut args: Vec<String>,
    ) -> Result<Selection, ConfigurationError> {
        let default = settings.default_script.as_str();

        let candidate = args
            .get(1)
            .filter(|arg| settings.multi_script && SCRIPT_NAME.is_match(arg))
            .cloned();

        if let Some(candidate) = candidate {
            if let Some(script) = self.instantiate(&candidate) {
                debug!("Selected script `{candidate}` from arguments");
                args.remove(1);
                return Ok(Selection {
                    name: candidate,
                    script,
                    args,
                });
            }

            warn!("Unknown script `{candidate}`, falling back to `{default}`");
            println!("ERROR. Unable to find script: {candidate}");
            println!("Loading default script: {default}");
        }

        let script = self
            .instantiate(default)
            .ok_or_else(|| ConfigurationError::ScriptNotFound(default.to_string()))?;

        Ok(Selection {
            name: default.to_string(),
            script,
            args,
        })
    }
}
