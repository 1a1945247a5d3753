//! Script instance state.
//!
//! A [`Context`] is owned by the [`Lifecycle`](crate::lifecycle::Lifecycle)
//! and lent to every script hook. Everything that changes the declared
//! surface goes through it, so the configuration boundary is checked in one
//! place: once arguments are bound, every mutating call fails with
//! [`ConfigurationError::AlreadyInitialized`].

use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use leon::Template;
use log::{debug, info};

use crate::config::Settings;
use crate::error::{ConfigurationError, Result, UsageError};
use crate::loader::{Library, LibraryLoader};
use crate::option::{Arity, HelpMode, Opt, OptionId};
use crate::registry::{OptionMut, Registry};
use crate::tokenizer::ParsedArgs;
use crate::value::Value;

/// Name printed by the version banner when a script declares no version.
pub const FRAMEWORK_NAME: &str = "Clip";

/// Version printed by the version banner when a script declares no version.
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    NotConfigured,
    Configured,
    Initialized,
}

/// The help or version option currently in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShortcutSlot {
    id: OptionId,
    builtin: bool,
}

#[derive(Debug, Default)]
pub struct Context {
    registry: Registry,
    help: Option<ShortcutSlot>,
    version: Option<ShortcutSlot>,
    stage: Stage,
    libraries: IndexMap<String, Box<dyn Library>>,
    loader: LibraryLoader,
    settings: Settings,
}

impl Context {
    #[must_use]
    pub fn new(settings: Settings, loader: LibraryLoader) -> Self {
        Self {
            settings,
            loader,
            ..Self::default()
        }
    }

    fn ensure_configurable(&self) -> std::result::Result<(), ConfigurationError> {
        if self.stage == Stage::Initialized {
            return Err(ConfigurationError::AlreadyInitialized);
        }
        Ok(())
    }

    /// Declares an option. Chain the returned handle to add aliases, a
    /// description, a default or a rule.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound, or when the alias is malformed or
    /// already taken.
    pub fn declare(
        &mut self,
        alias: &str,
        arity: Arity,
    ) -> std::result::Result<OptionMut<'_>, ConfigurationError> {
        self.ensure_configurable()?;
        self.registry.register(alias, arity)
    }

    /// Reopens a declared option for further declaration calls.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound, or when no option owns `alias`.
    pub fn option_mut(&mut self, alias: &str) -> std::result::Result<OptionMut<'_>, ConfigurationError> {
        self.ensure_configurable()?;
        self.registry
            .edit(alias)
            .ok_or_else(|| ConfigurationError::UnknownOption(alias.to_string()))
    }

    /// Unregisters the option owning `alias` along with all its aliases.
    ///
    /// Returns `None` when no option owns the alias.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound.
    pub fn remove_opt(&mut self, alias: &str) -> std::result::Result<Option<Opt>, ConfigurationError> {
        self.ensure_configurable()?;

        let removed = self.registry.remove(alias);
        if let Some(option) = &removed {
            if self.help.is_some_and(|slot| slot.id == option.id()) {
                self.help = None;
            }
            if self.version.is_some_and(|slot| slot.id == option.id()) {
                self.version = None;
            }
        }
        Ok(removed)
    }

    #[must_use]
    pub fn opt(&self, alias: &str) -> Option<&Opt> {
        self.registry.find(alias)
    }

    /// Mutable access for binding values by hand, e.g. in tests.
    pub fn opt_mut(&mut self, alias: &str) -> Option<&mut Opt> {
        self.registry.find_mut(alias)
    }

    /// First value bound to the option owning `alias`.
    #[must_use]
    pub fn value(&self, alias: &str) -> Option<&Value> {
        self.opt(alias).and_then(Opt::value)
    }

    #[must_use]
    pub fn values(&self, alias: &str) -> &[Value] {
        self.opt(alias).map(Opt::values).unwrap_or_default()
    }

    #[must_use]
    pub fn is_given(&self, alias: &str) -> bool {
        self.opt(alias).is_some_and(Opt::is_given)
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.registry.iter()
    }

    pub(crate) fn enable_default_help(&mut self) -> std::result::Result<(), ConfigurationError> {
        let id = self
            .declare("h", Arity::Flag)?
            .alias("help")?
            .describe("Shows the help text.")
            .id();
        self.help = Some(ShortcutSlot { id, builtin: true });
        Ok(())
    }

    pub(crate) fn enable_default_version(&mut self) -> std::result::Result<(), ConfigurationError> {
        let id = self
            .declare("v", Arity::Flag)?
            .alias("version")?
            .describe("Shows the script version.")
            .id();
        self.version = Some(ShortcutSlot { id, builtin: true });
        Ok(())
    }

    /// Unregisters the built-in `-h/--help` option. Does nothing if it is not
    /// active.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound.
    pub fn disable_default_help(&mut self) -> std::result::Result<&mut Self, ConfigurationError> {
        self.ensure_configurable()?;
        if let Some(slot) = self.help.filter(|slot| slot.builtin) {
            self.help = None;
            self.remove_by_id(slot.id);
        }
        Ok(self)
    }

    /// Makes the option owning `alias` the help option, replacing the
    /// built-in one.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound, or when no option owns `alias`.
    pub fn set_help_option(&mut self, alias: &str) -> std::result::Result<&mut Self, ConfigurationError> {
        self.ensure_configurable()?;
        let id = self.resolve(alias)?;
        if self.help.is_some_and(|slot| slot.id != id) {
            self.disable_default_help()?;
        }
        self.help = Some(ShortcutSlot { id, builtin: false });
        debug!("Help option is now `{alias}`");
        Ok(self)
    }

    #[must_use]
    pub fn help_option(&self) -> Option<&Opt> {
        self.help.and_then(|slot| self.registry.get(slot.id))
    }

    /// Unregisters the built-in `-v/--version` option. Does nothing if it is
    /// not active.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound.
    pub fn disable_default_version(&mut self) -> std::result::Result<&mut Self, ConfigurationError> {
        self.ensure_configurable()?;
        if let Some(slot) = self.version.filter(|slot| slot.builtin) {
            self.version = None;
            self.remove_by_id(slot.id);
        }
        Ok(self)
    }

    /// Makes the option owning `alias` the version option, replacing the
    /// built-in one.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound, or when no option owns `alias`.
    pub fn set_version_option(&mut self, alias: &str) -> std::result::Result<&mut Self, ConfigurationError> {
        self.ensure_configurable()?;
        let id = self.resolve(alias)?;
        if self.version.is_some_and(|slot| slot.id != id) {
            self.disable_default_version()?;
        }
        self.version = Some(ShortcutSlot { id, builtin: false });
        debug!("Version option is now `{alias}`");
        Ok(self)
    }

    #[must_use]
    pub fn version_option(&self) -> Option<&Opt> {
        self.version.and_then(|slot| self.registry.get(slot.id))
    }

    fn resolve(&self, alias: &str) -> std::result::Result<OptionId, ConfigurationError> {
        self.registry
            .find(alias)
            .map(Opt::id)
            .ok_or_else(|| ConfigurationError::UnknownOption(alias.to_string()))
    }

    fn remove_by_id(&mut self, id: OptionId) {
        let primary = self.registry.get(id).map(|option| option.primary().to_string());
        if let Some(primary) = primary {
            self.registry.remove(&primary);
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.stage == Stage::Initialized
    }

    pub(crate) fn mark_configured(&mut self) {
        self.stage = Stage::Configured;
    }

    /// Closes the configuration window. Normally done by the lifecycle right
    /// after arguments are bound.
    pub fn mark_initialized(&mut self) {
        info!("Script context initialized");
        self.stage = Stage::Initialized;
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Loads a library by name.
    ///
    /// Returns `Ok(false)` without doing anything if the library is already
    /// loaded.
    ///
    /// # Errors
    ///
    /// Fails after arguments were bound, or with
    /// [`ConfigurationError::LibraryNotFound`] when no source knows `name`.
    pub fn load(&mut self, name: &str) -> std::result::Result<bool, ConfigurationError> {
        self.ensure_configurable()?;

        if self.libraries.contains_key(name) {
            debug!("Library `{name}` already loaded");
            return Ok(false);
        }

        let mut library = self
            .loader
            .instantiate(name)
            .ok_or_else(|| ConfigurationError::LibraryNotFound(name.to_string()))?;
        library.on_load();
        self.libraries.insert(name.to_string(), library);
        info!("Loaded library `{name}`");
        Ok(true)
    }

    /// A loaded library, if it exists and has type `T`.
    #[must_use]
    pub fn library<T: Library>(&self, name: &str) -> Option<&T> {
        let library: &dyn Library = self.libraries.get(name)?.as_ref();
        library.as_any().downcast_ref::<T>()
    }

    pub fn library_mut<T: Library>(&mut self, name: &str) -> Option<&mut T> {
        let library: &mut dyn Library = self.libraries.get_mut(name)?.as_mut();
        library.as_any_mut().downcast_mut::<T>()
    }

    /// Resolves every parsed key against the registry and binds its values.
    ///
    /// # Errors
    ///
    /// Returns the first [`UsageError`]: an unknown key, a required option
    /// without values, or a value rejected by a rule. Rejections carry a
    /// pointer to the help option when one is active.
    pub fn bind(&mut self, parsed: &ParsedArgs) -> std::result::Result<(), UsageError> {
        let help_hint = self.help_option().map(|option| option.help(HelpMode::Option));

        for (key, values) in &parsed.options {
            let option = self
                .registry
                .find_mut(key)
                .ok_or_else(|| UsageError::InvalidOption(key.clone()))?;

            option.set_used_alias(key.as_str());

            if option.is_required() && values.is_empty() {
                return Err(UsageError::MissingArgument(key.clone()));
            }

            option
                .set_values(values.clone())
                .map_err(|e| e.with_help(help_hint.clone()))?;
        }

        Ok(())
    }

    /// The help table listing every declared option.
    #[must_use]
    pub fn render_help(&self) -> String {
        let gutter = self.settings.help_gutter;
        let longest = self
            .options()
            .map(|option| option.help(HelpMode::Option).len())
            .max()
            .unwrap_or(0);

        let rows = self.options().map(|option| {
            let option_string = option.help(HelpMode::Option);
            let padding = longest - option_string.len() + gutter;
            format!(
                "  {option_string}{}{}",
                " ".repeat(padding),
                option.help(HelpMode::Description)
            )
        });

        [
            "(args...) -> Required args".to_string(),
            "[args...] -> Optional args".to_string(),
            "Options available:".to_string(),
        ]
        .into_iter()
        .chain(rows)
        .join("\n")
    }

    /// The version banner for a script.
    ///
    /// Scripts without a version get the framework's own name and version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version format cannot be parsed or rendered.
    pub fn render_version(&self, name: &str, version: Option<&str>) -> Result<String> {
        let (name, version) = match version {
            Some(version) => (name, version),
            None => (FRAMEWORK_NAME, FRAMEWORK_VERSION),
        };

        let template = Template::parse(&self.settings.version_format)?;
        let values = HashMap::from([
            ("name".to_string(), name.to_string()),
            ("version".to_string(), version.to_string()),
        ]);
        Ok(template.render(&values)?)
    }

    /// Drops all declarations, libraries and bindings. Settings and library
    /// sources are kept.
    pub fn reset(&mut self) {
        self.registry = Registry::new();
        self.help = None;
        self.version = None;
        self.stage = Stage::NotConfigured;
        self.libraries.clear();
    }
}
