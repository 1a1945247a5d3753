//! Insertion-ordered option storage with global alias uniqueness.

use log::debug;

use crate::error::ConfigurationError;
use crate::option::{is_valid_alias, Arity, Opt, OptionId};
use crate::rule::Rule;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Registry {
    options: Vec<Opt>,
    next_id: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new option.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is malformed or already names an option.
    pub fn register(&mut self, alias: &str, arity: Arity) -> Result<OptionMut<'_>, ConfigurationError> {
        if self.find(alias).is_some() {
            return Err(ConfigurationError::DuplicateOption(alias.to_string()));
        }

        let option = Opt::new(OptionId(self.next_id), alias, arity)?;
        self.next_id += 1;
        self.options.push(option);
        debug!("Registered option `{alias}` as {arity:?}");

        let index = self.options.len() - 1;
        Ok(OptionMut { registry: self, index })
    }

    /// The option owning `alias`, if any.
    #[must_use]
    pub fn find(&self, alias: &str) -> Option<&Opt> {
        self.options.iter().find(|option| option.has_alias(alias))
    }

    pub fn find_mut(&mut self, alias: &str) -> Option<&mut Opt> {
        self.options.iter_mut().find(|option| option.has_alias(alias))
    }

    #[must_use]
    pub fn get(&self, id: OptionId) -> Option<&Opt> {
        self.options.iter().find(|option| option.id() == id)
    }

    pub fn get_mut(&mut self, id: OptionId) -> Option<&mut Opt> {
        self.options.iter_mut().find(|option| option.id() == id)
    }

    /// Declaration handle for an existing option.
    pub fn edit(&mut self, alias: &str) -> Option<OptionMut<'_>> {
        let index = self.options.iter().position(|option| option.has_alias(alias))?;
        Some(OptionMut { registry: self, index })
    }

    /// Removes the option owning `alias` together with all of its aliases.
    pub fn remove(&mut self, alias: &str) -> Option<Opt> {
        let index = self.options.iter().position(|option| option.has_alias(alias))?;
        let removed = self.options.remove(index);
        debug!("Removed option `{}`", removed.primary());
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opt> {
        self.options.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Chainable declaration handle returned by [`Registry::register`].
///
/// ```
/// use clip_core::option::Arity;
/// use clip_core::registry::Registry;
/// use clip_core::rule::Rule;
///
/// let mut registry = Registry::new();
/// registry
///     .register("r", Arity::Optional)?
///     .alias("repeat")?
///     .describe("Times to repeat.")
///     .expect(Rule::range("[2,10]")?)?
///     .default_value(10)?;
///
/// assert_eq!(registry.find("repeat").unwrap().primary(), "r");
/// # Ok::<(), clip_core::error::ConfigurationError>(())
/// ```
#[derive(Debug)]
pub struct OptionMut<'a> {
    registry: &'a mut Registry,
    index: usize,
}

impl<'a> OptionMut<'a> {
    #[must_use]
    pub fn id(&self) -> OptionId {
        self.registry.options[self.index].id()
    }

    // The handle borrows the registry, so nothing can be removed under it.
    fn option(&mut self) -> &mut Opt {
        &mut self.registry.options[self.index]
    }

    /// Adds another name for the option.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is malformed or used by any option.
    pub fn alias(mut self, alias: &str) -> Result<Self, ConfigurationError> {
        if !is_valid_alias(alias) {
            return Err(ConfigurationError::InvalidAlias(alias.to_string()));
        }
        if self.registry.find(alias).is_some() {
            return Err(ConfigurationError::DuplicateAlias(alias.to_string()));
        }

        self.option().push_alias(alias.to_string());
        Ok(self)
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.option().set_description(description.into());
        self
    }

    /// Pre-seeds the bound value before arguments are parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DefaultOnFlag`] for flags.
    pub fn default_value(self, value: impl Into<Value>) -> Result<Self, ConfigurationError> {
        self.default_values(vec![value.into()])
    }

    /// # Errors
    ///
    /// Returns [`ConfigurationError::DefaultOnFlag`] for flags.
    pub fn default_values(mut self, values: Vec<Value>) -> Result<Self, ConfigurationError> {
        self.option().set_default(values)?;
        Ok(self)
    }

    /// Attaches the validation rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::RuleAlreadySet`] on a second call.
    pub fn expect(mut self, rule: Rule) -> Result<Self, ConfigurationError> {
        self.option().set_rule(rule)?;
        Ok(self)
    }
}
