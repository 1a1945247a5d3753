//! A single declared option.
//!
//! Options are created through the [`Registry`](crate::registry::Registry),
//! which keeps aliases unique across all options. Declaration-time setters
//! live on [`OptionMut`](crate::registry::OptionMut); this type only exposes
//! binding and read access.

use itertools::Itertools;
use log::debug;

use crate::error::{ConfigurationError, UsageError};
use crate::rule::{Rejection, Rule};
use crate::value::Value;

/// How many values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value, only presence.
    Flag,
    /// Zero or more values.
    Optional,
    /// One or more values.
    Required,
}

/// Stable handle to a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(pub(crate) u64);

/// What [`Opt::help`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpMode {
    Description,
    /// The aliases as typed on the command line, e.g. `-n,--name (args...)`.
    Option,
}

/// Whether `alias` can name an option.
///
/// Single characters must be alphanumeric. Longer aliases are alphanumeric
/// segments of at least two characters joined by single dashes.
#[must_use]
pub fn is_valid_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(only), None) => only.is_ascii_alphanumeric(),
        _ => alias
            .split('-')
            .all(|segment| segment.len() >= 2 && segment.chars().all(|c| c.is_ascii_alphanumeric())),
    }
}

#[derive(Debug)]
pub struct Opt {
    id: OptionId,
    aliases: Vec<String>,
    arity: Arity,
    description: String,
    rule: Option<Rule>,
    values: Vec<Value>,
    given: bool,
    called_as: Option<String>,
}

impl Opt {
    pub(crate) fn new(id: OptionId, alias: &str, arity: Arity) -> Result<Self, ConfigurationError> {
        if !is_valid_alias(alias) {
            return Err(ConfigurationError::InvalidOption(alias.to_string()));
        }

        Ok(Self {
            id,
            aliases: vec![alias.to_string()],
            arity,
            description: String::new(),
            rule: None,
            values: Vec::new(),
            given: false,
            called_as: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn primary(&self) -> &str {
        &self.aliases[0]
    }

    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|existing| existing == alias)
    }

    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.arity == Arity::Flag
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.arity == Arity::Optional
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.arity == Arity::Required
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// Whether the option appeared on the command line.
    #[must_use]
    pub fn is_given(&self) -> bool {
        self.given
    }

    #[must_use]
    pub fn not_given(&self) -> bool {
        !self.given
    }

    /// The alias the user typed, or the primary alias if it was never bound
    /// from arguments.
    #[must_use]
    pub fn called_as(&self) -> &str {
        self.called_as.as_deref().unwrap_or_else(|| self.primary())
    }

    /// First bound value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Records the alias used on the command line.
    pub fn set_used_alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.called_as = Some(alias.into());
        self
    }

    /// Binds a single value. See [`Opt::set_values`].
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] when the value is rejected by the option's rule.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<&mut Self, UsageError> {
        self.set_values(vec![value.into()])
    }

    /// Binds a list of values and marks the option as given.
    ///
    /// Flags are marked as given but never hold a value. For other options a
    /// non-empty list is checked against the rule first; on rejection the
    /// previously bound values are kept.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidValue`] naming the first rejected value,
    /// or [`UsageError::CustomRejected`] when a multi-value rule fails.
    pub fn set_values(&mut self, values: Vec<Value>) -> Result<&mut Self, UsageError> {
        self.given = true;

        if self.is_flag() || values.is_empty() {
            return Ok(self);
        }

        if let Some(rule) = &self.rule {
            match rule.first_rejected(&values) {
                Some(Rejection::Value(value)) => {
                    return Err(UsageError::InvalidValue {
                        option: self.called_as().to_string(),
                        value: value.to_string(),
                    });
                }
                Some(Rejection::List) => {
                    return Err(UsageError::CustomRejected {
                        option: self.called_as().to_string(),
                    });
                }
                None => {}
            }
        }

        debug!("Bound `{}` to {:?}", self.called_as(), values);
        self.values = values;
        Ok(self)
    }

    /// Renders the description, or the option string for the help table.
    #[must_use]
    pub fn help(&self, mode: HelpMode) -> String {
        match mode {
            HelpMode::Description => self.description.clone(),
            HelpMode::Option => {
                let aliases = self
                    .aliases
                    .iter()
                    .map(|alias| {
                        if alias.len() == 1 {
                            format!("-{alias}")
                        } else {
                            format!("--{alias}")
                        }
                    })
                    .join(",");

                match self.arity {
                    Arity::Required => format!("{aliases} (args...)"),
                    Arity::Optional => format!("{aliases} [args...]"),
                    Arity::Flag => aliases,
                }
            }
        }
    }

    pub(crate) fn push_alias(&mut self, alias: String) {
        self.aliases.push(alias);
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_default(&mut self, values: Vec<Value>) -> Result<(), ConfigurationError> {
        if self.is_flag() {
            return Err(ConfigurationError::DefaultOnFlag);
        }
        self.values = values;
        Ok(())
    }

    pub(crate) fn set_rule(&mut self, rule: Rule) -> Result<(), ConfigurationError> {
        if self.rule.is_some() {
            return Err(ConfigurationError::RuleAlreadySet(self.primary().to_string()));
        }
        self.rule = Some(rule);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(alias: &str, arity: Arity) -> Opt {
        Opt::new(OptionId(0), alias, arity).unwrap()
    }

    #[test]
    fn test_valid_aliases() {
        for alias in ["a", "9", "ab", "abc", "99-9999", "no-cont-rib", "no-contrib"] {
            assert!(is_valid_alias(alias), "{alias}");
        }

        for alias in [
            "", "-", "ab-a", "ab-", "ab--", "no--contrib", "n-o-co-o", "no-contrib-", "ab_cde",
            "efe/ee", "inv alid", "-ab",
        ] {
            assert!(!is_valid_alias(alias), "{alias}");
        }
    }

    #[test]
    fn test_invalid_primary_alias() {
        let err = Opt::new(OptionId(0), "inv alid", Arity::Flag).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option: inv alid. Only alphanumeric characters."
        );
    }

    #[test]
    fn test_arity_predicates() {
        let optional = opt("a", Arity::Optional);
        assert!(optional.is_optional());
        assert!(!optional.is_flag());
        assert!(!optional.is_required());

        let flag = opt("b", Arity::Flag);
        assert!(flag.is_flag());

        let required = opt("c", Arity::Required);
        assert!(required.is_required());
    }

    #[test]
    fn test_flag_ignores_values() {
        let mut flag = opt("a", Arity::Flag);
        flag.set_value("hello").unwrap();
        assert!(flag.is_given());
        assert_eq!(flag.value(), None);
    }

    #[test]
    fn test_set_value_wraps_single_value() {
        let mut optional = opt("b", Arity::Optional);
        optional.set_value("hello").unwrap();
        assert_eq!(optional.values(), &[Value::from("hello")]);

        let mut required = opt("c", Arity::Required);
        required.set_value(10).unwrap();
        assert_eq!(required.value(), Some(&Value::Int(10)));
    }

    #[test]
    fn test_empty_list_marks_given_and_keeps_default() {
        let mut optional = opt("b", Arity::Optional);
        optional.set_default(vec![Value::Int(3)]).unwrap();
        optional.set_values(Vec::new()).unwrap();
        assert!(optional.is_given());
        assert_eq!(optional.value(), Some(&Value::Int(3)));
    }

    #[test]
    fn test_rejected_value_keeps_previous() {
        let mut option = opt("a", Arity::Required);
        option.set_rule(Rule::Int).unwrap();
        option.set_value(10).unwrap();

        let err = option.set_value(10.1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value. Option: a Value: 10.1.");
        assert_eq!(option.value(), Some(&Value::Int(10)));
    }

    #[test]
    fn test_error_names_called_alias_and_first_offender() {
        let mut option = opt("n", Arity::Required);
        option.set_rule(Rule::Number).unwrap();
        option.set_used_alias("number");

        let err = option
            .set_values(vec![Value::Int(1), Value::from("two"), Value::from("three")])
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::InvalidValue {
                option: "number".to_string(),
                value: "two".to_string()
            }
        );
        assert!(option.values().is_empty());
    }

    #[test]
    fn test_multi_rule_failure() {
        let mut option = opt("bounds", Arity::Required);
        option
            .set_rule(Rule::custom_multi(|values| values.len() == 2))
            .unwrap();

        let err = option.set_values(vec![Value::Int(1)]).unwrap_err();
        assert_eq!(err.to_string(), "Custom validation function failed.");

        option
            .set_values(vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(option.value_at(1), Some(&Value::Int(2)));
    }

    #[test]
    fn test_rule_set_once() {
        let mut option = opt("a", Arity::Required);
        option.set_rule(Rule::Int).unwrap();
        assert_eq!(
            option.set_rule(Rule::Float).unwrap_err(),
            ConfigurationError::RuleAlreadySet("a".to_string())
        );
    }

    #[test]
    fn test_default_on_flag() {
        let mut flag = opt("a", Arity::Flag);
        assert_eq!(
            flag.set_default(vec![Value::Int(1)]).unwrap_err(),
            ConfigurationError::DefaultOnFlag
        );
    }

    #[test]
    fn test_help_option_string() {
        let mut required = opt("n", Arity::Required);
        required.push_alias("name".to_string());
        assert_eq!(required.help(HelpMode::Option), "-n,--name (args...)");

        let optional = opt("repeat", Arity::Optional);
        assert_eq!(optional.help(HelpMode::Option), "--repeat [args...]");

        let mut flag = opt("h", Arity::Flag);
        flag.push_alias("help".to_string());
        flag.set_description("Shows the help text.".to_string());
        assert_eq!(flag.help(HelpMode::Option), "-h,--help");
        assert_eq!(flag.help(HelpMode::Description), "Shows the help text.");
    }
}
