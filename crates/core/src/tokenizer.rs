//! Raw argument tokenizing.
//!
//! Splits the process arguments into option keys and the values attached to
//! them. Nothing here knows which options a script declared; resolving keys
//! is the lifecycle's job.
//!
//! ```
//! use clip_core::tokenizer::tokenize;
//! use clip_core::value::Value;
//!
//! let parsed = tokenize(["prog", "--bounds", "-10", "10", "-r"]);
//! assert_eq!(parsed.options["bounds"], vec![Value::Int(-10), Value::Int(10)]);
//! assert!(parsed.options["r"].is_empty());
//! ```

use indexmap::IndexMap;
use log::{debug, warn};

use crate::value::Value;

/// Output of [`tokenize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Key as typed (without dashes) to the values that followed it.
    pub options: IndexMap<String, Vec<Value>>,
    /// Value tokens that appeared before any key.
    pub orphans: Vec<String>,
}

/// Classification of a single argument token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `-abc`, expands to `a`, `b` and `c`.
    ShortGroup(&'a str),
    /// `-a`
    Short(&'a str),
    /// `--no-contrib`
    Long(&'a str),
    Value(&'a str),
}

impl<'a> Token<'a> {
    #[must_use]
    pub fn classify(arg: &'a str) -> Self {
        if let Some(name) = arg.strip_prefix("--") {
            if is_long_name(name) {
                return Token::Long(name);
            }
            return Token::Value(arg);
        }

        if let Some(letters) = arg.strip_prefix('-') {
            if !letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphabetic()) {
                return if letters.len() == 1 {
                    Token::Short(letters)
                } else {
                    Token::ShortGroup(letters)
                };
            }
        }

        Token::Value(arg)
    }
}

/// Long names are dash-joined segments, each a letter followed by at least
/// one alphanumeric character.
fn is_long_name(name: &str) -> bool {
    name.split('-').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                let rest = chars.as_str();
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
            }
            _ => false,
        }
    })
}

/// Tokenizes process arguments. The first element is the program name and is
/// always dropped.
///
/// A key typed twice keeps its first position and collects the values of
/// both occurrences.
pub fn tokenize<I, S>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArgs::default();
    let mut current: Option<String> = None;

    for arg in args.into_iter().skip(1) {
        let arg = arg.as_ref();
        match Token::classify(arg) {
            Token::ShortGroup(letters) => {
                debug!("Expanding short option group `{arg}`");
                for letter in letters.chars() {
                    let key = letter.to_string();
                    parsed.options.entry(key.clone()).or_default();
                    current = Some(key);
                }
            }
            Token::Short(name) | Token::Long(name) => {
                parsed.options.entry(name.to_string()).or_default();
                current = Some(name.to_string());
            }
            Token::Value(raw) => match &current {
                Some(key) => {
                    let value = Value::from_token(raw);
                    debug!("Attaching {value:?} to `{key}`");
                    parsed.options.entry(key.clone()).or_default().push(value);
                }
                None => {
                    warn!("Discarding orphan argument `{raw}`");
                    parsed.orphans.push(raw.to_string());
                }
            },
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(parsed: &ParsedArgs) -> Vec<&str> {
        parsed.options.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_program_name_is_discarded() {
        let parsed = tokenize(["-a"]);
        assert!(parsed.options.is_empty());
        assert!(parsed.orphans.is_empty());

        let parsed = tokenize(["prog"]);
        assert!(parsed.options.is_empty());

        let parsed = tokenize(Vec::<String>::new());
        assert_eq!(parsed, ParsedArgs::default());
    }

    #[test]
    fn test_orphan_before_first_key() {
        let parsed = tokenize(["prog", "orphan", "-a", "1"]);
        assert_eq!(parsed.orphans, vec!["orphan".to_string()]);
        assert_eq!(keys(&parsed), vec!["a"]);
        assert_eq!(parsed.options["a"], vec![Value::Int(1)]);
    }

    #[test]
    fn test_short_group_expands_in_order() {
        let parsed = tokenize(["prog", "-abc"]);
        assert_eq!(keys(&parsed), vec!["a", "b", "c"]);
        assert!(parsed.options.values().all(Vec::is_empty));
    }

    #[test]
    fn test_group_values_attach_to_last_letter() {
        let parsed = tokenize(["prog", "-xy", "value"]);
        assert!(parsed.options["x"].is_empty());
        assert_eq!(parsed.options["y"], vec![Value::from("value")]);
    }

    #[test]
    fn test_negative_number_is_a_value() {
        let parsed = tokenize(["prog", "-a", "-10", "-z1"]);
        assert_eq!(keys(&parsed), vec!["a"]);
        assert_eq!(
            parsed.options["a"],
            vec![Value::Int(-10), Value::Str("-z1".to_string())]
        );
    }

    #[test]
    fn test_negative_number_before_any_key_is_orphan() {
        let parsed = tokenize(["prog", "-10", "-a"]);
        assert_eq!(parsed.orphans, vec!["-10".to_string()]);
        assert_eq!(keys(&parsed), vec!["a"]);
    }

    #[test]
    fn test_mixed_invocation() {
        let parsed = tokenize([
            "filename",
            "orphan element",
            "-a",
            "value",
            "-10",
            "-z1",
            "-b",
            "--help",
            "----weirdval",
            "another",
            "-def-g",
            "--with-dash",
        ]);

        assert_eq!(parsed.orphans, vec!["orphan element".to_string()]);
        assert_eq!(keys(&parsed), vec!["a", "b", "help", "with-dash"]);
        assert_eq!(
            parsed.options["a"],
            vec![Value::from("value"), Value::Int(-10), Value::from("-z1")]
        );
        assert!(parsed.options["b"].is_empty());
        assert_eq!(
            parsed.options["help"],
            vec![
                Value::from("----weirdval"),
                Value::from("another"),
                Value::from("-def-g")
            ]
        );
        assert!(parsed.options["with-dash"].is_empty());
    }

    #[test]
    fn test_repeated_key_accumulates() {
        let parsed = tokenize(["prog", "-a", "1", "-b", "-a", "2"]);
        assert_eq!(keys(&parsed), vec!["a", "b"]);
        assert_eq!(parsed.options["a"], vec![Value::Int(1), Value::Int(2)]);
        assert!(parsed.options["b"].is_empty());
    }

    #[test]
    fn test_long_option_grammar() {
        for name in ["--ab", "--abc", "--no-cont-rib", "--no-contrib", "--a1"] {
            assert!(matches!(Token::classify(name), Token::Long(_)), "{name}");
        }

        for name in [
            "--99-9999",
            "--ab-a",
            "--ab-",
            "--ab--",
            "---no-contrib",
            "---no--contrib",
            "--n-o-co-o",
            "--no-contrib-",
            "--a",
            "--",
        ] {
            assert_eq!(Token::classify(name), Token::Value(name), "{name}");
        }
    }

    #[test]
    fn test_short_option_grammar() {
        assert_eq!(Token::classify("-a"), Token::Short("a"));
        assert_eq!(Token::classify("-ab"), Token::ShortGroup("ab"));
        assert_eq!(Token::classify("-"), Token::Value("-"));
        assert_eq!(Token::classify("-1"), Token::Value("-1"));
        assert_eq!(Token::classify("-a1"), Token::Value("-a1"));
    }
}
