//! Values bound to options.
//!
//! Argument tokens that look like numbers are coerced before they reach an
//! option, so rules can tell integers and floats apart.

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric literal pattern is valid")
});

/// A single value bound to an option.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Whether `token` is a numeric literal such as `10`, `-10`, `1.5`, `.5` or `2e3`.
#[must_use]
pub fn is_numeric_literal(token: &str) -> bool {
    NUMERIC_LITERAL.is_match(token)
}

impl Value {
    /// Builds a value from a raw argument token, coercing numeric literals.
    ///
    /// Literals without a fraction or exponent become [`Value::Int`] when they
    /// fit, everything else numeric becomes [`Value::Float`].
    ///
    /// ```
    /// use clip_core::value::Value;
    ///
    /// assert_eq!(Value::from_token("-10"), Value::Int(-10));
    /// assert_eq!(Value::from_token("2.5"), Value::Float(2.5));
    /// assert_eq!(Value::from_token("-z1"), Value::Str("-z1".to_string()));
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if !is_numeric_literal(token) {
            return Self::Str(token.to_string());
        }

        let integral = !token.contains(['.', 'e', 'E']);
        if integral {
            if let Ok(int) = token.parse::<i64>() {
                return Self::Int(int);
            }
        }

        match token.parse::<f64>() {
            Ok(float) => Self::Float(float),
            Err(_) => Self::Str(token.to_string()),
        }
    }

    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(int) => Some(*int),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(int) => Some(*int as f64),
            Self::Float(float) => Some(*float),
            Self::Str(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Equality that compares numbers by magnitude, so `1` matches `1.0`.
    #[must_use]
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            _ => false,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Self::Float(float) if float == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(int) => write!(formatter, "{int}"),
            Self::Float(float) => write!(formatter, "{float}"),
            Self::Str(text) => formatter.write_str(text),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
