use std::fmt;
use std::sync::Arc;

use crate::sender::Sender;

/// Typed default value, rendered to a token before it reaches the command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// No value; renders as an empty string.
    Absent,
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Number(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Text.
    Text(String),
}

impl ArgumentValue {
    /// Token text for this value.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for ArgumentValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<ArgumentValue>> From<Option<T>> for ArgumentValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Producer of a default value computed per request.
pub type DefaultFn = Arc<dyn Fn(&dyn Sender, &[String]) -> ArgumentValue + Send + Sync>;

/// Default used when no token is supplied for an optional argument.
#[derive(Clone)]
pub enum DefaultValue {
    /// Same value for every request.
    Constant(ArgumentValue),
    /// Computed from the sender and the tokens resolved so far.
    Computed(DefaultFn),
}

impl DefaultValue {
    /// Resolves the default for one request.
    #[must_use]
    pub fn resolve(&self, sender: &dyn Sender, resolved: &[String]) -> ArgumentValue {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Computed(producer) => producer(sender, resolved),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
