use crate::completers::{EnumerableType, BOOLEAN};

/// Declared type of an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    /// Free text, optionally constrained by length and pattern.
    String,
    /// Whole number within `[min, max]`.
    Integer,
    /// Decimal number within `[min, max]`.
    Number,
    /// Compact duration text such as `1h,30m`.
    Duration,
    /// Value accepted by a custom handler.
    Other,
    /// Value drawn from a built-in enumerable source.
    Enumerable(&'static EnumerableType),
}

impl ArgumentType {
    /// Literal `true` / `false`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Enumerable(&BOOLEAN)
    }

    /// Primitive types are validated without a completion capability.
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Number | Self::Duration
        )
    }

    /// Numeric types honor `min` / `max`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    /// Stable type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Duration => "duration",
            Self::Other => "other",
            Self::Enumerable(enumerable) => enumerable.name(),
        }
    }
}
