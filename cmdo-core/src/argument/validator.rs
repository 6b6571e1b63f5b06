use cmdo_time::DurationParser;
use tracing::trace;

use super::{ArgumentSpec, ArgumentType};
use crate::sender::Sender;

/// Reason an argument value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// Value does not parse as the declared type.
    IncorrectType,
    /// Numeric value below `min`.
    MinLimit,
    /// Numeric value above `max`.
    MaxLimit,
    /// Text shorter than `min_length`.
    MinLength,
    /// Text longer than `max_length`.
    MaxLength,
    /// Text does not match the pattern.
    Pattern,
    /// Rejected by the completion capability.
    Other,
}

/// Checks one raw token against its argument definition.
///
/// Arguments with a completion capability (custom handler or enumerable type) are checked by
/// that capability alone; a capability that fails to enumerate rejects the value.
///
/// # Errors
///
/// Returns the [`ValidationStatus`] describing the first violated rule.
pub fn validate(
    argument: &ArgumentSpec,
    sender: &dyn Sender,
    value: &str,
    dependencies: &[String],
    durations: &dyn DurationParser,
) -> Result<(), ValidationStatus> {
    let handler = argument
        .effective_handler()
        .map_err(|_| ValidationStatus::Other)?;
    if let Some(handler) = handler {
        let items = handler
            .items(sender, value, dependencies)
            .map_err(|_| ValidationStatus::Other)?;
        return if handler.accepts(&items, value) {
            Ok(())
        } else {
            Err(ValidationStatus::Other)
        };
    }

    trace!(argument = argument.name(), kind = argument.argument_type().name(), "validate value");
    match argument.argument_type() {
        ArgumentType::String => check_text(argument, value),
        ArgumentType::Number => {
            let number = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .ok_or(ValidationStatus::IncorrectType)?;
            check_bounds(argument, number)
        }
        ArgumentType::Integer => {
            let integer = value
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationStatus::IncorrectType)?;
            check_integer_bounds(argument, integer)
        }
        ArgumentType::Duration => durations
            .parse_duration(value)
            .map(|_| ())
            .map_err(|_| ValidationStatus::IncorrectType),
        ArgumentType::Other | ArgumentType::Enumerable(_) => Ok(()),
    }
}

fn check_text(argument: &ArgumentSpec, value: &str) -> Result<(), ValidationStatus> {
    let length = value.chars().count();
    if length < argument.min_length() {
        return Err(ValidationStatus::MinLength);
    }
    if length > argument.max_length() {
        return Err(ValidationStatus::MaxLength);
    }
    if argument
        .pattern()
        .is_some_and(|pattern| !pattern.is_match(value))
    {
        return Err(ValidationStatus::Pattern);
    }
    Ok(())
}

fn check_integer_bounds(argument: &ArgumentSpec, integer: i64) -> Result<(), ValidationStatus> {
    // `as` saturates, so unbounded sides map onto the ends of the i64 range.
    #[allow(clippy::cast_possible_truncation)]
    let (min, max) = (argument.min().ceil() as i64, argument.max().floor() as i64);
    if integer < min {
        return Err(ValidationStatus::MinLimit);
    }
    if integer > max {
        return Err(ValidationStatus::MaxLimit);
    }
    Ok(())
}

fn check_bounds(argument: &ArgumentSpec, number: f64) -> Result<(), ValidationStatus> {
    if number < argument.min() {
        return Err(ValidationStatus::MinLimit);
    }
    if number > argument.max() {
        return Err(ValidationStatus::MaxLimit);
    }
    Ok(())
}
