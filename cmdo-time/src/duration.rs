//! Compact duration parsing (`1y2mo`, `3w`, `1h,30m`, `90s`).
//!
//! Units are matched case-insensitively, in the fixed order years, months, weeks, days, hours,
//! minutes, seconds. Trailing letters after a unit (`5min`, `2hours`) and separating commas are
//! accepted. The first non-empty run of units in the text wins.

use std::sync::LazyLock;

use chrono::{DateTime, Months, TimeDelta, Utc};
use cmdo_common::error::{CmdoError, CmdoResult};
use regex::{Captures, Regex};

const UNIT_SUFFIXES: [&str; 7] = ["y", "mo", "w", "d", "h", "m", "s"];

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let body = UNIT_SUFFIXES
        .iter()
        .map(|unit| format!("(?:([0-9]+){unit}[a-z]*,?)?"))
        .collect::<String>();
    Regex::new(&format!("(?i){body}")).expect("duration pattern is a valid regex")
});

/// Raw unit counts extracted from duration text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DurationParts {
    years: u32,
    months: u32,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl DurationParts {
    fn parse(text: &str) -> CmdoResult<Self> {
        let Some(captures) = DURATION_PATTERN
            .captures_iter(text)
            .find(|captures| captures.get(0).is_some_and(|whole| !whole.is_empty()))
        else {
            return Err(CmdoError::InvalidDuration(format!(
                "`{text}` contains no duration units"
            )));
        };

        Ok(Self {
            years: capture_number(&captures, 1, text)?,
            months: capture_number(&captures, 2, text)?,
            weeks: capture_number(&captures, 3, text)?,
            days: capture_number(&captures, 4, text)?,
            hours: capture_number(&captures, 5, text)?,
            minutes: capture_number(&captures, 6, text)?,
            seconds: capture_number(&captures, 7, text)?,
        })
    }

    fn apply(self, reference: DateTime<Utc>, max_years: u32, future: bool) -> Option<DateTime<Utc>> {
        let years = self.years.min(max_years);
        let mut instant = shift_months(reference, years.checked_mul(12)?, future)?;
        instant = shift_months(instant, self.months, future)?;
        for delta in [
            TimeDelta::try_weeks(self.weeks)?,
            TimeDelta::try_days(self.days)?,
            TimeDelta::try_hours(self.hours)?,
            TimeDelta::try_minutes(self.minutes)?,
            TimeDelta::try_seconds(self.seconds)?,
        ] {
            instant = shift_delta(instant, delta, future)?;
        }
        Some(instant)
    }
}

fn capture_number<T>(captures: &Captures<'_>, group: usize, text: &str) -> CmdoResult<T>
where
    T: std::str::FromStr + Default,
{
    let Some(digits) = captures.get(group) else {
        return Ok(T::default());
    };
    digits.as_str().parse::<T>().map_err(|_| {
        CmdoError::InvalidDuration(format!("`{}` in `{text}` is out of range", digits.as_str()))
    })
}

pub(crate) fn shift_months(
    instant: DateTime<Utc>,
    months: u32,
    future: bool,
) -> Option<DateTime<Utc>> {
    if months == 0 {
        return Some(instant);
    }
    if future {
        instant.checked_add_months(Months::new(months))
    } else {
        instant.checked_sub_months(Months::new(months))
    }
}

pub(crate) fn shift_delta(
    instant: DateTime<Utc>,
    delta: TimeDelta,
    future: bool,
) -> Option<DateTime<Utc>> {
    if future {
        instant.checked_add_signed(delta)
    } else {
        instant.checked_sub_signed(delta)
    }
}

/// Resolves duration text against `reference` and returns the unix timestamp in seconds.
///
/// `future` selects the direction of the span. The result never moves further than `max_years`
/// away from `reference`; spans overflowing the calendar are clamped to that horizon too.
///
/// # Errors
///
/// Returns [`CmdoError::InvalidDuration`] when no unit is present or a count does not fit.
pub fn parse_duration_from(
    reference: DateTime<Utc>,
    text: &str,
    future: bool,
    max_years: u32,
) -> CmdoResult<i64> {
    let parts = DurationParts::parse(text)?;
    let horizon = shift_months(reference, max_years.saturating_mul(12), future);
    let target = parts.apply(reference, max_years, future);

    let resolved = match (target, horizon) {
        (Some(target), Some(horizon)) if future => target.min(horizon),
        (Some(target), Some(horizon)) => target.max(horizon),
        (None, Some(horizon)) => horizon,
        (Some(target), None) => target,
        (None, None) => {
            return Err(CmdoError::InvalidDuration(format!(
                "`{text}` leaves the supported calendar range"
            )));
        }
    };
    Ok(resolved.timestamp())
}
