//! Human readable distance between two instants.
//!
//! Output keeps the two most significant non-zero units and uses placeholder unit names
//! (`<hour>`, `<days>`, ...) so hosts can localize them.

use chrono::{DateTime, Datelike, TimeDelta, Utc};

use crate::duration::{shift_delta, shift_months};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl CalendarUnit {
    const ORDER: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    fn label(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Self::Year, false) => "<year>",
            (Self::Year, true) => "<years>",
            (Self::Month, false) => "<month>",
            (Self::Month, true) => "<months>",
            (Self::Day, false) => "<day>",
            (Self::Day, true) => "<days>",
            (Self::Hour, false) => "<hour>",
            (Self::Hour, true) => "<hours>",
            (Self::Minute, false) => "<minute>",
            (Self::Minute, true) => "<minutes>",
            (Self::Second, false) => "<second>",
            (Self::Second, true) => "<seconds>",
        }
    }

    fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Day => Some(86_400),
            Self::Hour => Some(3_600),
            Self::Minute => Some(60),
            Self::Second => Some(1),
        }
    }

    fn step(self, instant: DateTime<Utc>, count: i64, future: bool) -> Option<DateTime<Utc>> {
        match self {
            Self::Year => shift_months(instant, u32::try_from(count.checked_mul(12)?).ok()?, future),
            Self::Month => shift_months(instant, u32::try_from(count).ok()?, future),
            Self::Day | Self::Hour | Self::Minute | Self::Second => {
                let seconds = count.checked_mul(self.fixed_seconds()?)?;
                shift_delta(instant, TimeDelta::try_seconds(seconds)?, future)
            }
        }
    }
}

fn overshoots(candidate: Option<DateTime<Utc>>, target: DateTime<Utc>, future: bool) -> bool {
    match candidate {
        None => true,
        Some(candidate) if future => candidate > target,
        Some(candidate) => candidate < target,
    }
}

/// Largest number of whole `unit`s that fit between `cursor` and `target`, with the advanced
/// cursor.
fn whole_units(
    unit: CalendarUnit,
    cursor: DateTime<Utc>,
    target: DateTime<Utc>,
    future: bool,
) -> (i64, DateTime<Utc>) {
    let mut count = if let Some(unit_seconds) = unit.fixed_seconds() {
        (target - cursor).num_seconds().abs() / unit_seconds
    } else {
        let months = (i64::from(target.year()) - i64::from(cursor.year())) * 12
            + (i64::from(target.month()) - i64::from(cursor.month()));
        let months = months.abs();
        if unit == CalendarUnit::Year { months / 12 } else { months }
    };

    while count > 0 && overshoots(unit.step(cursor, count, future), target, future) {
        count -= 1;
    }
    while !overshoots(unit.step(cursor, count.saturating_add(1), future), target, future) {
        count = count.saturating_add(1);
    }

    let advanced = unit.step(cursor, count, future).unwrap_or(cursor);
    (count, advanced)
}

/// Formats the distance from `from` to `to`, e.g. `1 <hour>` or `2 <days> 3 <hours>`.
///
/// Returns `<now>` when both instants are equal or closer than one second.
#[must_use]
pub fn format_date_diff(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let future = to > from;
    let mut cursor = from;
    let mut parts = Vec::with_capacity(2);

    for unit in CalendarUnit::ORDER {
        if parts.len() == 2 {
            break;
        }
        let (count, advanced) = whole_units(unit, cursor, to, future);
        if count > 0 {
            cursor = advanced;
            parts.push(format!("{count} {}", unit.label(count > 1)));
        }
    }

    if parts.is_empty() {
        return "<now>".to_owned();
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::format_date_diff;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use googletest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn from() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0)
            .single()
            .expect("fixed instant is unambiguous")
    }

    #[rstest]
    fn equal_instants_format_as_now(from: DateTime<Utc>) {
        assert_that!(format_date_diff(from, from).as_str(), eq("<now>"));
    }

    #[rstest]
    fn single_hour_uses_singular_label(from: DateTime<Utc>) {
        let to = from + TimeDelta::hours(1);
        assert_that!(format_date_diff(from, to).as_str(), eq("1 <hour>"));
    }

    #[rstest]
    fn keeps_two_most_significant_units(from: DateTime<Utc>) {
        let to = Utc
            .with_ymd_and_hms(2020, 3, 15, 10, 30, 5)
            .single()
            .expect("target instant is unambiguous");
        assert_that!(format_date_diff(from, to).as_str(), eq("1 <year> 2 <months>"));
    }

    #[rstest]
    fn skips_zero_units_between_significant_ones(from: DateTime<Utc>) {
        let to = from + TimeDelta::days(2) + TimeDelta::minutes(3);
        assert_that!(format_date_diff(from, to).as_str(), eq("2 <days> 3 <minutes>"));
    }

    #[rstest]
    fn past_distances_use_absolute_counts(from: DateTime<Utc>) {
        let to = from - TimeDelta::minutes(90);
        assert_that!(format_date_diff(from, to).as_str(), eq("1 <hour> 30 <minutes>"));
    }
}
