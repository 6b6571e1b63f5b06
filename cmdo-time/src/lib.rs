//! Duration text handling used by `DURATION` arguments.
//!
//! The dispatcher only needs [`DurationParser`]; hosts with their own notion of time can plug in
//! a different implementation. [`CalendarDurationParser`] is the default one and understands
//! compact spans such as `1h,30m` or `2w3d`.

pub mod duration;
pub mod format;

use chrono::Utc;
use cmdo_common::config::CommandoConfig;
use cmdo_common::error::CmdoResult;

pub use duration::parse_duration_from;
pub use format::format_date_diff;

/// Converts duration text into an absolute unix timestamp in seconds.
pub trait DurationParser: Send + Sync {
    /// Parses `text` relative to the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`cmdo_common::error::CmdoError::InvalidDuration`] when the text holds no
    /// recognizable span.
    fn parse_duration(&self, text: &str) -> CmdoResult<i64>;
}

/// Calendar-aware parser resolving spans into the future from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDurationParser {
    max_years: u32,
}

impl CalendarDurationParser {
    /// Creates a parser clamping results to `max_years` from the reference instant.
    #[must_use]
    pub const fn new(max_years: u32) -> Self {
        Self { max_years }
    }

    /// Creates a parser using the configured horizon.
    #[must_use]
    pub fn from_config(config: &CommandoConfig) -> Self {
        Self::new(config.max_duration_years)
    }
}

impl Default for CalendarDurationParser {
    fn default() -> Self {
        Self::from_config(&CommandoConfig::default())
    }
}

impl DurationParser for CalendarDurationParser {
    fn parse_duration(&self, text: &str) -> CmdoResult<i64> {
        parse_duration_from(Utc::now(), text, true, self.max_years)
    }
}
