//! Dispatcher configuration shared by registration and request-time code.

/// Largest horizon accepted by the duration parser, in years.
pub const DEFAULT_MAX_DURATION_YEARS: u32 = 100_000;

/// Bootstrap configuration used when a `Commando` instance is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandoConfig {
    /// Prefix rendered in front of every help text line (e.g. `/ban <player>`).
    pub help_prefix: String,
    /// Parsed durations never reach further than this many years from the reference instant.
    pub max_duration_years: u32,
}

impl Default for CommandoConfig {
    fn default() -> Self {
        Self {
            help_prefix: "/".to_owned(),
            max_duration_years: DEFAULT_MAX_DURATION_YEARS,
        }
    }
}

impl CommandoConfig {
    /// Returns a copy with a different help prefix.
    #[must_use]
    pub fn with_help_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.help_prefix = prefix.into();
        self
    }

    /// Returns a copy with a different duration horizon.
    #[must_use]
    pub fn with_max_duration_years(mut self, years: u32) -> Self {
        self.max_duration_years = years;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandoConfig, DEFAULT_MAX_DURATION_YEARS};
    use googletest::prelude::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_uses_slash_prefix_and_full_horizon() {
        let config = CommandoConfig::default();
        assert_that!(config.help_prefix.as_str(), eq("/"));
        assert_that!(config.max_duration_years, eq(DEFAULT_MAX_DURATION_YEARS));
    }

    #[rstest]
    fn overrides_replace_single_fields() {
        let config = CommandoConfig::default()
            .with_help_prefix("!")
            .with_max_duration_years(10);
        assert_that!(config.help_prefix.as_str(), eq("!"));
        assert_that!(config.max_duration_years, eq(10_u32));
    }
}
