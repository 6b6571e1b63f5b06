//! Canonical identifier types used by registration and dispatch.

use std::fmt;

/// Index of a registered command inside its command tree, in registration order.
pub type CommandId = usize;

/// Category of a command sender.
///
/// Kinds drive default-value lookup and sender exclusion. Hosts declare extra kinds (and the
/// capabilities each kind carries) when they register the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SenderKind(&'static str);

impl SenderKind {
    /// Server console.
    pub const CONSOLE: Self = Self("console");
    /// Interactive player connection.
    pub const PLAYER: Self = Self("player");

    /// Creates a sender kind from its stable name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SenderKind;
    use googletest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(SenderKind::CONSOLE, "console")]
    #[case(SenderKind::PLAYER, "player")]
    #[case(SenderKind::new("command_block"), "command_block")]
    fn sender_kind_exposes_stable_name(#[case] kind: SenderKind, #[case] expected: &str) {
        assert_that!(kind.name(), eq(expected));
        assert_that!(kind.to_string().as_str(), eq(expected));
    }

    #[rstest]
    fn kinds_compare_by_name() {
        assert_that!(SenderKind::new("player"), eq(SenderKind::PLAYER));
        assert_that!(SenderKind::CONSOLE == SenderKind::PLAYER, eq(false));
    }
}
