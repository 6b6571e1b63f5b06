//! Request-time routing over the command tree.
//!
//! Dispatch walks path segments case-insensitively to the deepest matching node, hands every
//! remaining token to that node's argument pipeline and reports the outcome. Completion walks
//! the same tree and suggests either child segments or argument values.
//!
//! Registered structure is read-only here; every call builds its own working state.

use cmdo_time::DurationParser;
use tracing::debug;

use crate::completers::ItemSet;
use crate::sender::{Sender, SenderKinds};

#[path = "dispatch/tree.rs"]
mod tree;
#[path = "dispatch/outcome.rs"]
mod outcome;
#[path = "dispatch/pipeline.rs"]
mod pipeline;
#[path = "dispatch/completion.rs"]
mod completion;

pub use outcome::{
    CommandCallback, DispatchCallbacks, DispatchOutcome, MissingCommandCallback,
    ValidationCallback, ValidationResult,
};
pub use tree::{CommandTree, TreeNode};

/// Shared read-only state borrowed by one request.
pub(crate) struct RequestContext<'a> {
    pub(crate) tree: &'a CommandTree,
    pub(crate) sender_kinds: &'a SenderKinds,
    pub(crate) callbacks: &'a DispatchCallbacks,
    pub(crate) durations: &'a dyn DurationParser,
}

impl RequestContext<'_> {
    /// Routes `tokens` to a command and runs it.
    pub(crate) fn dispatch(&self, sender: &dyn Sender, tokens: &[String]) -> DispatchOutcome {
        let mut node = self.tree.root();
        let mut consumed = 0;
        while let Some(child) = tokens.get(consumed).and_then(|token| node.child(token)) {
            node = child;
            consumed += 1;
        }
        let remaining = &tokens[consumed..];

        let command = node
            .command_id()
            .and_then(|id| self.tree.command(id))
            .filter(|command| command.has_handler());
        let Some(command) = command else {
            let failing = remaining.first().map_or("", String::as_str);
            let candidates = self.tree.collect_under(node, failing);
            debug!(segment = failing, candidates = candidates.len(), "missing command");
            self.callbacks.missing_command(sender, &candidates);
            return DispatchOutcome::MissingCommand {
                candidates: candidates.iter().map(|command| command.id()).collect(),
            };
        };

        if !command.allows_sender(sender, self.sender_kinds) {
            debug!(command = command.id(), kind = %sender.kind(), "sender excluded");
            return DispatchOutcome::SenderExcluded {
                command: command.id(),
            };
        }
        if !command.check_permissions(sender, remaining) {
            debug!(command = command.id(), "no permission");
            self.callbacks.no_permission(sender, command);
            return DispatchOutcome::NoPermission {
                command: command.id(),
            };
        }

        debug!(command = command.id(), arguments = remaining.len(), "dispatching");
        pipeline::run(self, command, sender, remaining)
    }

    /// Suggestions for the last token of `tokens`.
    pub(crate) fn complete(&self, sender: &dyn Sender, tokens: &[String]) -> ItemSet {
        completion::complete(self, sender, tokens)
    }
}
