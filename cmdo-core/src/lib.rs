//! Command tree dispatcher with typed argument validation and tab completion.
//!
//! Hosts register commands through [`Commando::register_command`], then feed raw token
//! sequences to [`Commando::dispatch`] and [`Commando::complete`]. Nothing here performs I/O;
//! permission answers, enumerable value sources and duration parsing are supplied by the host.

pub mod argument;
pub mod command;
pub mod completers;
pub mod containers;
pub mod dispatch;
pub mod sender;

#[cfg(test)]
mod testkit;

use std::fmt;
use std::sync::Arc;

use cmdo_common::config::CommandoConfig;
use cmdo_common::error::CmdoResult;
use cmdo_common::ids::{CommandId, SenderKind};
use cmdo_time::{CalendarDurationParser, DurationParser};
use command::{CommandBuilder, CommandNode};
use completers::ItemSet;
use dispatch::{CommandTree, DispatchCallbacks, DispatchOutcome, RequestContext, ValidationResult};
use sender::{Sender, SenderKinds};

/// Dispatcher entry point owning the command tree and the host callbacks.
///
/// Registration needs `&mut self`; dispatch and completion only borrow, so a fully registered
/// instance can be shared across threads.
pub struct Commando {
    config: CommandoConfig,
    tree: CommandTree,
    sender_kinds: SenderKinds,
    callbacks: DispatchCallbacks,
    durations: Arc<dyn DurationParser>,
}

impl Commando {
    /// Creates an empty dispatcher with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CommandoConfig::default())
    }

    /// Creates an empty dispatcher from explicit configuration.
    #[must_use]
    pub fn with_config(config: CommandoConfig) -> Self {
        let durations = Arc::new(CalendarDurationParser::from_config(&config));
        Self {
            config,
            tree: CommandTree::new(),
            sender_kinds: SenderKinds::new(),
            callbacks: DispatchCallbacks::default(),
            durations,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CommandoConfig {
        &self.config
    }

    /// Registered commands.
    #[must_use]
    pub const fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Command by registration index.
    #[must_use]
    pub fn command(&self, id: CommandId) -> Option<&CommandNode> {
        self.tree.command(id)
    }

    /// Declared sender kind capabilities.
    #[must_use]
    pub const fn sender_kinds(&self) -> &SenderKinds {
        &self.sender_kinds
    }

    /// Starts registering a command at the whitespace separated `path`.
    ///
    /// # Errors
    ///
    /// Fails for a blank path or a path that already holds a command.
    pub fn register_command(&mut self, path: &str) -> CmdoResult<CommandBuilder<'_>> {
        CommandBuilder::new(&mut self.tree, path, &self.config.help_prefix)
    }

    /// Declares the direct capabilities of a sender kind.
    ///
    /// # Errors
    ///
    /// Fails when `kind` was declared before.
    pub fn declare_sender_kind(
        &mut self,
        kind: SenderKind,
        capabilities: impl IntoIterator<Item = SenderKind>,
    ) -> CmdoResult<()> {
        self.sender_kinds.declare(kind, capabilities)
    }

    /// Replaces the parser used by `Duration` arguments.
    pub fn set_duration_parser(&mut self, parser: impl DurationParser + 'static) {
        self.durations = Arc::new(parser);
    }

    /// Registers the callback for senders lacking every permission alternative.
    ///
    /// # Errors
    ///
    /// Fails when the callback was registered before.
    pub fn on_no_permission<F>(&mut self, callback: F) -> CmdoResult<()>
    where
        F: Fn(&dyn Sender, &CommandNode) + Send + Sync + 'static,
    {
        self.callbacks.set_no_permission(Box::new(callback))
    }

    /// Registers the callback for required arguments without token or default.
    ///
    /// # Errors
    ///
    /// Fails when the callback was registered before.
    pub fn on_missing_argument<F>(&mut self, callback: F) -> CmdoResult<()>
    where
        F: Fn(&dyn Sender, &CommandNode) + Send + Sync + 'static,
    {
        self.callbacks.set_missing_argument(Box::new(callback))
    }

    /// Registers the callback for unknown commands; it receives related commands.
    ///
    /// # Errors
    ///
    /// Fails when the callback was registered before.
    pub fn on_missing_command<F>(&mut self, callback: F) -> CmdoResult<()>
    where
        F: Fn(&dyn Sender, &[&CommandNode]) + Send + Sync + 'static,
    {
        self.callbacks.set_missing_command(Box::new(callback))
    }

    /// Registers the callback for rejected argument values.
    ///
    /// # Errors
    ///
    /// Fails when the callback was registered before.
    pub fn on_validation_failure<F>(&mut self, callback: F) -> CmdoResult<()>
    where
        F: Fn(&ValidationResult<'_>) + Send + Sync + 'static,
    {
        self.callbacks.set_validation_failed(Box::new(callback))
    }

    /// Routes `tokens` to a command, resolves its arguments and runs its handler.
    pub fn dispatch<S: AsRef<str>>(&self, sender: &dyn Sender, tokens: &[S]) -> DispatchOutcome {
        self.context().dispatch(sender, &owned(tokens))
    }

    /// Suggestions for the last (possibly empty) token.
    #[must_use]
    pub fn complete<S: AsRef<str>>(&self, sender: &dyn Sender, tokens: &[S]) -> ItemSet {
        self.context().complete(sender, &owned(tokens))
    }

    /// Suggestions sorted case-insensitively, for hosts that display them directly.
    #[must_use]
    pub fn complete_sorted<S: AsRef<str>>(&self, sender: &dyn Sender, tokens: &[S]) -> Vec<String> {
        let mut suggestions: Vec<String> = self.complete(sender, tokens).into_iter().collect();
        suggestions.sort_by_cached_key(|suggestion| (suggestion.to_lowercase(), suggestion.clone()));
        suggestions
    }

    /// Help lines of executable commands in registration order, limited to commands the sender
    /// may run when a sender is given.
    #[must_use]
    pub fn list_help_texts(&self, sender: Option<&dyn Sender>) -> Vec<String> {
        self.tree
            .commands()
            .iter()
            .filter(|command| command.has_handler())
            .filter(|command| {
                sender.is_none_or(|sender| {
                    command.allows_sender(sender, &self.sender_kinds)
                        && command.check_permissions(sender, &[])
                })
            })
            .map(|command| command.help_text().to_owned())
            .collect()
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            tree: &self.tree,
            sender_kinds: &self.sender_kinds,
            callbacks: &self.callbacks,
            durations: self.durations.as_ref(),
        }
    }
}

impl Default for Commando {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Commando {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commando")
            .field("config", &self.config)
            .field("commands", &self.tree.len())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

fn owned<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|token| token.as_ref().to_owned()).collect()
}
