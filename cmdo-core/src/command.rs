//! Command nodes and their registration builder.

use std::fmt;
use std::sync::{Arc, LazyLock};

use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::{CommandId, SenderKind};
use regex::{Captures, Regex};

use crate::argument::ArgumentSpec;
use crate::dispatch::CommandTree;
use crate::sender::{Sender, SenderKinds};

/// Handler invoked with the resolved argument tokens and the number of tokens typed by the
/// sender (the rest were filled from defaults).
pub type CommandHandler = Arc<dyn Fn(&dyn Sender, &[String], usize) + Send + Sync>;

static PERMISSION_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]+)\]").expect("permission placeholder is a valid regex")
});

/// Substitutes `[N]` in a permission template with the Nth argument token.
///
/// Placeholders pointing past the supplied tokens are kept literally.
#[must_use]
pub fn render_permission(template: &str, arguments: &[String]) -> String {
    PERMISSION_PLACEHOLDER
        .replace_all(template, |captures: &Captures<'_>| {
            captures[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| arguments.get(index))
                .map_or_else(|| captures[0].to_owned(), Clone::clone)
        })
        .into_owned()
}

/// Argument slot of a command: the argument plus the positions of its dependencies.
#[derive(Debug, Clone)]
pub(crate) struct CommandArgument {
    pub(crate) spec: ArgumentSpec,
    pub(crate) dependency_slots: Vec<usize>,
}

impl CommandArgument {
    /// Values of this argument's dependencies, taken from the tokens at their positions.
    pub(crate) fn dependency_values(&self, tokens: &[String]) -> Vec<String> {
        self.dependency_slots
            .iter()
            .filter_map(|&slot| tokens.get(slot).cloned())
            .collect()
    }
}

/// One addressable command.
pub struct CommandNode {
    id: CommandId,
    path: Vec<String>,
    arguments: Vec<CommandArgument>,
    handler: Option<CommandHandler>,
    permissions: Vec<String>,
    excluded_senders: Vec<SenderKind>,
    help_text: String,
}

impl CommandNode {
    /// Registration index of this command.
    #[must_use]
    pub const fn id(&self) -> CommandId {
        self.id
    }

    /// Path segments as registered.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Ordered argument definitions.
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().map(|argument| &argument.spec)
    }

    /// Argument at `index`.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&ArgumentSpec> {
        self.arguments.get(index).map(|argument| &argument.spec)
    }

    /// True when the command declares at least one argument.
    #[must_use]
    pub fn may_have_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// True when the command can be executed; branch-only nodes have no handler.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Permission alternatives; the sender needs any one of them.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Sender kinds that may not run this command.
    #[must_use]
    pub fn excluded_senders(&self) -> &[SenderKind] {
        &self.excluded_senders
    }

    /// Usage line, e.g. `/ban <player> [reason]`.
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// True when the command has no permission alternatives or the sender holds one of them
    /// after `[N]` substitution with `arguments`.
    #[must_use]
    pub fn check_permissions(&self, sender: &dyn Sender, arguments: &[String]) -> bool {
        self.permissions.is_empty()
            || self
                .permissions
                .iter()
                .any(|template| sender.has_permission(&render_permission(template, arguments)))
    }

    /// False when the sender's kind, or any capability of it, is excluded.
    #[must_use]
    pub fn allows_sender(&self, sender: &dyn Sender, kinds: &SenderKinds) -> bool {
        if self.excluded_senders.is_empty() {
            return true;
        }
        !kinds
            .capabilities(sender.kind())
            .iter()
            .any(|capability| self.excluded_senders.contains(capability))
    }

    /// Number of arguments the sender may use that have a default for the sender's kind.
    #[must_use]
    pub fn defaulted_argument_count(&self, sender: &dyn Sender, kinds: &SenderKinds) -> usize {
        self.arguments()
            .filter(|argument| {
                argument.allows(sender) && argument.default_for(sender.kind(), kinds).is_some()
            })
            .count()
    }

    pub(crate) fn slots(&self) -> &[CommandArgument] {
        &self.arguments
    }

    pub(crate) fn handler(&self) -> Option<&CommandHandler> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("arguments", &self.arguments)
            .field("has_handler", &self.handler.is_some())
            .field("permissions", &self.permissions)
            .field("excluded_senders", &self.excluded_senders)
            .field("help_text", &self.help_text)
            .finish()
    }
}

/// Builder registering one command into a [`CommandTree`].
///
/// Obtained from `Commando::register_command`; nothing is added to the tree until
/// [`CommandBuilder::register`] succeeds.
pub struct CommandBuilder<'a> {
    tree: &'a mut CommandTree,
    path: Vec<String>,
    arguments: Vec<CommandArgument>,
    handler: Option<CommandHandler>,
    permissions: Vec<String>,
    excluded_senders: Vec<SenderKind>,
    help_prefix: String,
}

impl<'a> CommandBuilder<'a> {
    /// Starts a command at the whitespace separated `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::EmptyPath`] for a blank path and [`CmdoError::DuplicateCommand`]
    /// when the path is already taken.
    pub fn new(tree: &'a mut CommandTree, path: &str, help_prefix: &str) -> CmdoResult<Self> {
        let path: Vec<String> = path.split_whitespace().map(str::to_owned).collect();
        if path.is_empty() {
            return Err(CmdoError::EmptyPath);
        }
        if tree.is_occupied(&path) {
            return Err(CmdoError::DuplicateCommand(path.join(" ")));
        }
        Ok(Self {
            tree,
            path,
            arguments: Vec::new(),
            handler: None,
            permissions: Vec::new(),
            excluded_senders: Vec::new(),
            help_prefix: help_prefix.to_owned(),
        })
    }

    /// Appends an argument.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name, after a catch-remaining argument, when a required argument
    /// follows an optional one, or when a dependency is not an earlier argument of this command.
    pub fn argument(mut self, spec: ArgumentSpec) -> CmdoResult<Self> {
        if self
            .arguments
            .iter()
            .any(|existing| existing.spec.name() == spec.name())
        {
            return Err(CmdoError::DuplicateArgument(spec.name().to_owned()));
        }
        if let Some(last) = self.arguments.last() {
            if last.spec.is_catch_remaining() {
                return Err(CmdoError::CatchRemainingNotLast(spec.name().to_owned()));
            }
            if last.spec.is_optional() && !spec.is_optional() {
                return Err(CmdoError::RequiredAfterOptional(spec.name().to_owned()));
            }
        }

        let dependency_slots = spec
            .dependencies()
            .iter()
            .map(|dependency| {
                self.arguments
                    .iter()
                    .position(|existing| existing.spec.name() == dependency)
                    .ok_or_else(|| CmdoError::UnknownDependency {
                        argument: spec.name().to_owned(),
                        dependency: dependency.clone(),
                    })
            })
            .collect::<CmdoResult<Vec<_>>>()?;

        self.arguments.push(CommandArgument {
            spec,
            dependency_slots,
        });
        Ok(self)
    }

    /// Sets the handler run after every argument resolved.
    #[must_use]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn Sender, &[String], usize) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Adds a permission alternative; `[N]` is replaced with the Nth argument token.
    #[must_use]
    pub fn requires_permission(mut self, template: impl Into<String>) -> Self {
        self.permissions.push(template.into());
        self
    }

    /// Excludes senders of `kind` (and kinds declaring it as a capability).
    #[must_use]
    pub fn exclude_sender(mut self, kind: SenderKind) -> Self {
        if !self.excluded_senders.contains(&kind) {
            self.excluded_senders.push(kind);
        }
        self
    }

    /// Excludes the console.
    #[must_use]
    pub fn prevent_console(self) -> Self {
        self.exclude_sender(SenderKind::CONSOLE)
    }

    /// Excludes interactive players.
    #[must_use]
    pub fn prevent_player(self) -> Self {
        self.exclude_sender(SenderKind::PLAYER)
    }

    /// Inserts the command into the tree.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::DuplicateCommand`] if the path is taken.
    pub fn register(self) -> CmdoResult<CommandId> {
        let help_text = self.help_text();
        let node = CommandNode {
            id: self.tree.len(),
            path: self.path,
            arguments: self.arguments,
            handler: self.handler,
            permissions: self.permissions,
            excluded_senders: self.excluded_senders,
            help_text,
        };
        self.tree.insert(node)
    }

    fn help_text(&self) -> String {
        let mut text = format!("{}{}", self.help_prefix, self.path.join(" "));
        for argument in &self.arguments {
            let name = argument.spec.name();
            if argument.spec.is_optional() {
                text.push_str(&format!(" [{name}]"));
            } else {
                text.push_str(&format!(" <{name}>"));
            }
        }
        text
    }
}
