use std::fmt;

use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::CommandId;

use crate::argument::{ArgumentSpec, ValidationStatus};
use crate::command::CommandNode;
use crate::sender::Sender;

/// What a dispatch call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler ran with the resolved tokens.
    Executed {
        /// Executed command.
        command: CommandId,
        /// Resolved argument tokens, defaults included.
        arguments: Vec<String>,
        /// Tokens the sender actually typed.
        typed_arguments: usize,
    },
    /// Sender kind is excluded from the command; nothing is reported.
    SenderExcluded {
        /// Matched command.
        command: CommandId,
    },
    /// Sender holds none of the permission alternatives.
    NoPermission {
        /// Matched command.
        command: CommandId,
    },
    /// A required argument had neither a token nor a default.
    MissingArgument {
        /// Matched command.
        command: CommandId,
        /// Name of the missing argument.
        argument: String,
    },
    /// No executable command matched.
    MissingCommand {
        /// Commands related to the failing segment, in registration order.
        candidates: Vec<CommandId>,
    },
    /// An argument value was rejected.
    ValidationFailed {
        /// Matched command.
        command: CommandId,
        /// Name of the rejected argument.
        argument: String,
        /// Violated rule.
        status: ValidationStatus,
    },
}

impl DispatchOutcome {
    /// True when the command handler ran.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// Everything known about a rejected argument value.
pub struct ValidationResult<'a> {
    /// Violated rule.
    pub status: ValidationStatus,
    /// Command being dispatched.
    pub command: &'a CommandNode,
    /// Rejected argument.
    pub argument: &'a ArgumentSpec,
    /// Sender of the request.
    pub sender: &'a dyn Sender,
    /// Rejected token.
    pub value: &'a str,
    /// Resolved values of the argument's dependencies.
    pub dependencies: &'a [String],
}

impl fmt::Debug for ValidationResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("status", &self.status)
            .field("command", &self.command.path())
            .field("argument", &self.argument.name())
            .field("sender", &self.sender.kind())
            .field("value", &self.value)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Callback for conditions tied to one command.
pub type CommandCallback = Box<dyn Fn(&dyn Sender, &CommandNode) + Send + Sync>;
/// Callback receiving "did you mean" candidates.
pub type MissingCommandCallback = Box<dyn Fn(&dyn Sender, &[&CommandNode]) + Send + Sync>;
/// Callback receiving rejected argument values.
pub type ValidationCallback = Box<dyn Fn(&ValidationResult<'_>) + Send + Sync>;

/// Host callbacks for request-time conditions. Unset callbacks swallow their condition.
#[derive(Default)]
pub struct DispatchCallbacks {
    no_permission: Option<CommandCallback>,
    missing_argument: Option<CommandCallback>,
    missing_command: Option<MissingCommandCallback>,
    validation_failed: Option<ValidationCallback>,
}

impl DispatchCallbacks {
    /// Sets the no-permission callback.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::CallbackAlreadySet`] on a second call.
    pub fn set_no_permission(&mut self, callback: CommandCallback) -> CmdoResult<()> {
        store(&mut self.no_permission, callback, "no permission")
    }

    /// Sets the missing-argument callback.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::CallbackAlreadySet`] on a second call.
    pub fn set_missing_argument(&mut self, callback: CommandCallback) -> CmdoResult<()> {
        store(&mut self.missing_argument, callback, "missing argument")
    }

    /// Sets the missing-command callback.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::CallbackAlreadySet`] on a second call.
    pub fn set_missing_command(&mut self, callback: MissingCommandCallback) -> CmdoResult<()> {
        store(&mut self.missing_command, callback, "missing command")
    }

    /// Sets the validation-failure callback.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::CallbackAlreadySet`] on a second call.
    pub fn set_validation_failed(&mut self, callback: ValidationCallback) -> CmdoResult<()> {
        store(&mut self.validation_failed, callback, "validation failed")
    }

    pub(crate) fn no_permission(&self, sender: &dyn Sender, command: &CommandNode) {
        if let Some(callback) = &self.no_permission {
            callback(sender, command);
        }
    }

    pub(crate) fn missing_argument(&self, sender: &dyn Sender, command: &CommandNode) {
        if let Some(callback) = &self.missing_argument {
            callback(sender, command);
        }
    }

    pub(crate) fn missing_command(&self, sender: &dyn Sender, candidates: &[&CommandNode]) {
        if let Some(callback) = &self.missing_command {
            callback(sender, candidates);
        }
    }

    pub(crate) fn validation_failed(&self, result: &ValidationResult<'_>) {
        if let Some(callback) = &self.validation_failed {
            callback(result);
        }
    }
}

impl fmt::Debug for DispatchCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCallbacks")
            .field("no_permission", &self.no_permission.is_some())
            .field("missing_argument", &self.missing_argument.is_some())
            .field("missing_command", &self.missing_command.is_some())
            .field("validation_failed", &self.validation_failed.is_some())
            .finish()
    }
}

fn store<T>(slot: &mut Option<T>, callback: T, name: &'static str) -> CmdoResult<()> {
    if slot.is_some() {
        return Err(CmdoError::CallbackAlreadySet(name));
    }
    *slot = Some(callback);
    Ok(())
}
