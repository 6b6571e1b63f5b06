use tracing::{debug, trace};

use super::{DispatchOutcome, RequestContext, ValidationResult};
use crate::argument::validate;
use crate::command::CommandNode;
use crate::sender::Sender;

/// Resolves every argument of `command` from `raw` tokens and runs its handler.
pub(super) fn run(
    context: &RequestContext<'_>,
    command: &CommandNode,
    sender: &dyn Sender,
    raw: &[String],
) -> DispatchOutcome {
    let mut tokens = raw.to_vec();
    let mut resolved: Vec<String> = Vec::with_capacity(command.slots().len());
    let mut typed_arguments = 0;

    for (index, slot) in command.slots().iter().enumerate() {
        let argument = &slot.spec;

        if argument.is_catch_remaining() && index < tokens.len() {
            let joined = tokens[index..].join(" ");
            tokens.truncate(index);
            if !joined.is_empty() {
                tokens.push(joined);
            }
        }

        if !argument.allows(sender) {
            trace!(argument = argument.name(), "argument permission missing, truncating");
            break;
        }

        let dependencies = slot.dependency_values(&resolved);
        let value = if let Some(token) = tokens.get(index) {
            typed_arguments += 1;
            token.clone()
        } else if let Some(default) = argument.default_for(sender.kind(), context.sender_kinds) {
            let rendered = default.resolve(sender, &dependencies).render();
            trace!(argument = argument.name(), value = %rendered, "default applied");
            rendered
        } else {
            debug!(command = command.id(), argument = argument.name(), "missing argument");
            context.callbacks.missing_argument(sender, command);
            return DispatchOutcome::MissingArgument {
                command: command.id(),
                argument: argument.name().to_owned(),
            };
        };

        if let Err(status) = validate(argument, sender, &value, &dependencies, context.durations) {
            debug!(
                command = command.id(),
                argument = argument.name(),
                ?status,
                "argument rejected"
            );
            let result = ValidationResult {
                status,
                command,
                argument,
                sender,
                value: &value,
                dependencies: &dependencies,
            };
            if let Ok(Some(handler)) = argument.effective_handler() {
                handler.when_invalid(&result);
            }
            context.callbacks.validation_failed(&result);
            return DispatchOutcome::ValidationFailed {
                command: command.id(),
                argument: argument.name().to_owned(),
                status,
            };
        }

        resolved.push(value);
    }

    if let Some(handler) = command.handler() {
        handler(sender, &resolved, typed_arguments);
    }
    debug!(command = command.id(), typed_arguments, "command executed");
    DispatchOutcome::Executed {
        command: command.id(),
        arguments: resolved,
        typed_arguments,
    }
}
