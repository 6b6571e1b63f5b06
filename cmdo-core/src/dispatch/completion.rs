use std::panic::{self, AssertUnwindSafe};

use cmdo_common::error::CmdoResult;
use tracing::{trace, warn};

use super::{RequestContext, TreeNode};
use crate::command::CommandNode;
use crate::completers::{matches_prefix, ItemSet};
use crate::sender::Sender;

/// Next-token suggestions for `tokens`; the last token is the partial one.
pub(super) fn complete(
    context: &RequestContext<'_>,
    sender: &dyn Sender,
    tokens: &[String],
) -> ItemSet {
    complete_at(context, context.tree.root(), sender, tokens)
}

fn complete_at(
    context: &RequestContext<'_>,
    node: &TreeNode,
    sender: &dyn Sender,
    tokens: &[String],
) -> ItemSet {
    let Some((first, rest)) = tokens.split_first() else {
        return ItemSet::new();
    };

    if let Some(child) = node.child(first) {
        if rest.is_empty() {
            return child_segments(context, node, sender, first);
        }
        return complete_at(context, child, sender, rest);
    }

    let command = node
        .command_id()
        .and_then(|id| context.tree.command(id))
        .filter(|command| command.may_have_arguments());
    if let Some(command) = command {
        // A panicking completer yields no suggestions.
        let completed =
            panic::catch_unwind(AssertUnwindSafe(|| complete_arguments(command, sender, tokens)));
        return match completed {
            Ok(Ok(suggestions)) => suggestions,
            Ok(Err(error)) => {
                warn!(command = command.id(), %error, "argument completion failed");
                ItemSet::new()
            }
            Err(_) => {
                warn!(command = command.id(), "argument completion panicked");
                ItemSet::new()
            }
        };
    }

    if rest.is_empty() {
        return child_segments(context, node, sender, first);
    }
    ItemSet::new()
}

fn child_segments(
    context: &RequestContext<'_>,
    node: &TreeNode,
    sender: &dyn Sender,
    partial: &str,
) -> ItemSet {
    node.children()
        .filter(|(segment, _)| matches_prefix(segment, partial))
        .filter(|(_, child)| {
            child
                .command_id()
                .and_then(|id| context.tree.command(id))
                .is_none_or(|command| command.check_permissions(sender, &[]))
        })
        .map(|(segment, _)| segment.to_owned())
        .collect()
}

fn complete_arguments(
    command: &CommandNode,
    sender: &dyn Sender,
    tokens: &[String],
) -> CmdoResult<ItemSet> {
    if !command.check_permissions(sender, tokens) {
        return Ok(ItemSet::new());
    }
    let Some((partial, typed)) = tokens.split_last() else {
        return Ok(ItemSet::new());
    };
    let Some(slot) = command.slots().get(typed.len()) else {
        return Ok(ItemSet::new());
    };

    let argument = &slot.spec;
    if !argument.allows(sender) || !argument.is_tab_completion_active() {
        return Ok(ItemSet::new());
    }
    let Some(handler) = argument.effective_handler()? else {
        return Ok(ItemSet::new());
    };

    let mut dependencies = Vec::with_capacity(slot.dependency_slots.len());
    for &position in &slot.dependency_slots {
        let (Some(value), Some(dependency)) = (typed.get(position), command.slots().get(position))
        else {
            return Ok(ItemSet::new());
        };
        if let Some(dependency_handler) = dependency.spec.effective_handler()? {
            let items = dependency_handler.items(sender, value, &dependencies)?;
            if !dependency_handler.accepts(&items, value) {
                trace!(
                    argument = argument.name(),
                    dependency = dependency.spec.name(),
                    "dependency value rejected"
                );
                return Ok(ItemSet::new());
            }
        }
        dependencies.push(value.clone());
    }

    Ok(handler
        .items(sender, partial, &dependencies)?
        .into_iter()
        .filter(|item| matches_prefix(item, partial))
        .collect())
}
