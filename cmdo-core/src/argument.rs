//! Argument specifications.
//!
//! An [`ArgumentSpec`] is immutable once created through [`ArgumentBuilder`]. It carries the
//! declared type, numeric bounds, string constraints, per-sender-kind defaults, dependencies on
//! earlier arguments of the same command and the completion capability used for suggestions
//! and acceptance.

use std::fmt;
use std::sync::Arc;

use cmdo_common::error::CmdoResult;
use cmdo_common::ids::SenderKind;
use regex::Regex;

use crate::completers::ArgumentHandler;
use crate::containers::HotMap;
use crate::sender::{Sender, SenderKinds};

#[path = "argument/types.rs"]
mod types;
#[path = "argument/value.rs"]
mod value;
#[path = "argument/builder.rs"]
mod builder;
#[path = "argument/validator.rs"]
mod validator;

pub use builder::ArgumentBuilder;
pub use types::ArgumentType;
pub use validator::{validate, ValidationStatus};
pub use value::{ArgumentValue, DefaultFn, DefaultValue};

/// Validated, immutable argument definition.
#[derive(Clone)]
pub struct ArgumentSpec {
    name: String,
    kind: ArgumentType,
    min: f64,
    max: f64,
    min_length: usize,
    max_length: usize,
    pattern: Option<Regex>,
    handler: Option<Arc<dyn ArgumentHandler>>,
    defaults: HotMap<SenderKind, DefaultValue>,
    dependencies: Vec<String>,
    catch_remaining: bool,
    tab_completion: bool,
    permission: Option<String>,
}

impl ArgumentSpec {
    /// Starts building an argument named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ArgumentBuilder {
        ArgumentBuilder::new(name)
    }

    /// Argument name, unique within its command.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved argument type.
    #[must_use]
    pub const fn argument_type(&self) -> ArgumentType {
        self.kind
    }

    /// Inclusive lower bound for numeric values.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Inclusive upper bound for numeric values.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Minimum length of string values, in characters.
    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum length of string values, in characters.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Anchored pattern string values must match in full.
    #[must_use]
    pub const fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Names of earlier arguments whose values are passed to the completion capability.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// True when this argument absorbs every remaining token.
    #[must_use]
    pub const fn is_catch_remaining(&self) -> bool {
        self.catch_remaining
    }

    /// False when suggestions for this argument are switched off.
    #[must_use]
    pub const fn is_tab_completion_active(&self) -> bool {
        self.tab_completion
    }

    /// Permission node gating suggestions for this argument.
    #[must_use]
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// An argument is optional when it declares a default for at least one sender kind.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        !self.defaults.is_empty()
    }

    /// True when the sender may see suggestions for this argument.
    #[must_use]
    pub fn allows(&self, sender: &dyn Sender) -> bool {
        self.permission
            .as_deref()
            .is_none_or(|node| sender.has_permission(node))
    }

    /// Completion capability: the custom handler, or the shared handler of an enumerable type.
    ///
    /// # Errors
    ///
    /// Propagates the factory failure of an enumerable type.
    pub fn effective_handler(&self) -> CmdoResult<Option<Arc<dyn ArgumentHandler>>> {
        if let Some(handler) = &self.handler {
            return Ok(Some(Arc::clone(handler)));
        }
        match self.kind {
            ArgumentType::Enumerable(enumerable) => enumerable.handler().map(Some),
            _ => Ok(None),
        }
    }

    /// Default declared for `kind`, falling back to the first capability of `kind` (in
    /// breadth-first order) that declares one.
    #[must_use]
    pub fn default_for(&self, kind: SenderKind, kinds: &SenderKinds) -> Option<&DefaultValue> {
        if self.defaults.is_empty() {
            return None;
        }
        if let Some(value) = self.defaults.get(&kind) {
            return Some(value);
        }
        kinds
            .capabilities(kind)
            .iter()
            .find_map(|capability| self.defaults.get(capability))
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom_handler", &self.handler.is_some())
            .field("defaults", &self.defaults)
            .field("dependencies", &self.dependencies)
            .field("catch_remaining", &self.catch_remaining)
            .field("tab_completion", &self.tab_completion)
            .field("permission", &self.permission)
            .finish()
    }
}

#[cfg(test)]
#[path = "argument/tests.rs"]
mod tests;
