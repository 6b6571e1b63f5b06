//! Completion capabilities attached to arguments.
//!
//! An [`ArgumentHandler`] enumerates candidate values for an argument and decides whether a
//! typed value is acceptable. Arguments either carry a custom handler or use an
//! [`EnumerableType`], a static table entry whose handler is built by a factory function the
//! first time it is needed and shared afterwards.

use std::fmt;
use std::sync::{Arc, OnceLock};

use cmdo_common::error::{CmdoError, CmdoResult};

use crate::containers::HotSet;
use crate::dispatch::ValidationResult;
use crate::sender::Sender;

/// Suggestion/candidate set produced by handlers and the completion engine.
pub type ItemSet = HotSet<String>;

/// Pluggable enumeration and acceptance logic for one argument.
pub trait ArgumentHandler: Send + Sync {
    /// Candidate values for `partial`, given the resolved values of the argument's dependencies.
    ///
    /// # Errors
    ///
    /// Implementations return an error when their backing source is unavailable. Completion
    /// turns errors into an empty suggestion set; dispatch treats them as a rejected value.
    fn items(&self, sender: &dyn Sender, partial: &str, dependencies: &[String]) -> CmdoResult<ItemSet> {
        let _ = (sender, partial, dependencies);
        Ok(ItemSet::new())
    }

    /// Acceptance test for `value` against the items enumerated for it.
    fn accepts(&self, items: &ItemSet, value: &str) -> bool {
        let _ = (items, value);
        true
    }

    /// Hook invoked before the global validation callback when a value is rejected.
    fn when_invalid(&self, result: &ValidationResult<'_>) {
        let _ = result;
    }
}

impl<T: ArgumentHandler + ?Sized> ArgumentHandler for Arc<T> {
    fn items(&self, sender: &dyn Sender, partial: &str, dependencies: &[String]) -> CmdoResult<ItemSet> {
        (**self).items(sender, partial, dependencies)
    }

    fn accepts(&self, items: &ItemSet, value: &str) -> bool {
        (**self).accepts(items, value)
    }

    fn when_invalid(&self, result: &ValidationResult<'_>) {
        (**self).when_invalid(result);
    }
}

/// Factory used by an enumerable type to build its handler.
pub type HandlerFactory = fn() -> CmdoResult<Arc<dyn ArgumentHandler>>;

/// Built-in argument type whose values come from an enumerable source.
///
/// Declare one per source as a `static`; the type is identified by its name and its handler is
/// instantiated at most once per process (first writer wins when callers race).
pub struct EnumerableType {
    name: &'static str,
    factory: HandlerFactory,
    instance: OnceLock<Arc<dyn ArgumentHandler>>,
}

impl EnumerableType {
    /// Creates a type entry. Usable in `static` initializers.
    #[must_use]
    pub const fn new(name: &'static str, factory: HandlerFactory) -> Self {
        Self {
            name,
            factory,
            instance: OnceLock::new(),
        }
    }

    /// Stable type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the shared handler, creating it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the factory error; nothing is cached in that case.
    pub fn handler(&self) -> CmdoResult<Arc<dyn ArgumentHandler>> {
        if let Some(handler) = self.instance.get() {
            return Ok(Arc::clone(handler));
        }
        let created = (self.factory)()?;
        let _ = self.instance.set(created);
        self.instance
            .get()
            .map(Arc::clone)
            .ok_or(CmdoError::CompleterUnavailable(self.name))
    }
}

impl fmt::Debug for EnumerableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumerableType")
            .field("name", &self.name)
            .field("instantiated", &self.instance.get().is_some())
            .finish()
    }
}

impl PartialEq for EnumerableType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumerableType {}

/// Case-insensitive prefix test used for every suggestion filter.
#[must_use]
pub fn matches_prefix(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Handler over a fixed list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedItems {
    items: &'static [&'static str],
}

impl FixedItems {
    /// Creates a handler enumerating `items`.
    #[must_use]
    pub const fn new(items: &'static [&'static str]) -> Self {
        Self { items }
    }
}

impl ArgumentHandler for FixedItems {
    fn items(&self, _sender: &dyn Sender, partial: &str, _dependencies: &[String]) -> CmdoResult<ItemSet> {
        Ok(self
            .items
            .iter()
            .filter(|item| matches_prefix(item, partial))
            .map(|item| (*item).to_owned())
            .collect())
    }

    fn accepts(&self, items: &ItemSet, value: &str) -> bool {
        items.contains(value)
    }
}

fn boolean_handler() -> CmdoResult<Arc<dyn ArgumentHandler>> {
    Ok(Arc::new(FixedItems::new(&["true", "false"])))
}

/// `true` / `false`.
pub static BOOLEAN: EnumerableType = EnumerableType::new("boolean", boolean_handler);
