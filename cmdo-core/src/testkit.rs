//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::SenderKind;

use crate::completers::{matches_prefix, ArgumentHandler, ItemSet};
use crate::containers::HotSet;
use crate::dispatch::ValidationResult;
use crate::sender::Sender;

/// Sender with a fixed kind and an explicit permission list.
#[derive(Debug, Clone)]
pub(crate) struct TestSender {
    kind: SenderKind,
    permissions: HotSet<String>,
}

impl TestSender {
    pub(crate) fn new(kind: SenderKind, permissions: &[&str]) -> Self {
        Self {
            kind,
            permissions: permissions.iter().map(|node| (*node).to_owned()).collect(),
        }
    }

    pub(crate) fn console() -> Self {
        Self::new(SenderKind::CONSOLE, &[])
    }

    pub(crate) fn player(permissions: &[&str]) -> Self {
        Self::new(SenderKind::PLAYER, permissions)
    }
}

impl Sender for TestSender {
    fn kind(&self) -> SenderKind {
        self.kind
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }
}

/// Append-only record shared between a closure and the test body.
#[derive(Debug)]
pub(crate) struct Recorder<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: Clone> Recorder<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn push(&self, entry: T) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<T> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Handler over a fixed list that records every failure hook call and every dependency list it
/// was asked to enumerate with.
#[derive(Clone)]
pub(crate) struct Choices {
    items: Vec<String>,
    invalid_values: Recorder<String>,
    seen_dependencies: Recorder<Vec<String>>,
}

impl Choices {
    pub(crate) fn new(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|item| (*item).to_owned()).collect(),
            invalid_values: Recorder::new(),
            seen_dependencies: Recorder::new(),
        }
    }

    pub(crate) fn invalid_values(&self) -> Vec<String> {
        self.invalid_values.entries()
    }

    pub(crate) fn seen_dependencies(&self) -> Vec<Vec<String>> {
        self.seen_dependencies.entries()
    }
}

impl ArgumentHandler for Choices {
    fn items(&self, _sender: &dyn Sender, partial: &str, dependencies: &[String]) -> CmdoResult<ItemSet> {
        self.seen_dependencies.push(dependencies.to_vec());
        Ok(self
            .items
            .iter()
            .filter(|item| matches_prefix(item, partial))
            .cloned()
            .collect())
    }

    fn accepts(&self, items: &ItemSet, value: &str) -> bool {
        items.contains(value)
    }

    fn when_invalid(&self, result: &ValidationResult<'_>) {
        self.invalid_values.push(result.value.to_owned());
    }
}

/// Handler whose enumeration always fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Broken;

impl ArgumentHandler for Broken {
    fn items(&self, _sender: &dyn Sender, _partial: &str, _dependencies: &[String]) -> CmdoResult<ItemSet> {
        Err(CmdoError::Completion("backing source offline".to_owned()))
    }
}

/// Completer that panics instead of enumerating.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Panicking;

impl ArgumentHandler for Panicking {
    fn items(&self, _sender: &dyn Sender, _partial: &str, _dependencies: &[String]) -> CmdoResult<ItemSet> {
        panic!("completion source crashed");
    }
}
