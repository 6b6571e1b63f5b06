//! Sender identity and the declared capability graph between sender kinds.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::SenderKind;

use crate::containers::{HotMap, HotSet};

/// Actor issuing a command.
///
/// The dispatcher never inspects a sender beyond its kind and its permission answers.
pub trait Sender {
    /// Category of this sender.
    fn kind(&self) -> SenderKind;

    /// Permission check for one fully substituted permission node.
    fn has_permission(&self, node: &str) -> bool;
}

/// Declared capability sets of sender kinds.
///
/// A kind may declare that it also acts as other kinds (a player is also an entity, an entity
/// is also permissible, ...). Default-value lookup and sender exclusion use the transitive
/// closure of those declarations. Closures are computed breadth-first the first time a kind is
/// seen and memoized afterwards.
#[derive(Debug, Default)]
pub struct SenderKinds {
    declared: HotMap<SenderKind, Vec<SenderKind>>,
    closures: RwLock<HotMap<SenderKind, Arc<[SenderKind]>>>,
}

impl SenderKinds {
    /// Creates a registry where every kind only implements itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the direct capabilities of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::SenderKindDeclared`] if `kind` was declared before.
    pub fn declare(
        &mut self,
        kind: SenderKind,
        capabilities: impl IntoIterator<Item = SenderKind>,
    ) -> CmdoResult<()> {
        if self.declared.contains_key(&kind) {
            return Err(CmdoError::SenderKindDeclared(kind.name()));
        }
        self.declared.insert(kind, capabilities.into_iter().collect());
        self.closures
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    /// Returns `kind` followed by every capability reachable from it, breadth-first.
    #[must_use]
    pub fn capabilities(&self, kind: SenderKind) -> Arc<[SenderKind]> {
        if let Some(closure) = self
            .closures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
        {
            return Arc::clone(closure);
        }

        let computed = self.walk(kind);
        let mut closures = self.closures.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(closures.entry(kind).or_insert(computed))
    }

    /// Returns true when `kind` is `capability` or declares it transitively.
    #[must_use]
    pub fn implements(&self, kind: SenderKind, capability: SenderKind) -> bool {
        kind == capability || self.capabilities(kind).contains(&capability)
    }

    fn walk(&self, kind: SenderKind) -> Arc<[SenderKind]> {
        let mut order = vec![kind];
        let mut seen = HotSet::new();
        seen.insert(kind);
        let mut queue = VecDeque::from([kind]);

        while let Some(current) = queue.pop_front() {
            let Some(parents) = self.declared.get(&current) else {
                continue;
            };
            for &parent in parents {
                if seen.insert(parent) {
                    order.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        order.into()
    }
}
