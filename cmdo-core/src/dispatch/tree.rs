use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::CommandId;

use crate::command::CommandNode;
use crate::containers::HotMap;

/// Trie node keyed by lower-cased path segment.
#[derive(Debug, Default)]
pub struct TreeNode {
    command: Option<CommandId>,
    children: HotMap<String, TreeNode>,
}

impl TreeNode {
    /// Command registered exactly at this node.
    #[must_use]
    pub const fn command_id(&self) -> Option<CommandId> {
        self.command
    }

    /// Child for `segment`, matched case-insensitively.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&TreeNode> {
        self.children.get(&segment.to_lowercase())
    }

    /// Direct children with their lower-cased segment names.
    pub fn children(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children
            .iter()
            .map(|(segment, child)| (segment.as_str(), child))
    }

    fn collect_into(&self, found: &mut Vec<CommandId>) {
        if let Some(id) = self.command {
            found.push(id);
        }
        for child in self.children.values() {
            child.collect_into(found);
        }
    }
}

/// Registered commands indexed by path.
#[derive(Debug, Default)]
pub struct CommandTree {
    root: TreeNode,
    commands: Vec<CommandNode>,
}

impl CommandTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the trie; never holds a command itself.
    #[must_use]
    pub const fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command by registration index.
    #[must_use]
    pub fn command(&self, id: CommandId) -> Option<&CommandNode> {
        self.commands.get(id)
    }

    /// All commands in registration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandNode] {
        &self.commands
    }

    /// Trie node at `path`, matched case-insensitively.
    #[must_use]
    pub fn node_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.child(segment.as_ref()))
    }

    /// Command registered exactly at `path`.
    #[must_use]
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandNode> {
        self.node_at(path)
            .and_then(TreeNode::command_id)
            .and_then(|id| self.command(id))
    }

    /// True when a command is registered exactly at `path`.
    #[must_use]
    pub fn is_occupied<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.node_at(path)
            .is_some_and(|node| node.command_id().is_some())
    }

    /// Every command below the children of `node` whose segment starts with `prefix`
    /// (case-insensitive), in registration order.
    #[must_use]
    pub fn collect_under(&self, node: &TreeNode, prefix: &str) -> Vec<&CommandNode> {
        let prefix = prefix.to_lowercase();
        let mut found = Vec::new();
        for (segment, child) in node.children() {
            if segment.starts_with(&prefix) {
                child.collect_into(&mut found);
            }
        }
        found.sort_unstable();
        found
            .into_iter()
            .filter_map(|id| self.command(id))
            .collect()
    }

    pub(crate) fn insert(&mut self, node: CommandNode) -> CmdoResult<CommandId> {
        let id = self.commands.len();
        debug_assert_eq!(node.id(), id);

        let mut cursor = &mut self.root;
        for segment in node.path() {
            cursor = cursor.children.entry(segment.to_lowercase()).or_default();
        }
        if cursor.command.is_some() {
            return Err(CmdoError::DuplicateCommand(node.path().join(" ")));
        }
        cursor.command = Some(id);
        self.commands.push(node);
        Ok(id)
    }
}
