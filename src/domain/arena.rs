//! Arena-backed organisation tree.
//!
//! Nodes live in a generational arena and refer to their children by handle.
//! There are no parent links: ownership of membership flows from a company
//! down to its sub-units only.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{duty_line, Department, COORDINATION_DUTY};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::sink::{Line, Sink};

static NEXT_TREE: AtomicU64 = AtomicU64::new(1);

/// Handle to any node of an [`OrgTree`]. Identity, not name, distinguishes nodes.
///
/// Carries the tag of the tree that minted it; other trees reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

/// Handle to a node known to be a composite. Only composites accept children,
/// so this is the only handle `add` and `remove` take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeId(NodeId);

impl CompositeId {
    pub fn id(self) -> NodeId {
        self.0
    }
}

impl From<CompositeId> for NodeId {
    fn from(id: CompositeId) -> Self {
        id.0
    }
}

/// Node variant. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Company: ordered sub-units, insertion order preserved
    Composite { children: Vec<NodeId> },
    /// Department: terminal, no children sequence at all
    Leaf(Department),
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    kind: NodeKind,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Children in insertion order; always empty for a leaf.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Composite { children } => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Role description emitted by the duty traversal.
    pub fn duty_description(&self) -> String {
        match &self.kind {
            NodeKind::Composite { .. } => duty_line(&self.name, COORDINATION_DUTY),
            NodeKind::Leaf(department) => duty_line(&self.name, department.duty()),
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena holding one organisation hierarchy.
///
/// Mutation needs `&mut self` and traversal `&self`, so a walk always sees a
/// stable children sequence.
#[derive(Debug)]
pub struct OrgTree {
    tag: u64,
    arena: Arena<TreeNode>,
    root: Option<NodeId>,
}

impl Default for OrgTree {
    fn default() -> Self {
        Self {
            tag: NEXT_TREE.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            root: None,
        }
    }
}

impl OrgTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, index: Index) -> NodeId {
        NodeId {
            tree: self.tag,
            index,
        }
    }

    fn owns(&self, id: NodeId) -> bool {
        id.tree == self.tag
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_composite(&mut self, name: &str) -> CompositeId {
        let idx = self.arena.insert(TreeNode {
            name: name.to_string(),
            kind: NodeKind::Composite {
                children: Vec::new(),
            },
        });
        CompositeId(self.handle(idx))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_leaf(&mut self, name: &str, department: Department) -> NodeId {
        let idx = self.arena.insert(TreeNode {
            name: name.to_string(),
            kind: NodeKind::Leaf(department),
        });
        self.handle(idx)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Mark the node traversals start from when no explicit start is given.
    pub fn set_root(&mut self, id: impl Into<NodeId>) -> DomainResult<()> {
        let id = id.into();
        self.node(id)?;
        self.root = Some(id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Node behind `id`; `None` for handles minted by another tree.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        if !self.owns(id) {
            return None;
        }
        self.arena.get(id.index)
    }

    pub fn node(&self, id: NodeId) -> DomainResult<&TreeNode> {
        self.get(id).ok_or(DomainError::UnknownNode)
    }

    /// Narrow an untyped handle to a composite handle.
    ///
    /// Fails with the informational [`DomainError::NotComposite`] for leaves.
    pub fn narrow(&self, id: NodeId) -> DomainResult<CompositeId> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Composite { .. } => Ok(CompositeId(id)),
            NodeKind::Leaf(_) => Err(DomainError::NotComposite {
                name: node.name.clone(),
            }),
        }
    }

    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Append `child` under `parent`.
    ///
    /// Returns `Ok(false)` when `child` is already a direct child of `parent`.
    /// Rejects additions that would make a node its own descendant.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, parent: CompositeId, child: NodeId) -> DomainResult<bool> {
        let parent_id = parent.id();
        let parent_node = self.node(parent_id)?;
        let child_node = self.node(child)?;

        if parent_node.children().contains(&child) {
            debug!("{} already under {}", child_node.name, parent_node.name);
            return Ok(false);
        }
        if self.reaches(child, parent_id) {
            return Err(DomainError::CycleDetected {
                parent: parent_node.name.clone(),
                child: child_node.name.clone(),
            });
        }

        match self.arena.get_mut(parent_id.index).map(|n| &mut n.kind) {
            Some(NodeKind::Composite { children }) => {
                children.push(child);
                Ok(true)
            }
            // CompositeId is only minted for composites and kinds never change
            _ => Err(DomainError::UnknownNode),
        }
    }

    /// Remove `child` from `parent` by identity.
    ///
    /// Returns `Ok(false)` when `child` was not a direct child.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, parent: CompositeId, child: NodeId) -> DomainResult<bool> {
        let parent_id = parent.id();
        self.node(parent_id)?;
        self.node(child)?;
        match self.arena.get_mut(parent_id.index).map(|n| &mut n.kind) {
            Some(NodeKind::Composite { children }) => {
                match children.iter().position(|&c| c == child) {
                    Some(pos) => {
                        children.remove(pos);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            _ => Err(DomainError::UnknownNode),
        }
    }

    /// True if `target` is `from` or lies in the subtree below `from`.
    pub fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        self.iter(from).any(|(id, _, _)| id == target)
    }

    /// Pre-order depth-first iterator starting at `from`.
    pub fn iter(&self, from: NodeId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, from)
    }

    /// Post-order iterator starting at `from`.
    pub fn iter_postorder(&self, from: NodeId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, from)
    }

    /// Number of levels in the subtree; a lone leaf has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, from: NodeId) -> usize {
        self.iter(from)
            .map(|(_, depth, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Names of all leaves below `from`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self, from: NodeId) -> Vec<String> {
        self.iter(from)
            .filter(|(_, _, node)| node.is_leaf())
            .map(|(_, _, node)| node.name.clone())
            .collect()
    }

    /// Visit the subtree in pre-order, emitting one rendered line per node.
    ///
    /// Returns the number of nodes visited.
    pub fn walk<S, F>(&self, from: NodeId, sink: &mut S, mut render: F) -> DomainResult<usize>
    where
        S: Sink + ?Sized,
        F: FnMut(&TreeNode) -> String,
    {
        self.node(from)?;
        let mut visited = 0;
        for (id, depth, node) in self.iter(from) {
            sink.emit(Line {
                node: id,
                depth,
                text: render(node),
            });
            visited += 1;
        }
        Ok(visited)
    }

    /// Emit the name of every node below `from`.
    #[instrument(level = "debug", skip(self, sink))]
    pub fn display<S: Sink + ?Sized>(&self, from: NodeId, sink: &mut S) -> DomainResult<usize> {
        self.walk(from, sink, |node| node.name.clone())
    }

    /// Emit the role description of every node below `from`.
    #[instrument(level = "debug", skip(self, sink))]
    pub fn describe_duty<S: Sink + ?Sized>(
        &self,
        from: NodeId,
        sink: &mut S,
    ) -> DomainResult<usize> {
        self.walk(from, sink, TreeNode::duty_description)
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a OrgTree, from: NodeId) -> Self {
        Self {
            tree,
            stack: vec![(from, 0)],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<(NodeId, usize, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a OrgTree, from: NodeId) -> Self {
        Self {
            tree,
            stack: vec![(from, 0, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth, expanded)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                if expanded {
                    return Some((current, depth, node));
                }
                self.stack.push((current, depth, true));
                for &child in node.children().iter().rev() {
                    self.stack.push((child, depth + 1, false));
                }
            }
        }
        None
    }
}
