//! Conversion of organisation trees into `termtree` renderings.

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeId, OrgTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl OrgTree {
    /// Render the subtree below `from` with box-drawing connectors.
    #[instrument(level = "debug", skip(self))]
    pub fn subtree_to_tree_string(&self, from: NodeId) -> Tree<String> {
        fn build_tree(tree: &OrgTree, node_idx: NodeId, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get(node_idx) {
                for &child_idx in node.children() {
                    if let Some(child) = tree.get(child_idx) {
                        let mut child_tree = Tree::new(child.name().to_string());
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.get(from) {
            Some(node) => {
                let mut rendered = Tree::new(node.name().to_string());
                build_tree(self, from, &mut rendered);
                rendered
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

impl TreeNodeConvert for OrgTree {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => self.subtree_to_tree_string(root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
