//! Organisation chart service
//!
//! Owns one tree and runs the structure/duty traversals over it.

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, NodeId, OrgTree, Sink, TreeNodeConvert};

/// Which per-node text a traversal emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Node names
    Structure,
    /// Role descriptions
    Duties,
}

/// Outcome of a membership change requested through an untyped handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    Changed,
    Unchanged,
    /// Target is a leaf; carries the message to report
    NotApplicable(String),
}

/// Service for traversing and editing an organisation chart.
pub struct ChartService {
    tree: OrgTree,
}

impl ChartService {
    /// Create a new chart service over `tree`.
    pub fn new(tree: OrgTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    fn start(&self) -> ApplicationResult<NodeId> {
        self.tree.root().ok_or(ApplicationError::EmptyTree)
    }

    /// Run `view` from the root, one line per node into `sink`.
    #[instrument(level = "debug", skip(self, sink))]
    pub fn run(&self, view: View, sink: &mut dyn Sink) -> ApplicationResult<usize> {
        let root = self.start()?;
        let visited = match view {
            View::Structure => self.tree.display(root, sink)?,
            View::Duties => self.tree.describe_duty(root, sink)?,
        };
        info!("{:?}: visited {} nodes", view, visited);
        Ok(visited)
    }

    pub fn display(&self, sink: &mut dyn Sink) -> ApplicationResult<usize> {
        self.run(View::Structure, sink)
    }

    pub fn describe_duty(&self, sink: &mut dyn Sink) -> ApplicationResult<usize> {
        self.run(View::Duties, sink)
    }

    /// Box-drawing rendering of the whole chart.
    pub fn render_tree(&self) -> ApplicationResult<String> {
        self.start()?;
        Ok(self.tree.to_tree_string().to_string())
    }

    pub fn leaves(&self) -> ApplicationResult<Vec<String>> {
        let root = self.start()?;
        Ok(self.tree.leaf_names(root))
    }

    /// Add `child` under `parent` when `parent` is a company.
    ///
    /// A leaf target is reported through [`Membership::NotApplicable`]
    /// instead of failing.
    #[instrument(level = "debug", skip(self))]
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> ApplicationResult<Membership> {
        let composite = match self.tree.narrow(parent) {
            Ok(composite) => composite,
            Err(e) => return Self::not_applicable(e),
        };
        let changed = self.tree.add(composite, child)?;
        debug!("attach changed={}", changed);
        Ok(if changed {
            Membership::Changed
        } else {
            Membership::Unchanged
        })
    }

    /// Remove `child` from `parent` when `parent` is a company.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> ApplicationResult<Membership> {
        let composite = match self.tree.narrow(parent) {
            Ok(composite) => composite,
            Err(e) => return Self::not_applicable(e),
        };
        Ok(if self.tree.remove(composite, child)? {
            Membership::Changed
        } else {
            Membership::Unchanged
        })
    }

    fn not_applicable(e: DomainError) -> ApplicationResult<Membership> {
        if e.is_informational() {
            warn!("{}", e);
            Ok(Membership::NotApplicable(e.to_string()))
        } else {
            Err(e.into())
        }
    }
}
