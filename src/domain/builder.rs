//! Top-down construction of organisation trees.

use tracing::{debug, instrument};

use crate::domain::arena::{CompositeId, NodeId, OrgTree};
use crate::domain::entities::Department;
use crate::domain::error::DomainResult;

/// Builds an [`OrgTree`] strictly top-down: nodes are created first, then
/// attached to an existing company.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: OrgTree,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(&mut self, name: &str) -> CompositeId {
        self.tree.insert_composite(name)
    }

    pub fn department(&mut self, name: &str, department: Department) -> NodeId {
        self.tree.insert_leaf(name, department)
    }

    /// Attach `child` as the last sub-unit of `parent`.
    pub fn attach(
        &mut self,
        parent: CompositeId,
        child: impl Into<NodeId>,
    ) -> DomainResult<&mut Self> {
        self.tree.add(parent, child.into())?;
        Ok(self)
    }

    /// Company named `name` with its own HR and finance departments.
    #[instrument(level = "debug", skip(self))]
    pub fn staffed_company(&mut self, name: &str) -> DomainResult<CompositeId> {
        let company = self.company(name);
        let hr = self.department(&format!("{} Human Resources", name), Department::HumanResources);
        let finance = self.department(&format!("{} Finance", name), Department::Finance);
        self.attach(company, hr)?.attach(company, finance)?;
        Ok(company)
    }

    /// Finish the tree with `root` as its traversal start.
    pub fn build(mut self, root: impl Into<NodeId>) -> DomainResult<OrgTree> {
        self.tree.set_root(root)?;
        debug!("built tree with {} nodes", self.tree.len());
        Ok(self.tree)
    }
}

/// The demonstration chart: a head office with its departments and one branch.
pub fn sample_chart() -> DomainResult<OrgTree> {
    let mut builder = TreeBuilder::new();
    let hq = builder.staffed_company("Shanghai HQ")?;
    let branch = builder.staffed_company("Guangzhou Branch")?;
    builder.attach(hq, branch)?;
    builder.build(hq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sample_chart_when_built_then_has_six_nodes_and_root() {
        let tree = sample_chart().unwrap();
        assert_eq!(tree.len(), 6);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).unwrap().name(), "Shanghai HQ");
        assert_eq!(tree.depth(root), 3);
    }

    #[test]
    fn given_staffed_company_when_built_then_departments_in_order() {
        let mut builder = TreeBuilder::new();
        let acme = builder.staffed_company("Acme").unwrap();
        let tree = builder.build(acme).unwrap();
        assert_eq!(
            tree.leaf_names(acme.id()),
            vec!["Acme Human Resources", "Acme Finance"]
        );
    }
}
