//! Stage-by-stage navigation through the hierarchy.
//!
//! The flowchart view shows one stage at a time: the top-level nodes, then
//! the children of whichever node was clicked, and so on. A [`Drilldown`]
//! is the path of labels clicked so far.

use crate::node::HierarchyNode;
use crate::{HierarchyError, HierarchyResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drilldown {
    path: Vec<String>,
}

impl Drilldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of the nodes shown at the current stage.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Labels selected so far, top level first.
    pub fn breadcrumbs(&self) -> &[String] {
        &self.path
    }

    /// Node whose children form the current stage; `None` at the top.
    pub fn selected<'a>(&self, roots: &'a [HierarchyNode]) -> Option<&'a HierarchyNode> {
        let (first, rest) = self.path.split_first()?;
        let mut node = roots.iter().find(|n| &n.label == first)?;
        for label in rest {
            node = node.child(label)?;
        }
        Some(node)
    }

    /// Nodes of the current stage. Empty when the path no longer exists,
    /// e.g. after a filter change removed it.
    pub fn current<'a>(&self, roots: &'a [HierarchyNode]) -> &'a [HierarchyNode] {
        if self.path.is_empty() {
            return roots;
        }
        match self.selected(roots) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Descend into the node labelled `label` at the current stage.
    pub fn enter(&mut self, roots: &[HierarchyNode], label: &str) -> HierarchyResult<()> {
        let node = self
            .current(roots)
            .iter()
            .find(|n| n.label == label)
            .ok_or_else(|| HierarchyError::UnknownStageLabel {
                label: label.to_string(),
                depth: self.depth(),
            })?;
        if node.is_leaf() {
            return Err(HierarchyError::LeafStage(node.id.to_string()));
        }
        self.path.push(label.to_string());
        Ok(())
    }

    /// Go back to the stage at `depth`, forgetting deeper selections.
    pub fn reset_to(&mut self, depth: usize) {
        self.path.truncate(depth);
    }
}
