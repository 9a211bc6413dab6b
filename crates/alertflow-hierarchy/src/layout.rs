//! Leveled 2-D layout of the visible part of a hierarchy.
//!
//! Nodes are placed in columns by depth and in rows by a per-depth running
//! counter, visited depth-first in child order. Only roots and the
//! children of expanded nodes are emitted; collapsed subtrees are pruned,
//! so the layout must be recomputed whenever the expand state changes.

use std::collections::BTreeSet;

use alertflow_model::Level;
use serde::{Deserialize, Serialize};

use crate::node::{walk, HierarchyNode, NodeId};
use crate::{HierarchyError, HierarchyResult};

/// Spacing and offsets of the layout grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Horizontal distance between depth columns.
    #[serde(alias = "column_width")]
    pub column_width: f64,
    /// Vertical distance between consecutive rows of one depth.
    #[serde(alias = "row_height")]
    pub row_height: f64,
    #[serde(alias = "origin_x")]
    pub origin_x: f64,
    #[serde(alias = "origin_y")]
    pub origin_y: f64,
    /// Extra vertical offset per depth; missing entries are 0.
    #[serde(alias = "depth_offsets")]
    pub depth_offsets: Vec<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_width: 220.0,
            row_height: 80.0,
            origin_x: 40.0,
            origin_y: 40.0,
            depth_offsets: Vec::new(),
        }
    }
}

impl LayoutOptions {
    /// Spacing must be positive and every value finite, otherwise rows of
    /// one depth could overlap.
    pub fn validate(&self) -> HierarchyResult<()> {
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(HierarchyError::InvalidLayout(format!(
                "columnWidth must be a positive number, got {}",
                self.column_width
            )));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(HierarchyError::InvalidLayout(format!(
                "rowHeight must be a positive number, got {}",
                self.row_height
            )));
        }
        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err(HierarchyError::InvalidLayout("origin must be finite".into()));
        }
        if let Some(bad) = self.depth_offsets.iter().find(|o| !o.is_finite()) {
            return Err(HierarchyError::InvalidLayout(format!(
                "depth offset {bad} is not finite"
            )));
        }
        Ok(())
    }

    pub fn x_for(&self, depth: usize) -> f64 {
        self.origin_x + depth as f64 * self.column_width
    }

    pub fn y_for(&self, depth: usize, row: usize) -> f64 {
        let offset = self.depth_offsets.get(depth).copied().unwrap_or(0.0);
        self.origin_y + offset + row as f64 * self.row_height
    }
}

/// Ids of nodes whose children are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedSet {
    ids: BTreeSet<NodeId>,
}

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every node that has children, i.e. the fully expanded tree.
    pub fn all(roots: &[HierarchyNode]) -> Self {
        Self {
            ids: walk(roots)
                .filter(|n| !n.is_leaf())
                .map(|n| n.id.clone())
                .collect(),
        }
    }

    /// Every non-leaf node shallower than `depth`.
    pub fn to_depth(roots: &[HierarchyNode], depth: usize) -> Self {
        Self {
            ids: walk(roots)
                .filter(|n| !n.is_leaf() && n.depth < depth)
                .map(|n| n.id.clone())
                .collect(),
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        self.ids.insert(id);
    }

    /// Returns whether the node was expanded.
    pub fn collapse(&mut self, id: &NodeId) -> bool {
        self.ids.remove(id)
    }

    /// Flip the node's state; returns `true` if it is now expanded.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }
}

impl FromIterator<NodeId> for ExpandedSet {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// A node with its assigned position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: NodeId,
    pub label: String,
    pub level: Level,
    pub depth: usize,
    pub aggregate_count: u64,
    pub record_count: usize,
    pub parent: Option<NodeId>,
    pub child_count: usize,
    pub expanded: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub parent_id: NodeId,
    pub child_id: NodeId,
}

/// Render-ready nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// In visit order: depth-first, children in first-seen order.
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn at_depth(&self, depth: usize) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.iter().filter(move |n| n.depth == depth)
    }

    /// Largest x and y assigned, for sizing the canvas. `None` when empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.nodes.iter().fold(None, |acc, n| match acc {
            None => Some((n.x, n.y)),
            Some((x, y)) => Some((x.max(n.x), y.max(n.y))),
        })
    }
}

/// Position the visible nodes of `roots`.
///
/// Roots are always visible. A node's children are visited only when its id
/// is in `expanded`. An edge is emitted for each visible child whose parent
/// was positioned in this pass, so a forest of mid-level nodes (e.g. one
/// drill-down stage) yields no edges to its off-screen parents.
pub fn layout(roots: &[HierarchyNode], options: &LayoutOptions, expanded: &ExpandedSet) -> Layout {
    let mut out = Layout::default();
    let mut rows: Vec<usize> = Vec::new();
    let mut stack: Vec<(&HierarchyNode, bool)> = roots.iter().rev().map(|n| (n, false)).collect();

    while let Some((node, parent_visible)) = stack.pop() {
        if rows.len() <= node.depth {
            rows.resize(node.depth + 1, 0);
        }
        let row = rows[node.depth];
        rows[node.depth] += 1;

        let is_expanded = !node.is_leaf() && expanded.is_expanded(&node.id);
        out.nodes.push(PositionedNode {
            id: node.id.clone(),
            label: node.label.clone(),
            level: node.level,
            depth: node.depth,
            aggregate_count: node.aggregate_count,
            record_count: node.record_count,
            parent: node.parent.clone(),
            child_count: node.children.len(),
            expanded: is_expanded,
            x: options.x_for(node.depth),
            y: options.y_for(node.depth, row),
        });

        if parent_visible {
            if let Some(parent) = &node.parent {
                out.edges.push(Edge {
                    parent_id: parent.clone(),
                    child_id: node.id.clone(),
                });
            }
        }

        if is_expanded {
            stack.extend(node.children.iter().rev().map(|c| (c, true)));
        }
    }

    tracing::debug!(
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        expanded = expanded.len(),
        "Computed layout"
    );

    out
}
