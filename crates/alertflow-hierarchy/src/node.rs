//! Tree node types shared by aggregation, layout and drill-down.

use std::fmt;

use alertflow_model::Level;
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '/';

fn escape(label: &str) -> String {
    label.replace('%', "%25").replace(SEPARATOR, "%2F")
}

fn unescape(segment: &str) -> String {
    segment.replace("%2F", "/").replace("%25", "%")
}

/// Stable node identity derived from the full label path.
///
/// Labels are escaped before joining with `/`, so two different paths can
/// never produce the same id even when labels contain the separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn root(label: &str) -> Self {
        Self(escape(label))
    }

    pub fn child(&self, label: &str) -> Self {
        Self(format!("{}{SEPARATOR}{}", self.0, escape(label)))
    }

    /// Id of the node reached by following `labels` from the top level.
    pub fn from_path<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        let (first, rest) = labels.split_first()?;
        Some(
            rest.iter()
                .fold(Self::root(first.as_ref()), |id, label| id.child(label.as_ref())),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unescaped labels from the top level down to this node.
    pub fn labels(&self) -> Vec<String> {
        self.0.split(SEPARATOR).map(unescape).collect()
    }

    pub fn depth(&self) -> usize {
        self.0.matches(SEPARATOR).count()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    /// Wrap an already-escaped id, e.g. one echoed back by a renderer.
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// An aggregation point: one distinct value at one level, scoped under its
/// ancestors. Parents own their children; `parent` is a lookup key only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: NodeId,
    pub label: String,
    pub level: Level,
    pub depth: usize,
    /// Sum of record contributions through this node.
    pub aggregate_count: u64,
    /// Number of records through this node.
    pub record_count: usize,
    pub parent: Option<NodeId>,
    /// In first-seen order of the input records.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, label: &str) -> Option<&HierarchyNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Pre-order iterator over this node and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Leaves of this subtree, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.walk().filter(|n| n.is_leaf())
    }
}

/// Pre-order traversal in child order.
pub struct Walk<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order iterator over a whole forest.
pub fn walk(roots: &[HierarchyNode]) -> Walk<'_> {
    Walk {
        stack: roots.iter().rev().collect(),
    }
}

/// Look up a node by id, descending one label per level.
pub fn find<'a>(roots: &'a [HierarchyNode], id: &NodeId) -> Option<&'a HierarchyNode> {
    let labels = id.labels();
    let (first, rest) = labels.split_first()?;
    let mut node = roots.iter().find(|n| &n.label == first)?;
    for label in rest {
        node = node.child(label)?;
    }
    Some(node)
}
