//! Grouping of flat records into the six-level hierarchy.
//!
//! Single pass over the records: each record's label path is walked from
//! the top level down, creating nodes on first sight and adding the
//! record's contribution to every node on the path. Children keep the
//! order in which their labels were first seen.

use std::collections::HashMap;

use alertflow_model::{Level, LevelOrder, WorkflowRecord};

use crate::node::{HierarchyNode, NodeId};

/// Flat node storage used while the tree is being grown.
struct Slot {
    id: NodeId,
    label: String,
    level: Level,
    depth: usize,
    parent: Option<usize>,
    aggregate_count: u64,
    record_count: usize,
    children: Vec<usize>,
    /// label → slot index among this slot's children
    index: HashMap<String, usize>,
}

#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    roots: Vec<usize>,
    root_index: HashMap<String, usize>,
}

impl Arena {
    fn child_or_insert(
        &mut self,
        parent: Option<usize>,
        label: String,
        level: Level,
        depth: usize,
    ) -> usize {
        let existing = match parent {
            Some(p) => self.slots[p].index.get(&label),
            None => self.root_index.get(&label),
        };
        if let Some(&slot) = existing {
            return slot;
        }

        let id = match parent {
            Some(p) => self.slots[p].id.child(&label),
            None => NodeId::root(&label),
        };
        let slot = self.slots.len();
        self.slots.push(Slot {
            id,
            label: label.clone(),
            level,
            depth,
            parent,
            aggregate_count: 0,
            record_count: 0,
            children: Vec::new(),
            index: HashMap::new(),
        });

        match parent {
            Some(p) => {
                self.slots[p].index.insert(label, slot);
                self.slots[p].children.push(slot);
            }
            None => {
                self.root_index.insert(label, slot);
                self.roots.push(slot);
            }
        }
        slot
    }

    fn add(&mut self, record: &WorkflowRecord, order: &LevelOrder) {
        let contribution = record.contribution();
        let mut parent = None;
        for (depth, (label, level)) in order
            .path_of(record)
            .into_iter()
            .zip(order.levels().iter().copied())
            .enumerate()
        {
            let slot = self.child_or_insert(parent, label, level, depth);
            let s = &mut self.slots[slot];
            s.aggregate_count = s.aggregate_count.saturating_add(contribution);
            s.record_count += 1;
            parent = Some(slot);
        }
    }

    fn materialize(&self, slot: usize) -> HierarchyNode {
        let s = &self.slots[slot];
        HierarchyNode {
            id: s.id.clone(),
            label: s.label.clone(),
            level: s.level,
            depth: s.depth,
            aggregate_count: s.aggregate_count,
            record_count: s.record_count,
            parent: s.parent.map(|p| self.slots[p].id.clone()),
            children: s.children.iter().map(|&c| self.materialize(c)).collect(),
        }
    }

    fn into_roots(self) -> Vec<HierarchyNode> {
        self.roots.iter().map(|&r| self.materialize(r)).collect()
    }
}

/// Aggregate records in the canonical project → feed → source →
/// match process → workflow → state order.
///
/// Returns the top-level nodes in first-seen order. An empty input yields
/// an empty forest.
pub fn aggregate(records: &[WorkflowRecord]) -> Vec<HierarchyNode> {
    aggregate_with(records, &LevelOrder::canonical())
}

/// Aggregate records nesting levels in `order`.
pub fn aggregate_with(records: &[WorkflowRecord], order: &LevelOrder) -> Vec<HierarchyNode> {
    let mut arena = Arena::default();
    for record in records {
        arena.add(record, order);
    }

    tracing::debug!(
        records = records.len(),
        nodes = arena.slots.len(),
        roots = arena.roots.len(),
        "Aggregated hierarchy"
    );

    arena.into_roots()
}
