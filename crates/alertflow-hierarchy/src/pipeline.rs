//! End-to-end filter → aggregate → layout, with an optional memo.

use alertflow_model::{LevelOrder, WorkflowRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::aggregate::aggregate_with;
use crate::filter::{project, FilterSelection};
use crate::layout::{layout, ExpandedSet, Layout, LayoutOptions};
use crate::HierarchyResult;

/// Filter, aggregate and lay out `records` in one call.
pub fn build_layout(
    records: &[WorkflowRecord],
    filters: &FilterSelection,
    order: &LevelOrder,
    expanded: &ExpandedSet,
    options: &LayoutOptions,
) -> HierarchyResult<Layout> {
    options.validate()?;
    let filtered = project(records, filters);
    let roots = aggregate_with(&filtered, order);
    Ok(layout(&roots, options, expanded))
}

#[derive(Serialize)]
struct CacheKey<'a> {
    records: &'a [WorkflowRecord],
    filters: &'a FilterSelection,
    order: &'a LevelOrder,
    expanded: &'a ExpandedSet,
    options: &'a LayoutOptions,
}

impl CacheKey<'_> {
    fn digest(&self) -> HierarchyResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Remembers the most recent layout and the digest of its inputs.
///
/// A repeated call with identical records, filters, level order, expand
/// state and options returns the stored layout; anything else recomputes.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(String, Layout)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        records: &[WorkflowRecord],
        filters: &FilterSelection,
        order: &LevelOrder,
        expanded: &ExpandedSet,
        options: &LayoutOptions,
    ) -> HierarchyResult<Layout> {
        let key = CacheKey {
            records,
            filters,
            order,
            expanded,
            options,
        }
        .digest()?;

        if let Some((cached_key, cached)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                tracing::debug!(key = %&key[..12], hits = self.hits, "Layout cache hit");
                return Ok(cached.clone());
            }
        }

        let computed = build_layout(records, filters, order, expanded, options)?;
        self.misses += 1;
        self.entry = Some((key, computed.clone()));
        Ok(computed)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
