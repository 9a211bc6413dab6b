//! Alertflow hierarchy - aggregation, layout and filtering
//!
//! Turns a flat list of workflow records into a six-level tree with
//! additive alert counts, positions the visible part of that tree on a
//! leveled grid, and narrows records with per-level multi-select filters.
//!
//! Data flows `project` → `aggregate` → `layout`; each step is a pure
//! function of its inputs and may be re-run from scratch on every change.

pub mod aggregate;
pub mod drilldown;
pub mod error;
pub mod filter;
pub mod layout;
pub mod node;
pub mod pipeline;

pub use aggregate::{aggregate, aggregate_with};
pub use drilldown::Drilldown;
pub use error::*;
pub use filter::{project, FilterSelection};
pub use layout::{layout, Edge, ExpandedSet, Layout, LayoutOptions, PositionedNode};
pub use node::{find, walk, HierarchyNode, NodeId};
pub use pipeline::{build_layout, LayoutCache};
