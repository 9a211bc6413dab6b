//! Alertflow views - record-level breakdowns for tabular renderers
//!
//! The matrix, heatmap, sankey, report and table surfaces group the filtered
//! record list on their own rather than through the six-level tree. All of
//! them count alerts with [`WorkflowRecord::contribution`] so their totals
//! agree with the hierarchy.
//!
//! [`WorkflowRecord::contribution`]: alertflow_model::WorkflowRecord::contribution

pub mod crosstab;
pub mod grouping;
pub mod heatmap;
pub mod sankey;
pub mod summary;
pub mod table;

pub use crosstab::{CrossTab, CrossTabCell, CrossTabRow, Severity, SeverityThresholds};
pub use grouping::distinct_values;
pub use heatmap::{Heatmap, HeatmapCell, HeatmapRow, IntensityBand};
pub use sankey::{ColumnNode, SankeyColumn, SankeyFlow, SankeyFlows};
pub use summary::{ProjectBreakdown, StateAnalysis, SummaryReport};
pub use table::{SortDirection, Table};
