use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use alertflow_hierarchy::{
    aggregate_with, build_layout, project, walk, ExpandedSet, HierarchyNode, NodeId,
};
use alertflow_model::{import_rows, sample_records, Level, RecordField, WorkflowRecord};
use alertflow_views::{
    distinct_values, CrossTab, Heatmap, SankeyFlows, SortDirection, SummaryReport, Table,
};

use crate::cli::{Cli, Command};
use crate::config::AlertflowConfig;

/// Read records from `input`, or fall back to the built-in sample dataset.
/// With `raw`, the file holds spreadsheet rows keyed by free-form headers.
pub fn load_records(input: Option<&Path>, raw: bool) -> anyhow::Result<Vec<WorkflowRecord>> {
    let Some(path) = input else {
        debug!("Using built-in sample dataset");
        return Ok(sample_records());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records = if raw {
        import_rows(&text).with_context(|| format!("failed to import rows from {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse records from {}", path.display()))?
    };
    Ok(records)
}

/// Indented text rendering, two spaces per depth: `label [alerts]`.
pub fn render_tree(roots: &[HierarchyNode]) -> String {
    let mut out = String::new();
    for node in walk(roots) {
        let _ = writeln!(
            out,
            "{}{} [{}]",
            "  ".repeat(node.depth),
            node.label,
            node.aggregate_count
        );
    }
    out
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Execute `cli.command` and return the text to print.
pub fn run(cli: &Cli, config: &AlertflowConfig) -> anyhow::Result<String> {
    let all = load_records(cli.input.as_deref(), cli.raw)?;

    let mut filters = config.filter_selection()?;
    for expr in &cli.filters {
        filters.apply_expression(expr)?;
    }
    if let Some(term) = &cli.search {
        filters.set_search(term);
    }
    let records = project(&all, &filters);
    if !filters.is_empty() {
        info!(total = all.len(), kept = records.len(), "Applied filters");
    }

    match &cli.command {
        Command::Tree => {
            let roots = aggregate_with(&records, &config.level_order()?);
            Ok(render_tree(&roots))
        }
        Command::Layout {
            expand_all,
            depth,
            expand,
        } => {
            let order = config.level_order()?;
            // Expand state is keyed by node id, so it is resolved against
            // the filtered tree before the pipeline runs.
            let roots = aggregate_with(&records, &order);
            let mut expanded = match (*expand_all, *depth) {
                (true, _) => ExpandedSet::all(&roots),
                (false, Some(depth)) => ExpandedSet::to_depth(&roots, depth),
                (false, None) => ExpandedSet::new(),
            };
            for id in expand {
                expanded.expand(NodeId::from(id.as_str()));
            }
            let positioned = build_layout(&all, &filters, &order, &expanded, &config.layout)?;
            info!(
                nodes = positioned.nodes.len(),
                edges = positioned.edges.len(),
                "Computed layout"
            );
            to_json(&positioned)
        }
        Command::Summary { name } => {
            let name = name.as_deref().unwrap_or(&config.views.report_name);
            to_json(&SummaryReport::build(name, &records, Utc::now()))
        }
        Command::Matrix { rows, columns } => {
            let (rows, columns) = (rows.parse::<Level>()?, columns.parse::<Level>()?);
            to_json(&CrossTab::build(&records, rows, columns, &config.views.thresholds))
        }
        Command::Heatmap { rows, columns } => {
            let (rows, columns) = (rows.parse::<Level>()?, columns.parse::<Level>()?);
            to_json(&Heatmap::build(&records, rows, columns))
        }
        Command::Sankey { stages } => {
            let flows = if stages.is_empty() {
                SankeyFlows::build(&records)
            } else {
                let stages = stages
                    .iter()
                    .map(|s| s.parse::<Level>())
                    .collect::<Result<Vec<_>, _>>()?;
                SankeyFlows::build_with_stages(&records, &stages)
            };
            to_json(&flows)
        }
        Command::Table { sort, desc } => {
            let field: RecordField = sort.parse()?;
            let direction = if *desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            to_json(&Table::build(&records, field, direction))
        }
        Command::Values { level } => to_json(&distinct_values(&records, level.parse::<Level>()?)),
    }
}
