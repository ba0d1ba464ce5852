//! Output formatting for route and location listings.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use roadnav_lib::{render_trace, RoadNetwork, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full summary with overview and turn-by-turn directions.
    #[default]
    Text,
    /// Single line with the route and its length.
    Brief,
    /// Pretty-printed JSON.
    Json,
}

/// Render a route summary for stdout.
///
/// With `include_trace`, text output appends the search trace. JSON output
/// always carries whatever trace the summary holds.
pub fn format_route(
    network: &RoadNetwork,
    summary: &RouteSummary,
    format: OutputFormat,
    include_trace: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Brief => Ok(summary.render(RouteRenderMode::Brief)),
        OutputFormat::Text => {
            let mut text = summary.render(RouteRenderMode::PlainText);
            if include_trace && !summary.trace.is_empty() {
                text.push_str("\nSearch trace:\n");
                text.push_str(&render_trace(network, &summary.trace));
            }
            Ok(text)
        }
    }
}

/// Serialize any value as pretty JSON with a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    json.push('\n');
    Ok(json)
}
