//! Route command handler for computing paths between locations.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use roadnav_lib::{find_path_with, RoadNetwork, RouteSummary, SearchOptions};

use crate::output::{format_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location: numeric id or name.
    pub from: String,
    /// Destination location: numeric id or name.
    pub to: String,
    /// Record and print the search trace.
    pub trace: bool,
    /// Average speed in km/h for the time estimate.
    pub speed: f64,
    /// Optional cap on settled intersections.
    pub max_settled: Option<usize>,
}

impl RouteCommandArgs {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            trace: self.trace,
            max_settled: self.max_settled,
        }
    }
}

/// Handle the route subcommand.
///
/// Unknown locations are errors. A valid query without a route is reported on
/// stdout and is not an error.
pub fn handle_route_command(
    network: &RoadNetwork,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let start = network.resolve_location(&args.from)?;
    let goal = network.resolve_location(&args.to)?;

    let result = find_path_with(network, start, goal, &args.search_options())?;
    info!(
        start,
        goal,
        succeeded = result.succeeded,
        explored = result.explored.len(),
        "route computed"
    );

    let summary = RouteSummary::from_result(network, &result, args.speed)?;
    let rendered = format_route(network, &summary, format, args.trace)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write route output")?;
    Ok(())
}

/// Parse a strictly positive, finite speed.
pub fn parse_speed(value: &str) -> std::result::Result<f64, String> {
    let speed: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("speed must be a positive number, got {value}"))
    }
}
