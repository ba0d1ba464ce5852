//! Stats command handler: connectivity and distance analysis for the whole network.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use roadnav_lib::{
    all_pairs, network_stats, DistanceMatrix, NetworkStats, NodeDegree, NodeId, PairStats,
    RoadNetwork,
};

use crate::output::{to_json, OutputFormat};

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    network: &'a NetworkStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pairs: Option<PairStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<&'a DistanceMatrix>,
}

fn name_of(network: &RoadNetwork, id: NodeId) -> String {
    network
        .location_name(id)
        .map_or_else(|| format!("#{id}"), str::to_string)
}

fn describe(node: &NodeDegree) -> String {
    let name = node
        .name
        .clone()
        .unwrap_or_else(|| format!("#{}", node.id));
    format!("{name} ({} roads)", node.roads)
}

fn render_report(network: &RoadNetwork, report: &StatsReport<'_>) -> String {
    let stats = report.network;
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Network statistics:");
    let _ = writeln!(buffer, "  Intersections: {}", stats.intersections);
    let _ = writeln!(buffer, "  Roads: {}", stats.roads);
    let _ = writeln!(
        buffer,
        "  Roads per intersection: min {}, max {}, average {:.1}",
        stats.min_degree, stats.max_degree, stats.average_degree
    );
    if let Some(node) = &stats.most_connected {
        let _ = writeln!(buffer, "  Most connected: {}", describe(node));
    }
    if let Some(node) = &stats.least_connected {
        let _ = writeln!(buffer, "  Least connected: {}", describe(node));
    }
    let _ = writeln!(
        buffer,
        "  Connectivity: {:.1}% ({}/{} pairs reachable)",
        stats.connectivity_percent(),
        stats.reachable_pairs,
        stats.total_pairs
    );

    if let Some(pairs) = report.pairs {
        let _ = writeln!(buffer, "\nDistance analysis:");
        let _ = writeln!(buffer, "  Average distance: {:.1}km", pairs.average);
        for (label, pair) in [("Shortest", pairs.shortest), ("Longest", pairs.longest)] {
            let _ = writeln!(
                buffer,
                "  {label}: {:.1}km ({} -> {})",
                pair.distance,
                name_of(network, pair.from),
                name_of(network, pair.to)
            );
        }
    }

    if let Some(matrix) = report.matrix {
        let _ = writeln!(buffer, "\nDistance matrix (km):");
        let _ = write!(buffer, "{:>5}", "");
        for id in &matrix.ids {
            let _ = write!(buffer, "{id:>6}");
        }
        let _ = writeln!(buffer);
        for (id, row) in matrix.ids.iter().zip(&matrix.distances) {
            let _ = write!(buffer, "{id:>5}");
            for distance in row {
                let cell = distance.value().map_or_else(|| "-".to_string(), |d| format!("{d:.1}"));
                let _ = write!(buffer, "{cell:>6}");
            }
            let _ = writeln!(buffer);
        }
    }
    buffer
}

/// Handle the stats subcommand.
pub fn handle_stats_command(
    network: &RoadNetwork,
    format: OutputFormat,
    include_matrix: bool,
) -> Result<()> {
    let matrix = all_pairs(network)?;
    let stats = network_stats(network, &matrix)?;
    info!(
        intersections = stats.intersections,
        reachable_pairs = stats.reachable_pairs,
        "network analysed"
    );

    let report = StatsReport {
        network: &stats,
        pairs: matrix.pair_stats(),
        matrix: include_matrix.then_some(&matrix),
    };
    let rendered = match format {
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Brief => format!(
            "{} intersections, {} roads, {:.1}% connected\n",
            stats.intersections,
            stats.roads,
            stats.connectivity_percent()
        ),
        OutputFormat::Text => render_report(network, &report),
    };

    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("failed to write network statistics")?;
    Ok(())
}
