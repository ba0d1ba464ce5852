//! Locations command handler: list every intersection in the network.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use roadnav_lib::{NodeId, Position, RoadNetwork};

use crate::output::{to_json, OutputFormat};

#[derive(Debug, Clone, Serialize, PartialEq)]
struct LocationRow {
    id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    roads: usize,
}

fn location_rows(network: &RoadNetwork) -> Result<Vec<LocationRow>> {
    network
        .node_ids()
        .into_iter()
        .map(|id| {
            let location = network.location(id);
            Ok(LocationRow {
                id,
                name: location.map(|loc| loc.name.clone()),
                position: location.and_then(|loc| loc.position),
                roads: network.neighbours(id)?.len(),
            })
        })
        .collect()
}

fn render_rows(rows: &[LocationRow]) -> String {
    let mut buffer = String::new();
    for row in rows {
        let name = row.name.as_deref().unwrap_or("<unnamed>");
        let _ = match row.position {
            Some(position) => writeln!(
                buffer,
                "{:>3}. {} {} [{} roads]",
                row.id, name, position, row.roads
            ),
            None => writeln!(buffer, "{:>3}. {} [{} roads]", row.id, name, row.roads),
        };
    }
    buffer
}

/// Handle the locations subcommand.
pub fn handle_locations_command(network: &RoadNetwork, format: OutputFormat) -> Result<()> {
    let rows = location_rows(network)?;
    let rendered = match format {
        OutputFormat::Json => to_json(&rows)?,
        OutputFormat::Text | OutputFormat::Brief => render_rows(&rows),
    };

    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("failed to write location list")?;
    Ok(())
}
