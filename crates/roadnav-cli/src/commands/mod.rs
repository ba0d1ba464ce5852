// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches.

pub mod locations;
pub mod route;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use roadnav_lib::{demo_city, load_network, RoadNetwork};

/// Load the network named by `--network`, or the built-in demo city.
pub fn load_network_or_demo(path: Option<&Path>) -> Result<RoadNetwork> {
    match path {
        Some(path) => load_network(path)
            .with_context(|| format!("failed to load network from {}", path.display())),
        None => {
            debug!("no network definition given; using the demo city");
            demo_city().context("failed to build the demo city")
        }
    }
}
