//! JSON network definitions.
//!
//! A definition lists locations and roads:
//!
//! ```json
//! {
//!   "locations": [
//!     { "id": 0, "name": "Depot", "position": [0.0, 0.0] },
//!     { "id": 1 }
//!   ],
//!   "roads": [{ "from": 0, "to": 1, "distance": 2.5 }]
//! }
//! ```
//!
//! Loading replays every entry through [`RoadNetwork::add_node`] and
//! [`RoadNetwork::add_connection`], so duplicate ids, unknown endpoints and
//! invalid weights fail exactly as they would when building by hand.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Location, NodeId, Position, RoadNetwork};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDefinition {
    pub locations: Vec<LocationDefinition>,
    #[serde(default)]
    pub roads: Vec<RoadDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationDefinition {
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadDefinition {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
}

impl NetworkDefinition {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build a road network from this definition.
    pub fn build(&self) -> Result<RoadNetwork> {
        if self.locations.is_empty() {
            return Err(Error::InvalidNetworkDefinition {
                message: "definition contains no locations".to_string(),
            });
        }

        let mut network = RoadNetwork::new();
        for entry in &self.locations {
            let location = match (&entry.name, entry.position) {
                (Some(name), position) => Some(Location {
                    name: name.clone(),
                    position: position.map(|[x, y]| Position::new(x, y)),
                }),
                (None, Some(_)) => {
                    return Err(Error::InvalidNetworkDefinition {
                        message: format!("location {} has a position but no name", entry.id),
                    });
                }
                (None, None) => None,
            };
            network.add_node(entry.id, location)?;
        }
        for road in &self.roads {
            network.add_connection(road.from, road.to, road.distance)?;
        }

        debug!(
            locations = network.node_count(),
            roads = network.edge_count(),
            "built road network from definition"
        );
        Ok(network)
    }
}

/// Load and build a road network from a JSON definition file.
pub fn load_network(path: &Path) -> Result<RoadNetwork> {
    debug!(path = %path.display(), "loading network definition");
    let contents = fs::read_to_string(path)?;
    NetworkDefinition::from_json_str(&contents)?.build()
}
