//! Built-in twelve-intersection demo city.
//!
//! Intersections 0..=11 sit on a rough 3x4 grid of streets and avenues; road
//! distances are in kilometres.

use crate::error::Result;
use crate::graph::{Location, NodeId, RoadNetwork};

const INTERSECTIONS: [(&str, f64, f64); 12] = [
    ("Main St & 1st Ave", 1.0, 5.0),
    ("Park Rd & 2nd Ave", 3.0, 5.2),
    ("Oak St & 3rd Ave", 5.0, 5.1),
    ("Elm St & 1st Ave", 1.2, 4.0),
    ("Pine St & 2nd Ave", 3.1, 3.8),
    ("Maple St & 3rd Ave", 5.2, 4.1),
    ("Broadway & 1st Ave", 1.1, 2.5),
    ("Center St & 2nd Ave", 3.2, 2.3),
    ("Hill Rd & 3rd Ave", 5.3, 2.6),
    ("River St & 1st Ave", 1.3, 1.0),
    ("Lake Ave & 2nd Ave", 3.5, 0.8),
    ("Mountain Rd & 3rd Ave", 5.4, 1.1),
];

const ROADS: [(NodeId, NodeId, f64); 22] = [
    (0, 1, 2.1),
    (1, 2, 1.9),
    (0, 3, 1.2),
    (1, 4, 1.4),
    (2, 5, 1.3),
    (3, 4, 1.9),
    (4, 5, 2.1),
    (3, 6, 1.5),
    (4, 7, 1.7),
    (5, 8, 1.4),
    (6, 7, 1.8),
    (7, 8, 2.0),
    (6, 9, 1.6),
    (7, 10, 1.9),
    (8, 11, 1.5),
    (9, 10, 2.2),
    (10, 11, 1.8),
    (1, 7, 3.2),
    (4, 10, 3.5),
    (0, 6, 4.1),
    (2, 8, 3.8),
    (5, 11, 3.3),
];

/// Build the demo city road network.
pub fn demo_city() -> Result<RoadNetwork> {
    let mut network = RoadNetwork::new();
    for (id, (name, x, y)) in (0..).zip(INTERSECTIONS) {
        network.add_node(id, Some(Location::new(name).with_position(x, y)))?;
    }
    for (from, to, distance) in ROADS {
        network.add_connection(from, to, distance)?;
    }
    Ok(network)
}
