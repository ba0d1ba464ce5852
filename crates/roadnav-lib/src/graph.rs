use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Numeric identifier for an intersection.
pub type NodeId = u32;

/// Read-only network snapshot shared between concurrent queries.
pub type SharedNetwork = Arc<RoadNetwork>;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Planar map coordinates of an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Display attributes attached to an intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }
}

/// One direction of a bidirectional road, as seen from its source node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub distance: f64,
}

/// Undirected road listed once by [`RoadNetwork::connections`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
}

/// Road network: intersections plus bidirectional weighted roads.
///
/// Every road is stored in both adjacency lists. `add_connection` and
/// `remove_connection` are the only mutators of the adjacency and always
/// touch both directions, so `(b, w)` in `neighbours(a)` implies `(a, w)` in
/// `neighbours(b)`.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    locations: HashMap<NodeId, Location>,
    name_to_id: HashMap<String, NodeId>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an intersection, optionally with display attributes.
    ///
    /// Duplicate identifiers are rejected with [`Error::DuplicateNode`].
    pub fn add_node(&mut self, id: NodeId, location: Option<Location>) -> Result<()> {
        if self.adjacency.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }

        self.adjacency.insert(id, Vec::new());
        if let Some(location) = location {
            self.name_to_id
                .entry(location.name.to_lowercase())
                .or_insert(id);
            self.locations.insert(id, location);
        }
        Ok(())
    }

    /// Insert a bidirectional road between `a` and `b`.
    ///
    /// Both endpoints must exist, must differ, and `weight` must be finite and
    /// non-negative. The network is left untouched when validation fails.
    /// Parallel roads between the same pair are kept.
    pub fn add_connection(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<()> {
        self.ensure_node(a)?;
        self.ensure_node(b)?;
        if a == b {
            return Err(Error::SelfLoop { node: a });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: a,
                to: b,
                weight,
            });
        }

        if let Some(edges) = self.adjacency.get_mut(&a) {
            edges.push(Edge {
                target: b,
                distance: weight,
            });
        }
        if let Some(edges) = self.adjacency.get_mut(&b) {
            edges.push(Edge {
                target: a,
                distance: weight,
            });
        }
        Ok(())
    }

    /// Remove every road between `a` and `b`, returning how many were removed.
    pub fn remove_connection(&mut self, a: NodeId, b: NodeId) -> Result<usize> {
        self.ensure_node(a)?;
        self.ensure_node(b)?;

        let mut removed = 0;
        if let Some(edges) = self.adjacency.get_mut(&a) {
            let before = edges.len();
            edges.retain(|edge| edge.target != b);
            removed = before - edges.len();
        }
        if let Some(edges) = self.adjacency.get_mut(&b) {
            edges.retain(|edge| edge.target != a);
        }
        Ok(removed)
    }

    /// Return the roads leaving `node`. Isolated nodes yield an empty slice.
    pub fn neighbours(&self, node: NodeId) -> Result<&[Edge]> {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownNode { id: node })
    }

    /// Distance of the cheapest road directly joining `a` and `b`, if any.
    pub fn distance_between(&self, a: NodeId, b: NodeId) -> Result<Option<f64>> {
        self.ensure_node(b)?;
        Ok(self
            .neighbours(a)?
            .iter()
            .filter(|edge| edge.target == b)
            .map(|edge| edge.distance)
            .min_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal)))
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// All node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected roads.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Every undirected road once, with `from < to`, ordered by endpoints.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections: Vec<Connection> = self
            .adjacency
            .iter()
            .flat_map(|(&from, edges)| {
                edges
                    .iter()
                    .filter(move |edge| from < edge.target)
                    .map(move |edge| Connection {
                        from,
                        to: edge.target,
                        distance: edge.distance,
                    })
            })
            .collect();
        connections.sort_by(|a, b| {
            (a.from, a.to)
                .cmp(&(b.from, b.to))
                .then_with(|| a.distance.total_cmp(&b.distance))
        });
        connections
    }

    /// Display attributes for a node, when registered with any.
    pub fn location(&self, node: NodeId) -> Option<&Location> {
        self.locations.get(&node)
    }

    /// Display name of a node, when registered with one.
    pub fn location_name(&self, node: NodeId) -> Option<&str> {
        self.locations.get(&node).map(|loc| loc.name.as_str())
    }

    /// Look up a node by its case-insensitive location name.
    pub fn location_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(&name.trim().to_lowercase()).copied()
    }

    /// Location names similar to `query`, best match first.
    pub fn fuzzy_location_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .values()
            .filter_map(|loc| {
                let candidate = loc.name.to_lowercase();
                let score = if !needle.is_empty() && candidate.contains(&needle) {
                    1.0
                } else {
                    strsim::jaro_winkler(&needle, &candidate)
                };
                (score >= SUGGESTION_THRESHOLD).then_some((score, loc.name.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Resolve a user-supplied location reference: a numeric id or a name.
    pub fn resolve_location(&self, query: &str) -> Result<NodeId> {
        if let Ok(id) = query.trim().parse::<NodeId>() {
            self.ensure_node(id)?;
            return Ok(id);
        }

        self.location_id_by_name(query)
            .ok_or_else(|| Error::UnknownLocation {
                name: query.to_string(),
                suggestions: self.fuzzy_location_matches(query, 3),
            })
    }

    /// Freeze the network into a read-only snapshot for concurrent queries.
    pub fn into_shared(self) -> SharedNetwork {
        debug!(
            nodes = self.node_count(),
            roads = self.edge_count(),
            "sharing road network snapshot"
        );
        Arc::new(self)
    }

    fn ensure_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode { id: node })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network
            .add_node(1, Some(Location::new("Oak St").with_position(0.0, 0.0)))
            .unwrap();
        network
            .add_node(2, Some(Location::new("Elm St").with_position(3.0, 4.0)))
            .unwrap();
        network.add_node(3, None).unwrap();
        network.add_connection(1, 2, 5.0).unwrap();
        network.add_connection(2, 3, 1.5).unwrap();
        network
    }

    #[test]
    fn position_distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn connections_lists_each_road_once() {
        let network = triangle();
        let roads = network.connections();
        assert_eq!(roads.len(), 2);
        assert_eq!((roads[0].from, roads[0].to), (1, 2));
        assert_eq!((roads[1].from, roads[1].to), (2, 3));
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let network = triangle();
        assert_eq!(network.location_id_by_name("oak st"), Some(1));
        assert_eq!(network.location_id_by_name("  ELM ST "), Some(2));
        assert_eq!(network.location_id_by_name("Pine St"), None);
    }

    #[test]
    fn resolve_location_prefers_numeric_ids() {
        let network = triangle();
        assert_eq!(network.resolve_location("3").unwrap(), 3);
        assert_eq!(network.resolve_location("Elm St").unwrap(), 2);
        assert!(matches!(
            network.resolve_location("42"),
            Err(Error::UnknownNode { id: 42 })
        ));
    }

    #[test]
    fn resolve_location_suggests_close_names() {
        let network = triangle();
        let err = network.resolve_location("Oak Stt").unwrap_err();
        match err {
            Error::UnknownLocation { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("Oak St"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
