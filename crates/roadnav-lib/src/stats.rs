//! Whole-network analysis: connectivity statistics and all-pairs distances.
//!
//! Everything here is derived from repeated [`find_path`] queries, so the
//! numbers always agree with what a single route query would report.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{NodeId, RoadNetwork};
use crate::path::{find_path, Distance};

/// Intersection together with its number of roads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeDegree {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub roads: usize,
}

impl NodeDegree {
    fn resolve(network: &RoadNetwork, id: NodeId, roads: usize) -> Self {
        Self {
            id,
            name: network.location_name(id).map(str::to_string),
            roads,
        }
    }
}

/// Shortest distances between every ordered pair of intersections.
///
/// Rows and columns follow `ids`, which is sorted ascending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceMatrix {
    pub ids: Vec<NodeId>,
    pub distances: Vec<Vec<Distance>>,
}

/// One ordered pair of intersections and the shortest distance between them.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PairDistance {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
}

/// Aggregates over every reachable pair of distinct intersections.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PairStats {
    pub pairs: usize,
    pub average: f64,
    pub shortest: PairDistance,
    pub longest: PairDistance,
}

impl DistanceMatrix {
    /// Distance from `from` to `to`, or `None` when either id is not in the matrix.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<Distance> {
        let row = self.ids.binary_search(&from).ok()?;
        let column = self.ids.binary_search(&to).ok()?;
        Some(self.distances[row][column])
    }

    /// Reachable ordered pairs of distinct intersections, in row-major order.
    pub fn reachable_pairs(&self) -> impl Iterator<Item = PairDistance> + '_ {
        self.ids.iter().enumerate().flat_map(move |(row, &from)| {
            self.ids
                .iter()
                .enumerate()
                .filter(move |&(column, _)| column != row)
                .filter_map(move |(column, &to)| {
                    self.distances[row][column]
                        .value()
                        .map(|distance| PairDistance { from, to, distance })
                })
        })
    }

    /// Average, shortest and longest pair distance; `None` if no pair is reachable.
    ///
    /// Ties keep the first pair in row-major order.
    pub fn pair_stats(&self) -> Option<PairStats> {
        let mut pairs = self.reachable_pairs();
        let first = pairs.next()?;
        let mut stats = PairStats {
            pairs: 1,
            average: first.distance,
            shortest: first,
            longest: first,
        };
        for pair in pairs {
            stats.pairs += 1;
            stats.average += pair.distance;
            if pair.distance < stats.shortest.distance {
                stats.shortest = pair;
            }
            if pair.distance > stats.longest.distance {
                stats.longest = pair;
            }
        }
        stats.average /= stats.pairs as f64;
        Some(stats)
    }
}

/// Degree distribution and reachability of a road network.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NetworkStats {
    pub intersections: usize,
    pub roads: usize,
    pub min_degree: usize,
    pub max_degree: usize,
    pub average_degree: f64,
    /// Highest degree; ties go to the lowest id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_connected: Option<NodeDegree>,
    /// Lowest degree; ties go to the lowest id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub least_connected: Option<NodeDegree>,
    pub reachable_pairs: usize,
    pub total_pairs: usize,
}

impl NetworkStats {
    /// Percentage of ordered pairs of distinct intersections that are connected.
    ///
    /// A network with fewer than two intersections counts as fully connected.
    pub fn connectivity_percent(&self) -> f64 {
        if self.total_pairs == 0 {
            100.0
        } else {
            self.reachable_pairs as f64 / self.total_pairs as f64 * 100.0
        }
    }
}

/// Run one shortest-path query per ordered pair of intersections.
pub fn all_pairs(network: &RoadNetwork) -> Result<DistanceMatrix> {
    let ids = network.node_ids();
    let mut distances = Vec::with_capacity(ids.len());
    for &from in &ids {
        let mut row = Vec::with_capacity(ids.len());
        for &to in &ids {
            row.push(find_path(network, from, to, false)?.total_distance);
        }
        distances.push(row);
    }

    debug!(intersections = ids.len(), "computed all-pairs distances");
    Ok(DistanceMatrix { ids, distances })
}

/// Compute degree and reachability statistics from a precomputed matrix.
pub fn network_stats(network: &RoadNetwork, matrix: &DistanceMatrix) -> Result<NetworkStats> {
    let mut degrees = Vec::with_capacity(matrix.ids.len());
    for &id in &matrix.ids {
        degrees.push((id, network.neighbours(id)?.len()));
    }

    // Ids are ascending and `max_by_key` keeps the last maximum, hence `rev`.
    let least = degrees.iter().min_by_key(|&&(_, roads)| roads).copied();
    let most = degrees.iter().rev().max_by_key(|&&(_, roads)| roads).copied();
    let total_degree: usize = degrees.iter().map(|&(_, roads)| roads).sum();
    let intersections = degrees.len();

    Ok(NetworkStats {
        intersections,
        roads: network.edge_count(),
        min_degree: least.map_or(0, |(_, roads)| roads),
        max_degree: most.map_or(0, |(_, roads)| roads),
        average_degree: if intersections == 0 {
            0.0
        } else {
            total_degree as f64 / intersections as f64
        },
        most_connected: most.map(|(id, roads)| NodeDegree::resolve(network, id, roads)),
        least_connected: least.map(|(id, roads)| NodeDegree::resolve(network, id, roads)),
        reachable_pairs: matrix.reachable_pairs().count(),
        total_pairs: intersections * intersections.saturating_sub(1),
    })
}
