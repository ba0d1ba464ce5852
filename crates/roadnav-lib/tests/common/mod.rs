//! Shared helpers for roadnav-lib integration tests.

use std::collections::HashSet;

use roadnav_lib::{NodeId, RoadNetwork};

/// Build a network with unnamed nodes `0..node_count` and the given roads.
pub fn network_from(node_count: NodeId, roads: &[(NodeId, NodeId, f64)]) -> RoadNetwork {
    let mut network = RoadNetwork::new();
    for id in 0..node_count {
        network.add_node(id, None).expect("fresh node id");
    }
    for &(from, to, distance) in roads {
        network
            .add_connection(from, to, distance)
            .expect("valid road");
    }
    network
}

/// Deterministic pseudo-random roads over `node_count` nodes.
///
/// Roughly two thirds of node pairs are connected; weights range over
/// 0.0..=4.0 in steps of 0.5, zero included.
#[allow(dead_code)]
pub fn synthetic_roads(node_count: NodeId, seed: u32) -> Vec<(NodeId, NodeId, f64)> {
    let mut roads = Vec::new();
    for a in 0..node_count {
        for b in (a + 1)..node_count {
            let mix = a.wrapping_mul(31) ^ b.wrapping_mul(17) ^ seed.wrapping_mul(101);
            if mix % 3 == 0 {
                continue;
            }
            let weight = f64::from((a * 13 + b * 7 + seed * 3) % 9) * 0.5;
            roads.push((a, b, weight));
        }
    }
    roads
}

/// Cheapest simple-path cost between `start` and `end` by exhaustive search.
#[allow(dead_code)]
pub fn brute_force_distance(network: &RoadNetwork, start: NodeId, end: NodeId) -> Option<f64> {
    fn walk(
        network: &RoadNetwork,
        current: NodeId,
        end: NodeId,
        cost: f64,
        visited: &mut HashSet<NodeId>,
        best: &mut Option<f64>,
    ) {
        if current == end {
            if best.is_none_or(|known| cost < known) {
                *best = Some(cost);
            }
            return;
        }
        for edge in network.neighbours(current).expect("known node") {
            if visited.insert(edge.target) {
                walk(network, edge.target, end, cost + edge.distance, visited, best);
                visited.remove(&edge.target);
            }
        }
    }

    let mut best = None;
    let mut visited = HashSet::from([start]);
    walk(network, start, end, 0.0, &mut visited, &mut best);
    best
}

/// Sum of road lengths along `path`, failing if consecutive nodes are not adjacent.
#[allow(dead_code)]
pub fn path_length(network: &RoadNetwork, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|pair| {
            network
                .distance_between(pair[0], pair[1])
                .expect("known nodes")
                .expect("consecutive path nodes are connected")
        })
        .fold(0.0, |total, leg| total + leg)
}
