use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadNetwork};

/// Shortest known distance to a node, or the explicit "no path" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Finite(f64),
    Unreachable,
}

impl Distance {
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The numeric distance, or `None` for [`Distance::Unreachable`].
    pub fn value(self) -> Option<f64> {
        match self {
            Distance::Finite(value) => Some(value),
            Distance::Unreachable => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{value:.1}"),
            Distance::Unreachable => f.write_str("∞"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Distance::Finite(value) => serializer.serialize_f64(*value),
            Distance::Unreachable => serializer.serialize_none(),
        }
    }
}

/// One decision taken by the search, recorded when tracing is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// `node` was popped from the frontier and its distance finalized.
    Settled { node: NodeId, distance: f64 },
    /// The road `from -> to` improved the best known distance to `to`.
    Relaxed {
        from: NodeId,
        to: NodeId,
        weight: f64,
        distance: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<f64>,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Settled { node, distance } => {
                write!(f, "settling {node} at distance {distance:.1}")
            }
            TraceEvent::Relaxed {
                from, to, distance, ..
            } => write!(f, "relaxed edge {from}->{to}, new distance {distance:.1}"),
        }
    }
}

/// Knobs for a single query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Record a [`TraceEvent`] for every settle and relax step.
    pub trace: bool,
    /// Stop after this many nodes have been settled.
    pub max_settled: Option<usize>,
}

impl SearchOptions {
    pub fn traced() -> Self {
        Self {
            trace: true,
            max_settled: None,
        }
    }

    pub fn with_max_settled(mut self, limit: usize) -> Self {
        self.max_settled = Some(limit);
        self
    }
}

/// Immutable outcome of one shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub start: NodeId,
    pub end: NodeId,
    /// Nodes from `start` to `end` inclusive; empty when no path exists.
    pub path: Vec<NodeId>,
    pub total_distance: Distance,
    /// Nodes in the order they were settled.
    pub explored: Vec<NodeId>,
    /// Empty unless tracing was requested.
    pub trace: Vec<TraceEvent>,
    pub succeeded: bool,
    /// The settle budget stopped the search before `end` was reached.
    pub budget_exhausted: bool,
}

impl PathResult {
    /// Number of roads travelled along the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Find the shortest path between `start` and `end`.
///
/// Unknown endpoints are reported as [`Error::UnknownNode`]; an unreachable
/// `end` is a successful call returning a result with `succeeded == false`.
pub fn find_path(
    graph: &RoadNetwork,
    start: NodeId,
    end: NodeId,
    trace_enabled: bool,
) -> Result<PathResult> {
    let options = SearchOptions {
        trace: trace_enabled,
        max_settled: None,
    };
    find_path_with(graph, start, end, &options)
}

/// Run Dijkstra's algorithm with early exit at `end`.
///
/// The frontier tolerates stale duplicate entries instead of decreasing keys;
/// they are discarded when popped for an already settled node. Entries with
/// equal distance pop in ascending node order.
///
/// A relaxation whose sum overflows to infinity is skipped, so a node only
/// reachable through such a sum is reported as unreachable.
pub fn find_path_with(
    graph: &RoadNetwork,
    start: NodeId,
    end: NodeId,
    options: &SearchOptions,
) -> Result<PathResult> {
    if !graph.contains(start) {
        return Err(Error::UnknownNode { id: start });
    }
    if !graph.contains(end) {
        return Err(Error::UnknownNode { id: end });
    }

    debug!(start, end, trace = options.trace, "starting path search");

    let mut best: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut explored = Vec::new();
    let mut events = Vec::new();
    let mut queue = BinaryHeap::new();
    let mut budget_exhausted = false;

    best.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if settled.contains(&current) {
            continue;
        }
        if options
            .max_settled
            .is_some_and(|limit| explored.len() >= limit)
        {
            budget_exhausted = true;
            break;
        }

        let current_distance = entry.cost.0;
        settled.insert(current);
        explored.push(current);
        trace!(node = current, distance = current_distance, "settled");
        if options.trace {
            events.push(TraceEvent::Settled {
                node: current,
                distance: current_distance,
            });
        }

        if current == end {
            break;
        }

        for edge in graph.neighbours(current)? {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let candidate = current_distance + edge.distance;
            if !candidate.is_finite() {
                warn!(from = current, to = next, "road distance sum overflowed; skipping");
                continue;
            }
            let previous = best.get(&next).copied();
            if previous.is_none_or(|known| candidate < known) {
                best.insert(next, candidate);
                parents.insert(next, current);
                queue.push(QueueEntry::new(next, candidate));
                trace!(from = current, to = next, distance = candidate, "relaxed");
                if options.trace {
                    events.push(TraceEvent::Relaxed {
                        from: current,
                        to: next,
                        weight: edge.distance,
                        distance: candidate,
                        previous,
                    });
                }
            }
        }
    }

    let reached = settled.contains(&end);
    let (path, total_distance) = match best.get(&end) {
        Some(&distance) if reached => (
            reconstruct_path(&parents, start, end),
            Distance::Finite(distance),
        ),
        _ => (Vec::new(), Distance::Unreachable),
    };
    let succeeded = path.first() == Some(&start);

    debug!(
        start,
        end,
        settled = explored.len(),
        succeeded,
        budget_exhausted,
        "path search finished"
    );

    Ok(PathResult {
        start,
        end,
        path,
        total_distance,
        explored,
        trace: events,
        succeeded,
        budget_exhausted,
    })
}

fn reconstruct_path(parents: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by node.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
