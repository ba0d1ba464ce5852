//! roadnav library entry points.
//!
//! This crate owns the road network store, the shortest-path engine and the
//! structured result/trace it produces. Presentation layers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.

pub mod city;
pub mod definition;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod stats;

pub use city::demo_city;
pub use definition::{load_network, NetworkDefinition};
pub use error::{Error, Result};
pub use graph::{Connection, Edge, Location, NodeId, Position, RoadNetwork, SharedNetwork};
pub use output::{
    estimated_minutes, render_trace, RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary,
    DEFAULT_SPEED_KMH,
};
pub use path::{find_path, find_path_with, Distance, PathResult, SearchOptions, TraceEvent};
pub use stats::{
    all_pairs, network_stats, DistanceMatrix, NetworkStats, NodeDegree, PairDistance, PairStats,
};
