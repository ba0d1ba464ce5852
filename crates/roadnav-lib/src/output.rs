use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{NodeId, RoadNetwork};
use crate::path::{Distance, PathResult, TraceEvent};

/// Average travel speed assumed for time estimates, in km/h.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    Brief,
}

/// Endpoint of a query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn resolve(network: &RoadNetwork, id: NodeId) -> Self {
        Self {
            id,
            name: network.location_name(id).map(str::to_string),
        }
    }

    fn display_name(&self) -> String {
        display_name(self.name.as_deref(), self.id)
    }
}

/// Intersection visited along the route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Length of the road leading into this step; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl RouteStep {
    fn display_name(&self) -> String {
        display_name(self.name.as_deref(), self.id)
    }
}

/// Structured view of a [`PathResult`] with resolved names, legs and ETA.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub found: bool,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub hops: usize,
    pub total_distance: Distance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<f64>,
    pub explored: usize,
    pub budget_exhausted: bool,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEvent>,
}

impl RouteSummary {
    /// Build a summary from a search result, estimating travel time at `speed_kmh`.
    pub fn from_result(network: &RoadNetwork, result: &PathResult, speed_kmh: f64) -> Result<Self> {
        let mut steps = Vec::with_capacity(result.path.len());
        let mut previous: Option<NodeId> = None;
        for (index, &id) in result.path.iter().enumerate() {
            let distance = match previous {
                Some(from) => network.distance_between(from, id)?,
                None => None,
            };
            steps.push(RouteStep {
                index,
                id,
                name: network.location_name(id).map(str::to_string),
                distance,
            });
            previous = Some(id);
        }

        let estimated_minutes = result
            .total_distance
            .value()
            .and_then(|km| estimated_minutes(km, speed_kmh));

        Ok(Self {
            found: result.succeeded,
            start: RouteEndpoint::resolve(network, result.start),
            goal: RouteEndpoint::resolve(network, result.end),
            hops: result.hop_count(),
            total_distance: result.total_distance,
            estimated_minutes,
            explored: result.explored.len(),
            budget_exhausted: result.budget_exhausted,
            steps,
            trace: result.trace.clone(),
        })
    }

    /// Numbered turn-by-turn directions; empty for routes without a road.
    pub fn directions(&self) -> Vec<String> {
        if self.steps.len() < 2 {
            return Vec::new();
        }

        let last = self.steps.len() - 1;
        let mut directions = vec![format!("1. Start at {}", self.steps[0].display_name())];
        for step in &self.steps[1..] {
            let verb = if step.index == last {
                "Arrive at"
            } else {
                "Continue to"
            };
            directions.push(format!(
                "{}. {} {} ({:.1}km)",
                step.index + 1,
                verb,
                step.display_name(),
                step.distance.unwrap_or_default()
            ));
        }
        directions
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Brief => self.render_brief(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "No route found from {} to {} ({} intersections explored{})",
                self.start.display_name(),
                self.goal.display_name(),
                self.explored,
                if self.budget_exhausted {
                    ", search budget exhausted"
                } else {
                    ""
                }
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops
        );
        let _ = writeln!(buffer, "Distance: {}km", self.total_distance);
        if let Some(minutes) = self.estimated_minutes {
            let _ = writeln!(buffer, "Estimated time: {minutes:.0} min");
        }
        let _ = writeln!(buffer, "Intersections explored: {}", self.explored);

        let _ = writeln!(buffer, "\nRoute overview:");
        let _ = writeln!(buffer, "{}", self.overview());

        let directions = self.directions();
        if !directions.is_empty() {
            let _ = writeln!(buffer, "\nTurn-by-turn directions:");
            for line in directions {
                let _ = writeln!(buffer, "{line}");
            }
        }
        buffer
    }

    fn render_brief(&self) -> String {
        if self.found {
            format!("{} ({}km)\n", self.overview(), self.total_distance)
        } else {
            format!(
                "no route: {} -> {}\n",
                self.start.display_name(),
                self.goal.display_name()
            )
        }
    }

    fn overview(&self) -> String {
        self.steps
            .iter()
            .map(RouteStep::display_name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Travel time in minutes for `distance_km` at `speed_kmh`.
///
/// Returns `None` unless the speed is finite and positive.
pub fn estimated_minutes(distance_km: f64, speed_kmh: f64) -> Option<f64> {
    (speed_kmh.is_finite() && speed_kmh > 0.0).then(|| distance_km / speed_kmh * 60.0)
}

/// Render trace events with location names, one per line.
pub fn render_trace(network: &RoadNetwork, events: &[TraceEvent]) -> String {
    let name = |id: NodeId| display_name(network.location_name(id), id);
    let mut buffer = String::new();
    for event in events {
        let _ = match event {
            TraceEvent::Settled { node, distance } => {
                writeln!(buffer, "Exploring {} ({distance:.1}km)", name(*node))
            }
            TraceEvent::Relaxed { to, distance, .. } => {
                writeln!(buffer, "  -> Updated route to {}: {distance:.1}km", name(*to))
            }
        };
    }
    buffer
}

fn display_name(name: Option<&str>, id: NodeId) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("#{id}"),
    }
}
