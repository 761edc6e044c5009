//! Route search over the transport network.
//!
//! The planner resolves the two stop names, runs a depth-first traversal
//! from the origin and reconstructs the discovered edge path. The
//! traversal is unweighted: the returned route is *a* path, with no
//! shortest-path or minimum-cost guarantee.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::route_from_traversal;
use crate::model::{Stop, TransportNetwork, TransportSegment};

/// Number of fuzzy suggestions attached to unknown-stop errors.
const SUGGESTION_LIMIT: usize = 3;

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: Stop,
    pub goal: Stop,
    pub segments: Vec<TransportSegment>,
}

impl RoutePlan {
    /// Number of segments in the route.
    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }

    /// Sum of the travel durations of all segments.
    pub fn total_duration(&self) -> Duration {
        self.segments
            .iter()
            .map(TransportSegment::travel_duration)
            .sum()
    }
}

/// Compute a route between two stop names.
///
/// Resolves both names (unknown names fail with [`Error::UnknownStop`]
/// carrying fuzzy suggestions), traverses the network depth-first from the
/// origin and reconstructs the edge path. A destination the traversal never
/// reaches fails with [`Error::RouteNotFound`].
pub fn plan_route(network: &TransportNetwork, start: &str, goal: &str) -> Result<RoutePlan> {
    let start = resolve_stop(network, start)?.clone();
    let goal = resolve_stop(network, goal)?.clone();

    let traversal = network.depth_first_search(&start)?;
    let segments = route_from_traversal(&traversal, &start, &goal).map_err(|err| match err {
        Error::DestinationNotVisited | Error::SourceNotInTraversal => Error::RouteNotFound {
            start: start.name().to_string(),
            goal: goal.name().to_string(),
        },
        other => other,
    })?;

    debug!(
        start = start.name(),
        goal = goal.name(),
        hops = segments.len(),
        "route found"
    );
    Ok(RoutePlan {
        start,
        goal,
        segments,
    })
}

/// Resolve a stop name, returning an error with suggestions for unknown
/// names.
fn resolve_stop<'a>(network: &'a TransportNetwork, name: &str) -> Result<&'a Stop> {
    network.stop_by_name(name).ok_or_else(|| Error::UnknownStop {
        name: name.to_string(),
        suggestions: network.fuzzy_stop_matches(name, SUGGESTION_LIMIT),
    })
}
