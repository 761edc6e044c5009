use std::collections::HashMap;

use crate::error::Result;
use crate::geo::GeographicPosition;
use crate::graph::Graph;
use crate::model::{Line, Stop, TransportSegment, Variant};

/// Similarity below which a stop name is not worth suggesting.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// The full transport network: a graph of stops and transport segments plus
/// the lines that own the segments through their variants.
///
/// The network is created empty, populated by add-operations during
/// ingestion or manual construction, and treated as read-only once queries
/// begin; no deletion operations exist.
#[derive(Debug, Clone, Default)]
pub struct TransportNetwork {
    pub(crate) graph: Graph<Stop, TransportSegment>,
    pub(crate) lines: Vec<Line>,
}

impl TransportNetwork {
    /// Create a network with no lines, no stops and no segments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop as a vertex of the underlying graph. Idempotent.
    pub fn add_stop(&mut self, stop: Stop) {
        self.graph.add_vertex(stop);
    }

    /// Add a segment as an edge of the underlying graph, adding missing
    /// endpoint stops along the way. Idempotent.
    pub fn add_segment(&mut self, segment: TransportSegment) {
        self.graph.add_edge(segment);
    }

    /// Add a line. Adding a line equal to one already present is a no-op
    /// returning `false`.
    pub fn add_line(&mut self, line: Line) -> bool {
        if self.lines.contains(&line) {
            return false;
        }
        self.lines.push(line);
        true
    }

    /// The lines of this network in insertion order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All variants of all lines.
    pub fn variants(&self) -> Vec<&Variant> {
        self.lines.iter().flat_map(|line| line.variants()).collect()
    }

    /// All stops of this network, in unspecified order.
    pub fn stops(&self) -> Vec<&Stop> {
        self.graph.vertices()
    }

    /// All transport segments of this network, in unspecified vertex order.
    pub fn segments(&self) -> Vec<&TransportSegment> {
        self.graph.edges()
    }

    /// The stop of this network equal to `stop`, if present.
    pub fn find_stop(&self, stop: &Stop) -> Option<&Stop> {
        self.stops().into_iter().find(|known| *known == stop)
    }

    /// The line named `name`, if present.
    pub fn find_line(&self, name: &str) -> Option<&Line> {
        self.lines.iter().find(|line| line.name() == name)
    }

    /// A stop carrying the given name, if any. When several stops share the
    /// name, which one is returned is unspecified.
    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops().into_iter().find(|stop| stop.name() == name)
    }

    /// The stop at the given position, if any.
    pub fn stop_at_position(&self, position: &GeographicPosition) -> Option<&Stop> {
        self.stops()
            .into_iter()
            .find(|stop| stop.position() == position)
    }

    /// Stop names similar to `name`, best matches first, at most `limit`.
    pub fn fuzzy_stop_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .stops()
            .into_iter()
            .map(|stop| (strsim::jaro_winkler(name, stop.name()), stop.name()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.dedup_by(|a, b| a.1 == b.1);
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Whether the given stop is part of this network.
    pub fn contains_stop(&self, stop: &Stop) -> bool {
        self.graph.contains(stop)
    }

    /// The outgoing segments of `stop` in insertion order, as a copy.
    pub fn outgoing_segments(&self, stop: &Stop) -> Result<Vec<TransportSegment>> {
        self.graph.outgoing_edges(stop)
    }

    /// Depth-first traversal of the network from `src`; see
    /// [`Graph::depth_first_search`].
    pub fn depth_first_search(&self, src: &Stop) -> Result<HashMap<Stop, TransportSegment>> {
        self.graph.depth_first_search(src)
    }
}
