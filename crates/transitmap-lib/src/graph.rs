//! Generic directed-graph storage and traversal.
//!
//! The graph is generic over anything satisfying the [`Vertex`] and [`Edge`]
//! capability traits, so the traversal engine stays domain-agnostic: the
//! transport model plugs in stops and segments, tests plug in synthetic
//! types.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::geo::GeographicPosition;

/// Capability marker for graph vertices. A vertex only needs value identity:
/// equal vertices are the same node.
pub trait Vertex: Clone + Eq + Hash {}

/// A directed, weighted connection between two vertices.
///
/// Edges with equal origin and destination (self-loops) are not allowed;
/// concrete edge types enforce this at construction. `weight` must be
/// non-negative. The only bundled traversal ignores weights entirely, but
/// the contract is kept for weighted algorithms.
pub trait Edge<V: Vertex>: Clone + PartialEq {
    /// The vertex this edge leaves from.
    fn origin(&self) -> &V;

    /// The vertex this edge arrives at.
    fn destination(&self) -> &V;

    /// The non-negative weight of this edge.
    fn weight(&self) -> f64;
}

/// A vertex pinned to a geographic position.
pub trait GeographicVertex: Vertex {
    /// The geographic position of this vertex.
    fn position(&self) -> &GeographicPosition;
}

/// Adjacency-list graph over generic vertices and edges.
///
/// Every vertex has an entry in the adjacency map, even with no outgoing
/// edges yet; outgoing edges keep their insertion order.
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex, E: Edge<V>> {
    adjacency: HashMap<V, Vec<E>>,
}

impl<V: Vertex, E: Edge<V>> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex, E: Edge<V>> Graph<V, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// All vertices of this graph, in unspecified order.
    pub fn vertices(&self) -> Vec<&V> {
        self.adjacency.keys().collect()
    }

    /// All edges of this graph, in unspecified vertex order.
    pub fn edges(&self) -> Vec<&E> {
        self.adjacency.values().flatten().collect()
    }

    /// Number of vertices in this graph.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add a vertex. Adding a vertex that is already present does nothing.
    pub fn add_vertex(&mut self, vertex: V) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Add an edge. Missing endpoints are added as vertices; adding an edge
    /// equal to one already present does nothing.
    pub fn add_edge(&mut self, edge: E) {
        self.adjacency.entry(edge.destination().clone()).or_default();
        let outgoing = self.adjacency.entry(edge.origin().clone()).or_default();
        if !outgoing.contains(&edge) {
            outgoing.push(edge);
        }
    }

    /// The outgoing edges of `vertex` in insertion order, as a copy.
    ///
    /// Fails with [`Error::VertexNotFound`] if the vertex was never added.
    pub fn outgoing_edges(&self, vertex: &V) -> Result<Vec<E>> {
        self.adjacency
            .get(vertex)
            .cloned()
            .ok_or(Error::VertexNotFound)
    }

    /// Whether `vertex` is part of this graph.
    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Depth-first traversal from `src` with an explicit stack.
    ///
    /// Returns a map from every vertex reachable from `src` (excluding `src`
    /// itself) to the edge by which it was first discovered. The recorded
    /// edge for a vertex reachable along several paths depends only on stack
    /// order with outgoing edges considered in list order; no shortest-path
    /// or minimum-weight property holds.
    pub fn depth_first_search(&self, src: &V) -> Result<HashMap<V, E>> {
        if !self.contains(src) {
            return Err(Error::VertexNotFound);
        }
        let mut parents = HashMap::new();
        let mut visited = HashSet::new();
        let mut stack = vec![src.clone()];
        visited.insert(src.clone());
        while let Some(current) = stack.pop() {
            if let Some(outgoing) = self.adjacency.get(&current) {
                for edge in outgoing {
                    let next = edge.destination();
                    if visited.insert(next.clone()) {
                        parents.insert(next.clone(), edge.clone());
                        stack.push(next.clone());
                    }
                }
            }
        }
        Ok(parents)
    }
}

/// Rebuild the forward edge sequence from `src` to `dst` out of a traversal
/// parent map.
///
/// `parents` is assumed to be a valid parent-edge map produced by a
/// single-source traversal rooted at `src`; this function does not traverse
/// the graph itself. Fails with [`Error::DestinationNotVisited`] if `dst`
/// is not a key of the map, and with [`Error::SourceNotInTraversal`] if
/// `src` is not the origin of any recorded edge or the backward walk leaves
/// the map before reaching `src`.
pub fn route_from_traversal<V: Vertex, E: Edge<V>>(
    parents: &HashMap<V, E>,
    src: &V,
    dst: &V,
) -> Result<Vec<E>> {
    let last = parents.get(dst).ok_or(Error::DestinationNotVisited)?;
    if !parents.values().any(|edge| edge.origin() == src) {
        return Err(Error::SourceNotInTraversal);
    }
    let mut route = vec![last.clone()];
    let mut vertex = last.origin().clone();
    while vertex != *src {
        let edge = parents.get(&vertex).ok_or(Error::SourceNotInTraversal)?;
        route.push(edge.clone());
        vertex = edge.origin().clone();
    }
    route.reverse();
    Ok(route)
}
