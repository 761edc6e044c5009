//! Transitmap library entry points.
//!
//! This crate models a multimodal transport network (stops, lines,
//! directional variants, timed segments) as a directed weighted graph,
//! loads it from delimited text, and answers reachability queries through
//! depth-first traversal and path reconstruction. Higher-level consumers
//! (the CLI) should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod ingest;
pub mod model;
pub mod routing;

pub use error::{Error, Result};
pub use geo::GeographicPosition;
pub use graph::{route_from_traversal, Edge, GeographicVertex, Graph, Vertex};
pub use ingest::{load_network, network_from_reader, read_records, NetworkBuilder, SegmentRecord};
pub use model::{Line, Stop, TransportNetwork, TransportSegment, Variant};
pub use routing::{plan_route, RoutePlan};
