//! Domain model of the transport network: stops, segments, variants, lines
//! and the network that ties them to the underlying graph.

mod line;
mod network;
mod segment;
mod stop;
mod variant;

pub use line::Line;
pub use network::TransportNetwork;
pub use segment::TransportSegment;
pub use stop::Stop;
pub use variant::Variant;
