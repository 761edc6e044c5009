use std::fmt;

use serde::Serialize;

use crate::geo::GeographicPosition;
use crate::graph::{GeographicVertex, Vertex};

/// A named transit location, vertex of the transport graph.
///
/// Identity covers both the name and the position: two stops sharing a name
/// but standing at different coordinates are distinct entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Stop {
    name: String,
    position: GeographicPosition,
}

impl Stop {
    /// Create a stop with the given name at the given position.
    pub fn new(name: impl Into<String>, position: GeographicPosition) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// The display name of this stop.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The geographic position of this stop.
    pub fn position(&self) -> &GeographicPosition {
        &self.position
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Vertex for Stop {}

impl GeographicVertex for Stop {
    fn position(&self) -> &GeographicPosition {
        &self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(latitude: f64, longitude: f64) -> GeographicPosition {
        GeographicPosition::at(latitude, longitude).unwrap()
    }

    #[test]
    fn stops_with_same_name_and_position_are_equal() {
        let a = Stop::new("Alesia", position(48.83, 2.32));
        let b = Stop::new("Alesia", position(48.83, 2.32));
        assert_eq!(a, b);
    }

    #[test]
    fn stops_with_same_name_but_different_position_differ() {
        let a = Stop::new("Alesia", position(48.83, 2.32));
        let b = Stop::new("Alesia", position(48.84, 2.32));
        assert_ne!(a, b);
    }

    #[test]
    fn display_shows_the_name() {
        let stop = Stop::new("Chatelet", GeographicPosition::NULL_ISLAND);
        assert_eq!(stop.to_string(), "Chatelet");
    }
}
