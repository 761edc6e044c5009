use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Edge;
use crate::model::Stop;

/// A directed, weighted connection between two stops, belonging to exactly
/// one variant of one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportSegment {
    from: Stop,
    to: Stop,
    line_name: String,
    variant_name: String,
    travel_duration: Duration,
    distance: f64,
}

impl TransportSegment {
    /// Create a segment from `from` to `to` on the given line variant.
    ///
    /// Fails if both endpoints are equal (self-loops are not allowed) or if
    /// the distance is negative, which would break the non-negative weight
    /// contract.
    pub fn new(
        from: Stop,
        to: Stop,
        line_name: impl Into<String>,
        variant_name: impl Into<String>,
        travel_duration: Duration,
        distance: f64,
    ) -> Result<Self> {
        if from == to {
            return Err(Error::SelfLoopSegment {
                stop: from.name().to_string(),
            });
        }
        if distance < 0.0 || distance.is_nan() {
            return Err(Error::NegativeDistance { distance });
        }
        Ok(Self {
            from,
            to,
            line_name: line_name.into(),
            variant_name: variant_name.into(),
            travel_duration,
            distance,
        })
    }

    /// The name of the line this segment belongs to.
    pub fn line_name(&self) -> &str {
        &self.line_name
    }

    /// The name of the variant this segment belongs to.
    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    /// Time needed to travel this segment.
    pub fn travel_duration(&self) -> Duration {
        self.travel_duration
    }

    /// Distance covered by this segment.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl Edge<Stop> for TransportSegment {
    fn origin(&self) -> &Stop {
        &self.from
    }

    fn destination(&self) -> &Stop {
        &self.to
    }

    fn weight(&self) -> f64 {
        self.travel_duration.as_secs() as f64 + self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeographicPosition;

    fn stop(name: &str, latitude: f64) -> Stop {
        Stop::new(name, GeographicPosition::at(latitude, 0.0).unwrap())
    }

    fn segment(from: &str, to: &str) -> TransportSegment {
        TransportSegment::new(
            stop(from, 1.0),
            stop(to, 2.0),
            "14",
            "1",
            Duration::from_secs(120),
            4.5,
        )
        .unwrap()
    }

    #[test]
    fn self_loop_construction_fails() {
        let here = stop("Bercy", 1.0);
        let result = TransportSegment::new(
            here.clone(),
            here,
            "14",
            "1",
            Duration::from_secs(60),
            1.0,
        );
        assert!(matches!(result, Err(Error::SelfLoopSegment { .. })));
    }

    #[test]
    fn equal_named_stops_at_different_positions_are_valid_endpoints() {
        let result = TransportSegment::new(
            stop("Bercy", 1.0),
            stop("Bercy", 2.0),
            "14",
            "1",
            Duration::from_secs(60),
            1.0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn negative_distance_is_rejected() {
        let result = TransportSegment::new(
            stop("Bercy", 1.0),
            stop("Olympiades", 2.0),
            "14",
            "1",
            Duration::from_secs(60),
            -1.0,
        );
        assert!(matches!(result, Err(Error::NegativeDistance { .. })));
    }

    #[test]
    fn weight_adds_seconds_and_distance() {
        assert_eq!(segment("Bercy", "Olympiades").weight(), 124.5);
    }

    #[test]
    fn equality_is_field_wise() {
        assert_eq!(segment("Bercy", "Olympiades"), segment("Bercy", "Olympiades"));
        assert_ne!(segment("Bercy", "Olympiades"), segment("Bercy", "Tolbiac"));
    }
}
