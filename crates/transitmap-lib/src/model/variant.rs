use std::time::Duration;

use chrono::NaiveTime;

use crate::error::{Error, Result};
use crate::graph::Edge;
use crate::model::{Stop, TransportSegment};

/// One unidirectional traversal of a line: an ordered chain of segments in
/// which the first stop has no incoming segment and the last stop has no
/// outgoing segment, with no loops in between.
///
/// Segments and departure times are append-only; nothing is ever removed
/// from a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    name: String,
    line_name: String,
    segments: Vec<TransportSegment>,
    departures: Vec<NaiveTime>,
}

impl Variant {
    /// Create an empty variant belonging to the line named `line_name`.
    pub fn empty(name: impl Into<String>, line_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_name: line_name.into(),
            segments: Vec::new(),
            departures: Vec::new(),
        }
    }

    /// The name of this variant.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the line owning this variant.
    pub fn line_name(&self) -> &str {
        &self.line_name
    }

    /// The segments of this variant in insertion order.
    pub fn segments(&self) -> &[TransportSegment] {
        &self.segments
    }

    /// The departure times registered at this variant's first stop.
    pub fn departures(&self) -> &[NaiveTime] {
        &self.departures
    }

    /// Append a segment to this variant.
    ///
    /// The segment's line and variant names must match this variant's own;
    /// a mismatch is an error, never silently ignored. Appending a segment
    /// equal to one already present is a no-op returning `Ok(false)`.
    pub fn add_segment(&mut self, segment: TransportSegment) -> Result<bool> {
        if segment.line_name() != self.line_name || segment.variant_name() != self.name {
            return Err(Error::SegmentNameMismatch {
                expected_line: self.line_name.clone(),
                expected_variant: self.name.clone(),
                line: segment.line_name().to_string(),
                variant: segment.variant_name().to_string(),
            });
        }
        if self.segments.contains(&segment) {
            return Ok(false);
        }
        self.segments.push(segment);
        Ok(true)
    }

    /// Register a departure time. Duplicates are no-ops returning `false`.
    pub fn add_departure(&mut self, departure: NaiveTime) -> bool {
        if self.departures.contains(&departure) {
            return false;
        }
        self.departures.push(departure);
        true
    }

    /// The first stop of the traversal: the stop never appearing as a
    /// destination among the currently accumulated segments.
    ///
    /// Recomputed on every call since segments may still be appended.
    /// Returns `None` for an empty variant; for ill-formed topologies
    /// (cycles, forks) some stop without a recorded predecessor is returned
    /// when one exists.
    pub fn start(&self) -> Option<&Stop> {
        let mut candidates: Vec<&Stop> = Vec::new();
        let mut destinations: Vec<&Stop> = Vec::new();
        for segment in &self.segments {
            let from = segment.origin();
            let to = segment.destination();
            destinations.push(to);
            if let Some(index) = candidates.iter().position(|stop| *stop == to) {
                candidates.remove(index);
            }
            if !destinations.contains(&from) {
                candidates.push(from);
            }
        }
        candidates.first().copied()
    }

    /// The last stop of the traversal: the stop never appearing as an
    /// origin among the currently accumulated segments. Same degenerate
    /// behavior as [`Self::start`].
    pub fn end(&self) -> Option<&Stop> {
        let mut candidates: Vec<&Stop> = Vec::new();
        let mut origins: Vec<&Stop> = Vec::new();
        for segment in &self.segments {
            let from = segment.origin();
            let to = segment.destination();
            origins.push(from);
            if let Some(index) = candidates.iter().position(|stop| *stop == from) {
                candidates.remove(index);
            }
            if !origins.contains(&to) {
                candidates.push(to);
            }
        }
        candidates.first().copied()
    }

    /// Whether the given stop appears in any segment of this variant.
    pub fn has_stop(&self, stop: &Stop) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.origin() == stop || segment.destination() == stop)
    }

    /// The outgoing segment of `stop` within this variant, if any.
    pub fn outgoing_segment(&self, stop: &Stop) -> Option<&TransportSegment> {
        self.segments
            .iter()
            .find(|segment| segment.origin() == stop)
    }

    /// Accumulated travel time from this variant's first stop to `to`.
    ///
    /// Walks forward from [`Self::start`] following each stop's outgoing
    /// segment. Fails if the variant is empty or if a stop along the way
    /// has no outgoing segment before `to` is reached; the walk is bounded
    /// by the segment count so an ill-formed cyclic variant terminates.
    pub fn travel_time_to(&self, to: &Stop) -> Result<Duration> {
        let start = self.start().ok_or_else(|| Error::EmptyVariant {
            variant: self.name.clone(),
            line: self.line_name.clone(),
        })?;
        let mut total = Duration::ZERO;
        let mut current = start;
        for _ in 0..=self.segments.len() {
            if current == to {
                return Ok(total);
            }
            let segment =
                self.outgoing_segment(current)
                    .ok_or_else(|| Error::MissingOutgoingSegment {
                        stop: current.name().to_string(),
                        variant: self.name.clone(),
                    })?;
            total += segment.travel_duration();
            current = segment.destination();
        }
        Err(Error::MissingOutgoingSegment {
            stop: current.name().to_string(),
            variant: self.name.clone(),
        })
    }
}
