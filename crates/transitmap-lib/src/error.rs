use thiserror::Error;

/// Convenient result alias for the transitmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude or longitude outside the valid geographic range.
    #[error("invalid geographic coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Sphere radius must be strictly positive for projections and distances.
    #[error("sphere radius must be positive, got {radius}")]
    InvalidRadius { radius: f64 },

    /// A textual coordinate was neither decimal degrees nor `D M S {N|S|E|W}`.
    #[error("malformed coordinate string: {value:?}")]
    MalformedCoordinate { value: String },

    /// A segment's origin and destination compared equal.
    #[error("segment origin and destination are the same stop: {stop}")]
    SelfLoopSegment { stop: String },

    /// Segment distances feed the edge weight, which must stay non-negative.
    #[error("segment distance must be non-negative, got {distance}")]
    NegativeDistance { distance: f64 },

    /// A segment was inserted into a variant it does not belong to.
    #[error(
        "segment of line {line:?} variant {variant:?} does not belong to \
         line {expected_line:?} variant {expected_variant:?}"
    )]
    SegmentNameMismatch {
        expected_line: String,
        expected_variant: String,
        line: String,
        variant: String,
    },

    /// A vertex handed to a graph operation was never added to the graph.
    #[error("vertex is not part of the graph")]
    VertexNotFound,

    /// Route reconstruction was asked for a destination the traversal never
    /// discovered.
    #[error("destination was not reached by the traversal")]
    DestinationNotVisited,

    /// Route reconstruction was given a source that is not the origin of any
    /// recorded traversal edge.
    #[error("source is not part of the traversal")]
    SourceNotInTraversal,

    /// A variant walk hit a non-terminal stop with no outgoing segment.
    #[error("stop {stop:?} has no outgoing segment in variant {variant:?}")]
    MissingOutgoingSegment { stop: String, variant: String },

    /// A variant with no segments cannot be walked.
    #[error("variant {variant:?} of line {line:?} has no segments")]
    EmptyVariant { variant: String, line: String },

    /// Raised when a stop name could not be resolved in the network.
    #[error("unknown stop name: {name}{}", format_suggestions(.suggestions))]
    UnknownStop {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two stops.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// A record's field count differed from the rest of the input.
    #[error("record {row} has {found} fields, expected {expected}")]
    InconsistentRecord {
        row: u64,
        expected: u64,
        found: u64,
    },

    /// A record carried no content at all.
    #[error("record {row} is empty")]
    EmptyRecord { row: u64 },

    /// The input stream contained no records.
    #[error("input contains no records")]
    EmptyInput,

    /// A record could not be mapped to a transport segment.
    #[error("invalid record at row {row}: {message}")]
    InvalidRecord { row: u64, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
