//! Tabular ingestion: turns `;`-delimited records into a consistent,
//! de-duplicated transport network.
//!
//! Record layout, one record per line:
//! `fromName; "lat, lon"; toName; "lat, lon"; "<line> variant <variant>";
//! "MM:SS"; distance`. All records must carry the same field count. A
//! record that fails to parse aborts the whole load.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeographicPosition;
use crate::model::{Line, Stop, TransportNetwork, TransportSegment, Variant};

/// Literal separator between the line name and the variant name inside the
/// combined line-variant field.
const LINE_VARIANT_SEPARATOR: &str = " variant ";

/// One parsed input record describing a directed segment between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub from_name: String,
    pub from_position: GeographicPosition,
    pub to_name: String,
    pub to_position: GeographicPosition,
    pub line_name: String,
    pub variant_name: String,
    pub travel_duration: Duration,
    pub distance: f64,
}

/// Read and parse every record from the given reader.
///
/// Fails with a structural error on ragged rows (field counts differing
/// from the first record), on an effectively empty record, and on an input
/// with no records at all.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<SegmentRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut row: u64 = 0;
    for entry in csv_reader.records() {
        row += 1;
        let record = entry.map_err(|err| structural_error(err, row))?;
        if record.len() == 1 && record.get(0).map(str::is_empty).unwrap_or(true) {
            return Err(Error::EmptyRecord { row });
        }
        records.push(parse_record(row, &record)?);
    }

    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(records)
}

/// Build a transport network from all records of the given reader.
pub fn network_from_reader<R: Read>(reader: R) -> Result<TransportNetwork> {
    let records = read_records(reader)?;
    let mut builder = NetworkBuilder::new();
    for record in &records {
        builder.push(record)?;
    }
    let network = builder.build();
    debug!(
        records = records.len(),
        stops = network.stops().len(),
        lines = network.lines().len(),
        "loaded transport network"
    );
    Ok(network)
}

/// Build a transport network from the delimited file at `path`.
pub fn load_network(path: &Path) -> Result<TransportNetwork> {
    debug!(path = %path.display(), "loading transport network");
    let file = File::open(path)?;
    network_from_reader(file)
}

/// Incremental network construction with find-or-create caches.
///
/// Stops are keyed by their full (name, position) value identity, lines by
/// name, variants by (line name, variant name); segments are assumed unique
/// per record and always added. The caches key on exactly the equality the
/// lookups of [`TransportNetwork`] use, so repeated records resolve to the
/// same entities the graph references.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    network: TransportNetwork,
    known_stops: HashSet<Stop>,
    line_index: HashMap<String, usize>,
    variant_index: HashMap<(String, String), usize>,
}

impl NetworkBuilder {
    /// Create a builder around an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the network.
    ///
    /// Registers the record's segment both as a graph edge and as a member
    /// of its variant, creating any of stop, line and variant that the
    /// network does not know yet.
    pub fn push(&mut self, record: &SegmentRecord) -> Result<()> {
        let from = self.find_or_create_stop(&record.from_name, record.from_position);
        let to = self.find_or_create_stop(&record.to_name, record.to_position);
        let line_index = self.find_or_create_line(&record.line_name);
        let variant_index =
            self.find_or_create_variant(line_index, &record.line_name, &record.variant_name);

        let segment = TransportSegment::new(
            from,
            to,
            record.line_name.as_str(),
            record.variant_name.as_str(),
            record.travel_duration,
            record.distance,
        )?;
        self.network.add_segment(segment.clone());
        self.network.lines[line_index].variants[variant_index].add_segment(segment)?;
        Ok(())
    }

    /// Finish construction and hand the network over.
    pub fn build(self) -> TransportNetwork {
        self.network
    }

    fn find_or_create_stop(&mut self, name: &str, position: GeographicPosition) -> Stop {
        let stop = Stop::new(name, position);
        if self.known_stops.insert(stop.clone()) {
            self.network.add_stop(stop.clone());
        }
        stop
    }

    fn find_or_create_line(&mut self, name: &str) -> usize {
        if let Some(&index) = self.line_index.get(name) {
            return index;
        }
        let index = self.network.lines.len();
        self.network.add_line(Line::new(name));
        self.line_index.insert(name.to_string(), index);
        index
    }

    fn find_or_create_variant(
        &mut self,
        line_index: usize,
        line_name: &str,
        variant_name: &str,
    ) -> usize {
        let key = (line_name.to_string(), variant_name.to_string());
        if let Some(&index) = self.variant_index.get(&key) {
            return index;
        }
        let line = &mut self.network.lines[line_index];
        let index = line.variants.len();
        line.add_variant(Variant::empty(variant_name, line_name));
        self.variant_index.insert(key, index);
        index
    }
}

fn structural_error(err: csv::Error, row: u64) -> Error {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return Error::InconsistentRecord {
            row: pos.as_ref().map(|p| p.line()).unwrap_or(row),
            expected: *expected_len,
            found: *len,
        };
    }
    Error::Csv(err)
}

fn field<'a>(
    record: &'a csv::StringRecord,
    row: u64,
    index: usize,
    name: &str,
) -> Result<&'a str> {
    record.get(index).ok_or_else(|| Error::InvalidRecord {
        row,
        message: format!("missing {name} field"),
    })
}

fn parse_record(row: u64, record: &csv::StringRecord) -> Result<SegmentRecord> {
    let from_name = field(record, row, 0, "origin name")?;
    let from_position = parse_position(row, field(record, row, 1, "origin position")?)?;
    let to_name = field(record, row, 2, "destination name")?;
    let to_position = parse_position(row, field(record, row, 3, "destination position")?)?;
    let (line_name, variant_name) =
        split_line_variant(row, field(record, row, 4, "line variant")?)?;
    let travel_duration = parse_duration(row, field(record, row, 5, "duration")?)?;
    let distance_field = field(record, row, 6, "distance")?;
    let distance = distance_field
        .parse::<f64>()
        .map_err(|_| Error::InvalidRecord {
            row,
            message: format!("invalid distance {distance_field:?}"),
        })?;

    Ok(SegmentRecord {
        from_name: from_name.to_string(),
        from_position,
        to_name: to_name.to_string(),
        to_position,
        line_name: line_name.to_string(),
        variant_name: variant_name.to_string(),
        travel_duration,
        distance,
    })
}

/// Parse a `"lat, lon"` field; each coordinate may be decimal degrees or
/// sexagesimal.
fn parse_position(row: u64, value: &str) -> Result<GeographicPosition> {
    let (latitude, longitude) = value.split_once(',').ok_or_else(|| Error::InvalidRecord {
        row,
        message: format!("invalid position {value:?}"),
    })?;
    GeographicPosition::from_strings(latitude.trim(), longitude.trim()).map_err(|err| {
        Error::InvalidRecord {
            row,
            message: err.to_string(),
        }
    })
}

fn split_line_variant(row: u64, value: &str) -> Result<(&str, &str)> {
    value
        .split_once(LINE_VARIANT_SEPARATOR)
        .ok_or_else(|| Error::InvalidRecord {
            row,
            message: format!("line-variant field {value:?} lacks the {LINE_VARIANT_SEPARATOR:?} separator"),
        })
}

/// Parse a `MM:SS` travel duration. Minutes are not capped at two digits.
fn parse_duration(row: u64, value: &str) -> Result<Duration> {
    let invalid = || Error::InvalidRecord {
        row,
        message: format!("invalid duration {value:?}"),
    };
    let (minutes, seconds) = value.split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.trim().parse().map_err(|_| invalid())?;
    Ok(Duration::from_secs(minutes * 60 + seconds))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const RECORD: &str = "Jussieu;48.85, 2.35;Monge;48.84, 2.35;7 variant south;01:30;0.6\n";

    #[test]
    fn parses_a_well_formed_record() {
        let records = read_records(Cursor::new(RECORD)).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.from_name, "Jussieu");
        assert_eq!(record.to_name, "Monge");
        assert_eq!(record.line_name, "7");
        assert_eq!(record.variant_name, "south");
        assert_eq!(record.travel_duration, Duration::from_secs(90));
        assert_eq!(record.distance, 0.6);
        assert_eq!(record.from_position.latitude(), 48.85);
        assert_eq!(record.from_position.longitude(), 2.35);
    }

    #[test]
    fn sexagesimal_positions_are_accepted() {
        let input = "A;24 12 36 N, 1 30 0 W;B;0.0, 0.0;7 variant south;01:00;1.0\n";
        let records = read_records(Cursor::new(input)).unwrap();
        assert!((records[0].from_position.latitude() - 24.21).abs() < 1e-9);
        assert_eq!(records[0].from_position.longitude(), -1.5);
    }

    #[test]
    fn ragged_rows_are_a_structural_error() {
        let input = format!("{RECORD}Jussieu;48.85, 2.35;Monge\n");
        assert!(matches!(
            read_records(Cursor::new(input)),
            Err(Error::InconsistentRecord { .. })
        ));
    }

    #[test]
    fn whitespace_only_record_is_rejected_as_empty() {
        assert!(matches!(
            read_records(Cursor::new("   \n")),
            Err(Error::EmptyRecord { row: 1 })
        ));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(
            read_records(Cursor::new("")),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn missing_variant_separator_fails() {
        let input = "A;0.0, 0.0;B;1.0, 1.0;7 south;01:00;1.0\n";
        assert!(matches!(
            read_records(Cursor::new(input)),
            Err(Error::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn malformed_duration_fails() {
        let input = "A;0.0, 0.0;B;1.0, 1.0;7 variant south;90s;1.0\n";
        assert!(matches!(
            read_records(Cursor::new(input)),
            Err(Error::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn out_of_range_position_fails() {
        let input = "A;95.0, 0.0;B;1.0, 1.0;7 variant south;01:00;1.0\n";
        assert!(matches!(
            read_records(Cursor::new(input)),
            Err(Error::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn builder_deduplicates_stops_lines_and_variants() {
        let input = "\
A;0.0, 0.0;B;1.0, 1.0;7 variant south;01:00;1.0
B;1.0, 1.0;C;2.0, 2.0;7 variant south;02:00;1.5
";
        let network = network_from_reader(Cursor::new(input)).unwrap();
        assert_eq!(network.stops().len(), 3);
        assert_eq!(network.lines().len(), 1);
        let variants = network.variants();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].segments().len(), 2);
    }

    #[test]
    fn self_loop_record_aborts_the_load() {
        let input = "A;0.0, 0.0;A;0.0, 0.0;7 variant south;01:00;1.0\n";
        assert!(matches!(
            network_from_reader(Cursor::new(input)),
            Err(Error::SelfLoopSegment { .. })
        ));
    }
}
