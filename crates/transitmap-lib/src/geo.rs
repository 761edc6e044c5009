use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{Error, Result};

const MIN_LATITUDE: f64 = -90.0;
const MAX_LATITUDE: f64 = 90.0;
const MIN_LONGITUDE: f64 = -180.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Decimal places kept by the Cartesian projection, about 11.1 m of
/// precision at the equator.
const PROJECTION_PLACES: f64 = 10_000.0;

/// A pair of angles locating a point on a sphere: offset to the equator
/// (latitude) and to the prime meridian (longitude), altitude ignored.
///
/// Positions are immutable values; two positions are equal when both angles
/// are equal, and equal positions hash equally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeographicPosition {
    latitude: f64,
    longitude: f64,
}

impl GeographicPosition {
    /// The radius of the Earth in meters.
    pub const EARTH_RADIUS: f64 = 6_371_000.0;

    /// The geographic position of Null Island.
    pub const NULL_ISLAND: GeographicPosition = GeographicPosition {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// The geographic position of the north pole.
    pub const NORTH_POLE: GeographicPosition = GeographicPosition {
        latitude: 90.0,
        longitude: 0.0,
    };

    /// The geographic position of the south pole.
    pub const SOUTH_POLE: GeographicPosition = GeographicPosition {
        latitude: -90.0,
        longitude: 0.0,
    };

    /// Create a position at the given latitude and longitude in degrees.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`;
    /// anything else (including NaN) is rejected.
    pub fn at(latitude: f64, longitude: f64) -> Result<Self> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
            || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
        {
            return Err(Error::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a position from two coordinate strings.
    ///
    /// Each string is either decimal degrees (`"2.17"`) or sexagesimal
    /// degree-minute-second with a compass letter (`"24 12 35 N"`). The
    /// parsed values go through the same range validation as [`Self::at`].
    pub fn from_strings(latitude: &str, longitude: &str) -> Result<Self> {
        let lat = parse_coordinate(latitude, ['N', 'S'])?;
        let lon = parse_coordinate(longitude, ['E', 'W'])?;
        Self::at(lat, lon)
    }

    /// The angle in degrees between this position and the equator.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// The angle in degrees between this position and the prime meridian.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Project this position onto a sphere of the given radius.
    ///
    /// Returns the `[x, y, z]` Cartesian coordinates, each rounded to 4
    /// decimal places (ties away from zero) so projections compare
    /// reproducibly. Fails if the radius is not strictly positive.
    pub fn to_cartesian(&self, radius: f64) -> Result<[f64; 3]> {
        check_radius(radius)?;
        Ok(self.project(radius))
    }

    /// Chord distance between two positions projected on a sphere of the
    /// given radius. This is the straight-line distance between the two
    /// Cartesian points, not the great-circle distance along the surface.
    pub fn euclidean_distance(p1: &Self, p2: &Self, radius: f64) -> Result<f64> {
        check_radius(radius)?;
        let a = p1.project(radius);
        let b = p2.project(radius);
        let squared: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(ai, bi)| (bi - ai) * (bi - ai))
            .sum();
        Ok(squared.sqrt())
    }

    /// Chord distance from this position to `other` on Earth.
    pub fn distance_from(&self, other: &Self) -> f64 {
        let a = self.project(Self::EARTH_RADIUS);
        let b = other.project(Self::EARTH_RADIUS);
        let squared: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(ai, bi)| (bi - ai) * (bi - ai))
            .sum();
        squared.sqrt()
    }

    fn project(&self, radius: f64) -> [f64; 3] {
        let lat_rad = self.latitude.to_radians();
        let lon_rad = self.longitude.to_radians();
        let z = radius * lat_rad.sin();
        let on_plane = radius * lat_rad.cos();
        let x = on_plane * lon_rad.cos();
        let y = on_plane * lon_rad.sin();
        [round_place(x), round_place(y), round_place(z)]
    }
}

impl Eq for GeographicPosition {}

impl Hash for GeographicPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0.0 compares equal to 0.0, so it must hash identically; adding
        // positive zero normalizes the sign bit. NaN cannot occur in a
        // validated position.
        state.write_u64((self.latitude + 0.0).to_bits());
        state.write_u64((self.longitude + 0.0).to_bits());
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if radius <= 0.0 || radius.is_nan() {
        return Err(Error::InvalidRadius { radius });
    }
    Ok(())
}

fn round_place(value: f64) -> f64 {
    (value * PROJECTION_PLACES).round() / PROJECTION_PLACES
}

fn parse_coordinate(value: &str, compass: [char; 2]) -> Result<f64> {
    if value.contains(compass[0]) || value.contains(compass[1]) {
        parse_sexagesimal(value)
    } else {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::MalformedCoordinate {
                value: value.to_string(),
            })
    }
}

/// Parse `"D M S {N|S|E|W}"` into signed decimal degrees.
fn parse_sexagesimal(value: &str) -> Result<f64> {
    let malformed = || Error::MalformedCoordinate {
        value: value.to_string(),
    };

    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(malformed());
    }

    let mut parts = [0.0f64; 3];
    for (slot, token) in parts.iter_mut().zip(&tokens[..3]) {
        *slot = token.parse::<u32>().map_err(|_| malformed())? as f64;
    }

    let orientation = match tokens[3] {
        "N" | "E" => 1.0,
        "S" | "W" => -1.0,
        _ => return Err(malformed()),
    };

    Ok((parts[0] + parts[1] / 60.0 + parts[2] / 3600.0) * orientation)
}
