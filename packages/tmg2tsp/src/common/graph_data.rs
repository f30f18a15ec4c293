//! Sets the data which will be stored as weights in the petgraph graph:
//! waypoints on the vertices, connections on the edges. All attributes are
//! populated as the TMG file is read and never change afterwards.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, LineString, Point};
use serde::Serialize;

use crate::common::config::ShapingClosure;
use crate::common::geodesic::{distance, path_distance};

/// A simple latitude/longitude pair in decimal degrees
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

// geo works in x/y order, so longitude comes first
impl From<LatLng> for Point {
    fn from(coords: LatLng) -> Point {
        Point::new(coords.lng, coords.lat)
    }
}

impl From<LatLng> for Coord {
    fn from(coords: LatLng) -> Coord {
        Coord {
            x: coords.lng,
            y: coords.lat,
        }
    }
}

/// A labelled point. Labels are short identifiers and are not required to
/// be unique within a graph
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub label: String,
    pub coords: LatLng,
}

impl Waypoint {
    pub fn new(label: impl Into<String>, lat: f64, lng: f64) -> Self {
        Waypoint {
            label: label.into(),
            coords: LatLng::new(lat, lng),
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.6},{:.6})",
            self.label, self.coords.lat, self.coords.lng
        )
    }
}

/// The three layouts a TMG file can take. Collapsed adds shaping points to
/// each edge, traveled adds traveler codes and a traveler name list on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TmgFormat {
    Simple,
    Collapsed,
    Traveled,
}

impl TmgFormat {
    /// The format name as it appears in a TMG header
    pub fn name(&self) -> &'static str {
        match self {
            TmgFormat::Simple => "simple",
            TmgFormat::Collapsed => "collapsed",
            TmgFormat::Traveled => "traveled",
        }
    }

    /// Whether edge lines carry trailing shaping point coordinates
    pub fn has_shaping_points(&self) -> bool {
        !matches!(self, TmgFormat::Simple)
    }
}

impl FromStr for TmgFormat {
    type Err = ();

    fn from_str(input: &str) -> Result<TmgFormat, Self::Err> {
        match input {
            "simple" => Ok(TmgFormat::Simple),
            "collapsed" => Ok(TmgFormat::Collapsed),
            "traveled" => Ok(TmgFormat::Traveled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TmgFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Major/minor version pair from the TMG header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TmgVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for TmgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The travelers recorded as having traversed a segment, as indices into
/// the graph's traveler list. Indices are ascending
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelerSet {
    pub numbers: Vec<u32>,
}

impl TravelerSet {
    pub fn count(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, traveler: u32) -> bool {
        self.numbers.binary_search(&traveler).is_ok()
    }
}

/// Container for the data attached to a graph edge: the routes carried,
/// optional traveler and shaping data, and the derived length. Endpoint
/// waypoints belong to the vertices, so only the length derived from them
/// is kept here
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub routes: String,
    pub travelers: Option<TravelerSet>,
    pub shaping_points: Vec<LatLng>,
    pub length_in_miles: f64,
}

impl Connection {
    /// Build a connection between two endpoints for the given format.
    /// Simple format edges are a straight line. Otherwise the path runs from
    /// `end1` through every shaping point, and the final leg is closed at the
    /// endpoint chosen by `closing`
    pub fn new(
        routes: String,
        travelers: Option<TravelerSet>,
        shaping_points: Vec<LatLng>,
        end1: &LatLng,
        end2: &LatLng,
        format: TmgFormat,
        closing: ShapingClosure,
    ) -> Connection {
        let length_in_miles = if format.has_shaping_points() {
            let close_at = match closing {
                ShapingClosure::FirstEndpoint => end1,
                ShapingClosure::SecondEndpoint => end2,
            };
            path_distance(
                std::iter::once(end1)
                    .chain(shaping_points.iter())
                    .chain(std::iter::once(close_at)),
            )
        } else {
            distance(end1, end2)
        };

        Connection {
            routes,
            travelers,
            shaping_points,
            length_in_miles,
        }
    }

    pub fn num_shaping_points(&self) -> usize {
        self.shaping_points.len()
    }

    /// Whether the given traveler is recorded on this connection. Always
    /// false for graphs without traveler data
    pub fn traveled_by(&self, traveler: u32) -> bool {
        match &self.travelers {
            Some(travelers) => travelers.contains(traveler),
            None => false,
        }
    }

    /// The full geometry of the connection, from `end1` through the shaping
    /// points to `end2`
    pub fn path(&self, end1: &LatLng, end2: &LatLng) -> LineString<f64> {
        let coords: Vec<Coord> = std::iter::once(*end1)
            .chain(self.shaping_points.iter().copied())
            .chain(std::iter::once(*end2))
            .map(Coord::from)
            .collect();
        LineString::new(coords)
    }
}
