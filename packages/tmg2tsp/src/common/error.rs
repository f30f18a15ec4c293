//! Error types shared by the TMG loader, the distance matrix and the
//! configuration layer. Every load failure is reported through a single
//! `TmgError`, and no partially built graph is ever handed back alongside it.

use std::path::PathBuf;

use crate::loading::bitfield::BitfieldError;

/// Errors that can occur while loading a TMG file or deriving a distance
/// matrix from it
#[derive(Debug, thiserror::Error)]
pub enum TmgError {
    /// The requested TMG file does not exist
    #[error("could not open {} for reading", .path.display())]
    FileNotFound { path: PathBuf },

    /// Any other failure reading from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first line is not of the shape `TMG <major>.<minor> <format>`
    #[error("unknown TMG header format: {found:?}")]
    MalformedHeader { found: String },

    #[error("unknown TMG file version {major}.{minor}")]
    UnsupportedVersion { major: u32, minor: u32 },

    #[error("unknown TMG file format specifier {name}")]
    UnknownFormat { name: String },

    /// Vertex, edge or traveler count missing or non-numeric
    #[error("could not read waypoint, connection and traveler counts")]
    TruncatedHeader,

    #[error("could not read waypoint {0} from TMG file")]
    TruncatedVertex(usize),

    #[error("could not read edge {0} from TMG file")]
    TruncatedEdge(usize),

    /// An edge names a vertex index outside the loaded vertex sequence
    #[error(
        "edge {edge} references vertex {vertex}, but only {num_vertices} \
         vertices were loaded"
    )]
    InvalidVertexReference {
        edge: usize,
        vertex: usize,
        num_vertices: usize,
    },

    /// The shaping text of an edge holds fewer coordinates than its decimal
    /// points announce
    #[error("could not read shaping points for edge {edge}")]
    TruncatedShaping { edge: usize },

    #[error("malformed traveler code on edge {edge}")]
    MalformedBitfield {
        edge: usize,
        #[source]
        source: BitfieldError,
    },

    #[error("could not read traveler {0} from TMG file")]
    TruncatedTraveler(usize),

    /// More points were requested than the graph has vertices
    #[error("requested {requested} points, but the graph has {available}")]
    OutOfRange { requested: usize, available: usize },

    #[error("number of points must be at least 2, got {0}")]
    TooFewPoints(i64),

    #[error("invalid value {value:?} for option {name}")]
    InvalidOption { name: &'static str, value: String },
}

/// Result type for TMG operations
pub type Result<T> = std::result::Result<T, TmgError>;
