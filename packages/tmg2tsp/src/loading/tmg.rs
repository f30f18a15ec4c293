//! The functions defined here read a METAL TMG file into a `TmgGraph`. The
//! file is consumed strictly in order: header, counts, vertices, edges and,
//! for traveled graphs, the traveler names. Any failure abandons the partial
//! graph, and the file is closed on every exit path when the reader drops.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use crate::common::config::LoadConfig;
use crate::common::error::{Result, TmgError};
use crate::common::graph_data::{
    Connection, LatLng, TmgFormat, TmgVersion, TravelerSet, Waypoint,
};
use crate::graph::{TmgArena, TmgGraph};
use crate::loading::bitfield::decode_travelers;
use crate::loading::tokens::TokenReader;

/// Upper bound on the number of records reserved up front. Counts come from
/// the file itself, so storage past this grows as records are actually read
const MAX_PREALLOCATION: usize = 1 << 16;

/// Record counts from the second part of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Counts {
    vertices: usize,
    edges: usize,
    travelers: usize,
}

/// Open and read a TMG file
pub fn load_graph(path: &Path, config: &LoadConfig) -> Result<TmgGraph> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => TmgError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => TmgError::Io(err),
    })?;

    debug!("Reading TMG graph from {}", path.display());
    read_graph(BufReader::new(file), config)
}

/// Read a TMG graph from any buffered source
pub fn read_graph<R: BufRead>(
    reader: R,
    config: &LoadConfig,
) -> Result<TmgGraph> {
    let mut tokens = TokenReader::new(reader);

    let (version, format) = read_header(&mut tokens)?;
    let counts = read_counts(&mut tokens, format)?;

    let mut arena = TmgArena::with_capacity(
        counts.vertices.min(MAX_PREALLOCATION),
        counts.edges.min(MAX_PREALLOCATION),
    );
    read_vertices(&mut tokens, &mut arena, counts.vertices)?;
    read_edges(&mut tokens, &mut arena, format, counts, config)?;

    let travelers = match format {
        TmgFormat::Traveled => read_travelers(&mut tokens, counts.travelers)?,
        _ => Vec::new(),
    };

    info!(
        "Loaded TMG {version} {format} graph: {} vertices, {} edges, {} \
         travelers",
        arena.node_count(),
        arena.edge_count(),
        travelers.len()
    );

    Ok(TmgGraph::new(version, format, arena, travelers))
}

/// Parse the `TMG <major>.<minor> <format>` header
fn read_header<R: BufRead>(
    tokens: &mut TokenReader<R>,
) -> Result<(TmgVersion, TmgFormat)> {
    let magic = tokens.next_token()?;
    let version_str = tokens.next_token()?;
    let format_str = tokens.next_token()?;

    let (version_str, format_str) = match (magic, version_str, format_str) {
        (Some(magic), Some(version), Some(format)) if magic == "TMG" => {
            (version, format)
        }
        (magic, version, format) => {
            let found = [magic, version, format]
                .into_iter()
                .flatten()
                .collect::<Vec<String>>()
                .join(" ");
            return Err(TmgError::MalformedHeader { found });
        }
    };

    let version = parse_version(&version_str).ok_or_else(|| {
        TmgError::MalformedHeader {
            found: format!("TMG {version_str} {format_str}"),
        }
    })?;

    if version.major != 1 && version.major != 2 {
        return Err(TmgError::UnsupportedVersion {
            major: version.major,
            minor: version.minor,
        });
    }

    let format = TmgFormat::from_str(&format_str)
        .map_err(|_| TmgError::UnknownFormat { name: format_str })?;

    debug!("TMG header: version {version}, {format} format");
    Ok((version, format))
}

/// Split a `<major>.<minor>` version string
fn parse_version(version: &str) -> Option<TmgVersion> {
    let (major, minor) = version.split_once('.')?;
    Some(TmgVersion {
        major: major.parse().ok()?,
        minor: minor.parse().ok()?,
    })
}

/// Read the vertex and edge counts, plus the traveler count for traveled
/// graphs
fn read_counts<R: BufRead>(
    tokens: &mut TokenReader<R>,
    format: TmgFormat,
) -> Result<Counts> {
    let vertices = tokens.next_value()?.ok_or(TmgError::TruncatedHeader)?;
    let edges = tokens.next_value()?.ok_or(TmgError::TruncatedHeader)?;
    let travelers = match format {
        TmgFormat::Traveled => {
            tokens.next_value()?.ok_or(TmgError::TruncatedHeader)?
        }
        _ => 0,
    };

    Ok(Counts {
        vertices,
        edges,
        travelers,
    })
}

/// Read `count` waypoint records, each `label lat lng`. Node indices in the
/// arena follow read order
fn read_vertices<R: BufRead>(
    tokens: &mut TokenReader<R>,
    arena: &mut TmgArena,
    count: usize,
) -> Result<()> {
    for vnum in 0..count {
        let truncated = || TmgError::TruncatedVertex(vnum);
        let label = tokens.next_token()?.ok_or_else(truncated)?;
        let lat: f64 = tokens.next_value()?.ok_or_else(truncated)?;
        let lng: f64 = tokens.next_value()?.ok_or_else(truncated)?;

        arena.add_node(Waypoint::new(label, lat, lng));
    }
    Ok(())
}

/// Read a vertex index from an edge record, checking that it refers to a
/// vertex which has already been loaded
fn read_endpoint<R: BufRead>(
    tokens: &mut TokenReader<R>,
    arena: &TmgArena,
    ednum: usize,
) -> Result<NodeIndex> {
    let vertex: usize = tokens
        .next_value()?
        .ok_or(TmgError::TruncatedEdge(ednum))?;

    if vertex >= arena.node_count() {
        return Err(TmgError::InvalidVertexReference {
            edge: ednum,
            vertex,
            num_vertices: arena.node_count(),
        });
    }
    Ok(NodeIndex::new(vertex))
}

/// Read `counts.edges` connection records. Every record starts with two
/// vertex indices and a route label. Traveled graphs follow this with a hex
/// traveler code, and both collapsed and traveled graphs may end the line
/// with shaping point coordinates
fn read_edges<R: BufRead>(
    tokens: &mut TokenReader<R>,
    arena: &mut TmgArena,
    format: TmgFormat,
    counts: Counts,
    config: &LoadConfig,
) -> Result<()> {
    for ednum in 0..counts.edges {
        let v1 = read_endpoint(tokens, arena, ednum)?;
        let v2 = read_endpoint(tokens, arena, ednum)?;
        let routes = tokens
            .next_token()?
            .ok_or(TmgError::TruncatedEdge(ednum))?;

        let travelers = match format {
            TmgFormat::Traveled => {
                let code = tokens
                    .next_token()?
                    .ok_or(TmgError::TruncatedEdge(ednum))?;
                let travelers = decode_travelers(&code).map_err(|source| {
                    TmgError::MalformedBitfield {
                        edge: ednum,
                        source,
                    }
                })?;
                check_traveler_range(&travelers, counts.travelers, ednum);
                Some(travelers)
            }
            _ => None,
        };

        let shaping_points = if format.has_shaping_points() {
            parse_shaping_points(&tokens.rest_of_line(), ednum)?
        } else {
            Vec::new()
        };

        let connection = Connection::new(
            routes,
            travelers,
            shaping_points,
            &arena[v1].coords,
            &arena[v2].coords,
            format,
            config.closing,
        );
        arena.add_edge(v1, v2, connection);
    }
    Ok(())
}

/// Traveler numbers come straight from bit positions and are not checked
/// against the traveler list, but a number past its end is worth flagging
fn check_traveler_range(travelers: &TravelerSet, count: usize, ednum: usize) {
    if let Some(&last) = travelers.numbers.last() {
        if last as usize >= count {
            warn!(
                "Edge {ednum} names traveler {last}, but only {count} \
                 travelers are listed"
            );
        }
    }
}

/// Parse the trailing shaping text of an edge line into coordinates. Every
/// coordinate value carries exactly one decimal point, so the number of
/// shaping points is half the number of decimal points in the text
pub(crate) fn parse_shaping_points(
    text: &str,
    ednum: usize,
) -> Result<Vec<LatLng>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let decimal_points = text.matches('.').count();
    if decimal_points % 2 != 0 {
        warn!(
            "Edge {ednum} shaping text has an odd number of decimal points \
             ({decimal_points})"
        );
    }
    let count = decimal_points / 2;

    let mut values = text.split_whitespace();
    let mut shaping_points = Vec::with_capacity(count);
    for _ in 0..count {
        let mut next = || -> Option<f64> { values.next()?.parse().ok() };
        match (next(), next()) {
            (Some(lat), Some(lng)) => {
                shaping_points.push(LatLng::new(lat, lng))
            }
            _ => return Err(TmgError::TruncatedShaping { edge: ednum }),
        }
    }

    if values.next().is_some() {
        warn!("Edge {ednum} has unused text after its shaping points");
    }

    Ok(shaping_points)
}

/// Read the traveler display names which end a traveled graph
fn read_travelers<R: BufRead>(
    tokens: &mut TokenReader<R>,
    count: usize,
) -> Result<Vec<String>> {
    let mut travelers = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    for tnum in 0..count {
        let name = tokens
            .next_token()?
            .ok_or(TmgError::TruncatedTraveler(tnum))?;
        travelers.push(name);
    }
    Ok(travelers)
}
