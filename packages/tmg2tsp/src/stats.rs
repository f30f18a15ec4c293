//! Summary statistics for a loaded graph: its extent, notable waypoints,
//! label lengths, connectivity and, for traveled graphs, how far each
//! traveler has been across its segments.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::common::bbox::BBox;
use crate::common::graph_data::{TmgFormat, TmgVersion, Waypoint};
use crate::graph::TmgGraph;

/// A waypoint along with its vertex index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedWaypoint {
    pub index: usize,
    pub waypoint: Waypoint,
}

impl fmt::Display for IndexedWaypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.waypoint)
    }
}

/// Segment count and mileage for a single traveler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerTotal {
    pub traveler: u32,
    pub name: Option<String>,
    pub segments: usize,
    pub miles: f64,
}

/// Container for the statistics of a whole graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub version: TmgVersion,
    pub format: TmgFormat,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub bbox: BBox,
    pub north: IndexedWaypoint,
    pub south: IndexedWaypoint,
    pub east: IndexedWaypoint,
    pub west: IndexedWaypoint,
    pub first_alphabetical: IndexedWaypoint,
    pub last_alphabetical: IndexedWaypoint,
    pub shortest_label_len: usize,
    pub shortest_labels: Vec<IndexedWaypoint>,
    pub longest_label_len: usize,
    pub longest_labels: Vec<IndexedWaypoint>,
    pub highest_degree: IndexedWaypoint,
    pub max_degree: usize,
    pub total_miles: f64,
    pub travelers: Vec<TravelerTotal>,
}

/// Fetch a waypoint by index, keeping the index alongside it
fn indexed(graph: &TmgGraph, index: usize) -> Option<IndexedWaypoint> {
    Some(IndexedWaypoint {
        index,
        waypoint: graph.waypoint(index)?.clone(),
    })
}

/// Indices of every vertex whose label length equals `len`
fn labels_of_len(graph: &TmgGraph, len: usize) -> Vec<IndexedWaypoint> {
    graph
        .vertices()
        .filter(|v| v.waypoint.label.len() == len)
        .filter_map(|v| indexed(graph, v.index))
        .collect()
}

/// Total up segments and mileage per traveler. Traveler numbers come from
/// bit positions, so a number may have no name in the traveler list
fn traveler_totals(graph: &TmgGraph) -> Vec<TravelerTotal> {
    let mut totals = FxHashMap::<u32, (usize, f64)>::default();

    for edge in graph.edges() {
        if let Some(travelers) = &edge.connection.travelers {
            for &traveler in travelers.numbers.iter() {
                let entry = totals.entry(traveler).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += edge.connection.length_in_miles;
            }
        }
    }

    let mut totals: Vec<TravelerTotal> = totals
        .into_iter()
        .map(|(traveler, (segments, miles))| TravelerTotal {
            traveler,
            name: graph.traveler_name(traveler).map(String::from),
            segments,
            miles,
        })
        .collect();
    totals.sort_by_key(|total| total.traveler);
    totals
}

impl GraphStats {
    /// Compute statistics for a graph. Returns None for a graph with no
    /// vertices, as there are no waypoints to report on
    pub fn new(graph: &TmgGraph) -> Option<GraphStats> {
        let (bbox, extremes) =
            BBox::from_waypoints(graph.vertices().map(|v| v.waypoint))?;

        // min_by keeps the first of equal elements, so ties go to the
        // lowest vertex index throughout
        let first = graph
            .vertices()
            .min_by(|a, b| a.waypoint.label.cmp(&b.waypoint.label))?
            .index;
        let last = graph
            .vertices()
            .min_by(|a, b| b.waypoint.label.cmp(&a.waypoint.label))?
            .index;
        let busiest = graph
            .vertices()
            .min_by(|a, b| b.degree().cmp(&a.degree()))?;
        let (highest_degree, max_degree) = (busiest.index, busiest.degree());

        let lengths: Vec<usize> = graph
            .vertices()
            .map(|v| v.waypoint.label.len())
            .collect();
        let shortest_label_len = *lengths.iter().min()?;
        let longest_label_len = *lengths.iter().max()?;

        Some(GraphStats {
            version: graph.version,
            format: graph.format,
            num_vertices: graph.num_vertices(),
            num_edges: graph.num_edges(),
            bbox,
            north: indexed(graph, extremes.north)?,
            south: indexed(graph, extremes.south)?,
            east: indexed(graph, extremes.east)?,
            west: indexed(graph, extremes.west)?,
            first_alphabetical: indexed(graph, first)?,
            last_alphabetical: indexed(graph, last)?,
            shortest_label_len,
            shortest_labels: labels_of_len(graph, shortest_label_len),
            longest_label_len,
            longest_labels: labels_of_len(graph, longest_label_len),
            highest_degree: indexed(graph, highest_degree)?,
            max_degree,
            total_miles: graph
                .edges()
                .map(|e| e.connection.length_in_miles)
                .sum(),
            travelers: traveler_totals(graph),
        })
    }
}

/// Write a list of waypoints on a single line, space separated
fn write_waypoints(
    f: &mut fmt::Formatter<'_>,
    waypoints: &[IndexedWaypoint],
) -> fmt::Result {
    let line: Vec<String> =
        waypoints.iter().map(|w| w.waypoint.to_string()).collect();
    writeln!(f, "{}", line.join(" "))
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "TMG version {} {} format, {} vertices, {} edges",
            self.version, self.format, self.num_vertices, self.num_edges
        )?;
        writeln!(f, "Northernmost waypoint: {}", self.north)?;
        writeln!(f, "Southernmost waypoint: {}", self.south)?;
        writeln!(f, "Easternmost waypoint: {}", self.east)?;
        writeln!(f, "Westernmost waypoint: {}", self.west)?;
        writeln!(
            f,
            "First alphabetical waypoint: {}",
            self.first_alphabetical
        )?;
        writeln!(f, "Last alphabetical waypoint: {}", self.last_alphabetical)?;
        writeln!(
            f,
            "Shortest waypoint labels: (len {})",
            self.shortest_label_len
        )?;
        write_waypoints(f, &self.shortest_labels)?;
        writeln!(
            f,
            "Longest waypoint labels: (len {})",
            self.longest_label_len
        )?;
        write_waypoints(f, &self.longest_labels)?;

        let centre = self.bbox.get_centre();
        writeln!(
            f,
            "Bounding box: ({:.6},{:.6}) to ({:.6},{:.6}), centre \
             ({:.6},{:.6})",
            self.bbox.min_lat,
            self.bbox.min_lng,
            self.bbox.max_lat,
            self.bbox.max_lng,
            centre.lat,
            centre.lng
        )?;
        writeln!(
            f,
            "Highest degree waypoint: {} (degree {})",
            self.highest_degree, self.max_degree
        )?;
        writeln!(f, "Total edge length: {:.2} miles", self.total_miles)?;

        if self.format == TmgFormat::Traveled {
            writeln!(f, "Traveler totals:")?;
            for total in self.travelers.iter() {
                let name = total.name.as_deref().unwrap_or("(unnamed)");
                writeln!(
                    f,
                    "  #{} {}: {} segments, {:.2} miles",
                    total.traveler, name, total.segments, total.miles
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use approx::assert_relative_eq;

    use super::*;
    use crate::common::config::LoadConfig;
    use crate::loading::tmg::read_graph;

    const TEST_TMG: &str = "TMG 2.0 traveled
4 3 2
Mid 42.5 -73.0
NE 43.0 -72.0
SW 42.0 -74.0
Far 42.6 -73.1
0 1 I-90 3
0 2 I-87 1
0 3 US9 4
alice bob
";

    fn get_test_graph() -> TmgGraph {
        let reader = Cursor::new(TEST_TMG.as_bytes());
        match read_graph(reader, &LoadConfig::default()) {
            Ok(graph) => graph,
            Err(err) => panic!("Failed to read graph: {err}"),
        }
    }

    fn get_test_stats(graph: &TmgGraph) -> GraphStats {
        match GraphStats::new(graph) {
            Some(stats) => stats,
            None => panic!("Should have received stats"),
        }
    }

    #[test]
    fn test_extremes() {
        let graph = get_test_graph();
        let stats = get_test_stats(&graph);

        assert_eq!(stats.north.index, 1);
        assert_eq!(stats.south.index, 2);
        assert_eq!(stats.east.index, 1);
        assert_eq!(stats.west.index, 2);
    }

    #[test]
    fn test_alphabetical() {
        let graph = get_test_graph();
        let stats = get_test_stats(&graph);

        assert_eq!(stats.first_alphabetical.waypoint.label, "Far");
        assert_eq!(stats.last_alphabetical.waypoint.label, "SW");
    }

    #[test]
    fn test_label_lengths() {
        let graph = get_test_graph();
        let stats = get_test_stats(&graph);

        let shortest: Vec<usize> =
            stats.shortest_labels.iter().map(|w| w.index).collect();
        let longest: Vec<usize> =
            stats.longest_labels.iter().map(|w| w.index).collect();

        assert_eq!(stats.shortest_label_len, 2);
        assert_eq!(shortest, vec![1, 2]);
        assert_eq!(stats.longest_label_len, 3);
        assert_eq!(longest, vec![0, 3]);
    }

    #[test]
    fn test_degree_and_mileage() {
        let graph = get_test_graph();
        let stats = get_test_stats(&graph);

        let total: f64 =
            graph.edges().map(|e| e.connection.length_in_miles).sum();

        assert_eq!(stats.highest_degree.index, 0);
        assert_eq!(stats.max_degree, 3);
        assert_relative_eq!(stats.total_miles, total);
    }

    /// Code 3 marks travelers 0 and 1, code 1 traveler 0, and code 4
    /// traveler 2, who has no entry in the name list
    #[test]
    fn test_traveler_totals() {
        let graph = get_test_graph();
        let stats = get_test_stats(&graph);

        let summary: Vec<(u32, Option<&str>, usize)> = stats
            .travelers
            .iter()
            .map(|t| (t.traveler, t.name.as_deref(), t.segments))
            .collect();

        assert_eq!(
            summary,
            vec![
                (0, Some("alice"), 2),
                (1, Some("bob"), 1),
                (2, None, 1),
            ]
        );
    }

    #[test]
    fn test_display() {
        let graph = get_test_graph();
        let text = get_test_stats(&graph).to_string();

        assert!(text.starts_with(
            "TMG version 2.0 traveled format, 4 vertices, 3 edges\n"
        ));
        assert!(text.contains("Northernmost waypoint: #1 NE (43.000000"));
        assert!(text.contains("Shortest waypoint labels: (len 2)\n"));
        assert!(text.contains("  #2 (unnamed): 1 segments"));
    }

    #[test]
    fn test_empty_graph() {
        let reader = Cursor::new("TMG 1.0 simple\n0 0\n".as_bytes());
        let graph = match read_graph(reader, &LoadConfig::default()) {
            Ok(graph) => graph,
            Err(err) => panic!("Failed to read graph: {err}"),
        };

        assert_eq!(GraphStats::new(&graph), None);
    }
}
