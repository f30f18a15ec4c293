//! The in-memory representation of a loaded TMG file. Vertices and edges
//! live in a petgraph arena, so vertex `i` of the file is node index `i` and
//! edge `j` is edge index `j`. Incident edge lists are petgraph's own index
//! links, and the graph is read-only once the loader hands it over.

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef as _;
use petgraph::{Graph, Undirected};

use crate::common::graph_data::{
    Connection, TmgFormat, TmgVersion, Waypoint,
};

/// The arena holding waypoints on the vertices and connections on the edges
pub type TmgArena = Graph<Waypoint, Connection, Undirected, u32>;

/// A fully loaded TMG graph
#[derive(Debug, Clone)]
pub struct TmgGraph {
    pub version: TmgVersion,
    pub format: TmgFormat,
    arena: TmgArena,
    travelers: Vec<String>,
}

/// A read-only view of a single vertex
#[derive(Debug, Clone, Copy)]
pub struct VertexRef<'a> {
    pub index: usize,
    pub waypoint: &'a Waypoint,
    graph: &'a TmgGraph,
}

/// A read-only view of a single edge and its endpoint vertex indices
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    pub index: usize,
    pub end1: usize,
    pub end2: usize,
    pub connection: &'a Connection,
}

impl TmgGraph {
    /// Assemble a graph from parts which have already been read. Traveler
    /// names are only expected for traveled format graphs
    pub(crate) fn new(
        version: TmgVersion,
        format: TmgFormat,
        arena: TmgArena,
        travelers: Vec<String>,
    ) -> TmgGraph {
        TmgGraph {
            version,
            format,
            arena,
            travelers,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.arena.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.arena.edge_count()
    }

    pub fn num_travelers(&self) -> usize {
        self.travelers.len()
    }

    /// Traveler display names, indexed by the numbers used in traveler sets
    pub fn travelers(&self) -> &[String] {
        &self.travelers
    }

    pub fn traveler_name(&self, traveler: u32) -> Option<&str> {
        self.travelers.get(traveler as usize).map(String::as_str)
    }

    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.arena.node_weight(NodeIndex::new(index))
    }

    pub fn vertex(&self, index: usize) -> Option<VertexRef<'_>> {
        let waypoint = self.waypoint(index)?;
        Some(VertexRef {
            index,
            waypoint,
            graph: self,
        })
    }

    pub fn edge(&self, index: usize) -> Option<EdgeRef<'_>> {
        let inx = EdgeIndex::new(index);
        let connection = self.arena.edge_weight(inx)?;
        let (end1, end2) = self.arena.edge_endpoints(inx)?;
        Some(EdgeRef {
            index,
            end1: end1.index(),
            end2: end2.index(),
            connection,
        })
    }

    /// All vertices in file order
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_>> {
        (0..self.num_vertices()).filter_map(|inx| self.vertex(inx))
    }

    /// All edges in file order
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        (0..self.num_edges()).filter_map(|inx| self.edge(inx))
    }

    /// Release the graph and everything it owns. Equivalent to dropping it
    pub fn destroy(self) {
        drop(self)
    }
}

impl<'a> VertexRef<'a> {
    /// Edges incident on this vertex, most recently loaded first
    pub fn incident_edges(self) -> impl Iterator<Item = EdgeRef<'a>> {
        let graph = self.graph;
        graph
            .arena
            .edges(NodeIndex::new(self.index))
            .filter_map(move |eref| graph.edge(eref.id().index()))
    }

    pub fn degree(&self) -> usize {
        self.graph.arena.edges(NodeIndex::new(self.index)).count()
    }
}

impl EdgeRef<'_> {
    /// The vertex at the far end of this edge from `vertex`
    pub fn other_end(&self, vertex: usize) -> usize {
        if self.end1 == vertex {
            self.end2
        } else {
            self.end1
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::config::ShapingClosure;

    fn get_test_graph() -> TmgGraph {
        let mut arena = TmgArena::default();
        let waypoints = [
            Waypoint::new("A", 42.0, -73.0),
            Waypoint::new("B", 42.0, -72.0),
            Waypoint::new("C", 43.0, -72.0),
        ];
        for waypoint in waypoints.iter() {
            arena.add_node(waypoint.clone());
        }
        for (v1, v2, routes) in [(0, 1, "I-90"), (1, 2, "I-91")] {
            let conn = Connection::new(
                routes.to_string(),
                None,
                Vec::new(),
                &waypoints[v1].coords,
                &waypoints[v2].coords,
                TmgFormat::Simple,
                ShapingClosure::FirstEndpoint,
            );
            arena.add_edge(NodeIndex::new(v1), NodeIndex::new(v2), conn);
        }

        TmgGraph::new(
            TmgVersion { major: 1, minor: 0 },
            TmgFormat::Simple,
            arena,
            Vec::new(),
        )
    }

    #[test]
    fn test_counts() {
        let graph = get_test_graph();

        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.num_travelers(), 0);
    }

    #[test]
    fn test_vertex_indices_are_dense() {
        let graph = get_test_graph();

        let indices: Vec<usize> = graph.vertices().map(|v| v.index).collect();

        assert_eq!(indices, vec![0, 1, 2]);
        assert!(graph.vertex(3).is_none());
    }

    #[test]
    fn test_edge_endpoints_keep_file_order() {
        let graph = get_test_graph();

        let edge = match graph.edge(1) {
            Some(edge) => edge,
            None => panic!("Edge 1 should exist"),
        };

        assert_eq!((edge.end1, edge.end2), (1, 2));
        assert_eq!(edge.connection.routes, "I-91");
        assert_eq!(edge.other_end(2), 1);
    }

    #[test]
    fn test_incident_edges() {
        let graph = get_test_graph();

        let middle = match graph.vertex(1) {
            Some(vertex) => vertex,
            None => panic!("Vertex 1 should exist"),
        };
        let mut incident: Vec<usize> =
            middle.incident_edges().map(|e| e.index).collect();
        incident.sort();

        assert_eq!(incident, vec![0, 1]);
        assert_eq!(middle.degree(), 2);
    }

    #[test]
    fn test_every_edge_registered_on_both_ends() {
        let graph = get_test_graph();

        for edge in graph.edges() {
            for end in [edge.end1, edge.end2] {
                let vertex = match graph.vertex(end) {
                    Some(vertex) => vertex,
                    None => panic!("Endpoint {end} should exist"),
                };
                assert!(
                    vertex.incident_edges().any(|e| e.index == edge.index)
                );
            }
        }
    }

    #[test]
    fn test_destroy() {
        let graph = get_test_graph();

        graph.destroy();
    }
}
