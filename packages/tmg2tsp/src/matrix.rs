//! Derivation of the symmetric distance matrix which TSP solvers take as
//! input. Distances are between the leading vertices of a loaded graph, in
//! tenths of a mile rounded up to the next tenth.

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;

use crate::common::error::{Result, TmgError};
use crate::common::geodesic::distance;
use crate::common::graph_data::LatLng;
use crate::graph::TmgGraph;

/// An n x n matrix of distances in tenths of a mile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    pub cells: Vec<Vec<u32>>,
}

/// Distance between two points in tenths of a mile, rounded up so that only
/// identical points are ever 0 apart
pub fn distance_in_tenths(p1: &LatLng, p2: &LatLng) -> u32 {
    (distance(p1, p2) * 10.0).ceil() as u32
}

impl DistanceMatrix {
    /// Compute the matrix over the first `num_points` vertices of the graph.
    /// Rows are computed in parallel, ticking `progress` once per row
    pub fn from_graph(
        graph: &TmgGraph,
        num_points: usize,
        progress: &ProgressBar,
    ) -> Result<DistanceMatrix> {
        if num_points < 2 {
            return Err(TmgError::TooFewPoints(num_points as i64));
        }
        if num_points > graph.num_vertices() {
            return Err(TmgError::OutOfRange {
                requested: num_points,
                available: graph.num_vertices(),
            });
        }

        let coords: Vec<LatLng> = graph
            .vertices()
            .take(num_points)
            .map(|v| v.waypoint.coords)
            .collect();

        let mut cells: Vec<Vec<u32>> = Vec::new();
        coords
            .par_iter()
            .enumerate()
            .map(|(from, p1)| {
                let row: Vec<u32> = coords
                    .iter()
                    .enumerate()
                    .map(|(to, p2)| {
                        if from == to { 0 } else { distance_in_tenths(p1, p2) }
                    })
                    .collect();
                progress.inc(1);
                row
            })
            .collect_into_vec(&mut cells);

        Ok(DistanceMatrix { cells })
    }

    pub fn num_points(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        self.cells.get(from)?.get(to).copied()
    }
}
