//! The TSP input document: a distance matrix over the leading waypoints of
//! a graph, followed by those waypoints and the file they came from. This
//! can be rendered as the tab separated text the Pacheco TSP programs read,
//! or as JSON.

use std::fmt::Write as _;

use indicatif::ProgressBar;
use serde::Serialize;

use crate::common::error::Result;
use crate::common::graph_data::Waypoint;
use crate::graph::TmgGraph;
use crate::matrix::DistanceMatrix;

/// Container for everything written out for a single TSP instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TspReport {
    pub num_points: usize,
    pub matrix: DistanceMatrix,
    pub waypoints: Vec<Waypoint>,
    pub source: String,
}

impl TspReport {
    /// Build the report for the first `num_points` vertices of the graph
    pub fn new(
        graph: &TmgGraph,
        num_points: usize,
        source: impl Into<String>,
        progress: &ProgressBar,
    ) -> Result<TspReport> {
        let matrix = DistanceMatrix::from_graph(graph, num_points, progress)?;
        let waypoints = graph
            .vertices()
            .take(num_points)
            .map(|v| v.waypoint.clone())
            .collect();

        Ok(TspReport {
            num_points,
            matrix,
            waypoints,
            source: source.into(),
        })
    }

    /// Render as text: the point count, one tab terminated row per point, a
    /// blank line, one line per waypoint and finally the source trailer
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", self.num_points);
        for row in self.matrix.cells.iter() {
            for cell in row {
                let _ = write!(out, "{cell}\t");
            }
            out.push('\n');
        }
        out.push('\n');

        for waypoint in self.waypoints.iter() {
            let _ = writeln!(out, "{waypoint}");
        }

        let _ = writeln!(out, "\nComputed from METAL .tmg file {}", self.source);
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
