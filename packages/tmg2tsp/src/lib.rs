//! Loading of METAL TMG highway graph files, and derivation of the
//! distance matrices which TSP solvers take as input.

pub mod common;
pub mod graph;
pub mod loading;
pub mod matrix;
pub mod report;
pub mod stats;

pub use common::error::{Result, TmgError};
pub use graph::TmgGraph;
pub use loading::tmg::{load_graph, read_graph};
