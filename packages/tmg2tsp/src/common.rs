//! Types shared across the loader, the graph and the matrix derivation.

pub mod bbox;
pub mod config;
pub mod error;
pub mod geodesic;
pub mod graph_data;
