//! This module focuses on reading METAL TMG files and using them to
//! generate a graph object.

pub mod bitfield;
pub mod tmg;
pub mod tokens;
