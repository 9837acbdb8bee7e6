//! Board spatial index.

pub mod grid;

pub use grid::*;
