//! Solution representation and scoring.
//!
//! A [`Solution`] assigns one [`Path`] to every demand of a network. Edge
//! loads are derived on demand from the paths, never stored in the network.
//!
//! # Scoring
//!
//! - [`Solution::max_load_ratio`]: peak `load / capacity` plus total overflow
//! - [`Solution::score`]: `1 - max_load_ratio` when feasible,
//!   `-(1 + overflow)` otherwise; higher is better

mod assignment;
mod path;

pub use assignment::{LoadSummary, Solution};
pub use path::{FlowPath, Path};
