//! Variable Neighborhood Search (VNS).
//!
//! Alternates shaking of growing strength with a first-improvement local
//! search. Shaking strength `k` is the number of demands perturbed at once,
//! so larger neighborhoods move the incumbent further from its basin.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;

pub use config::VnsConfig;
pub use runner::{VnsResult, VnsRunner};
