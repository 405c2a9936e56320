//! Exhaustive search: the exact baseline.
//!
//! Enumerates every simple path per demand and walks their Cartesian
//! product, keeping the feasible combination with the lowest max load
//! ratio. Exponential in the number of demands.

mod config;
mod runner;

pub use config::ExhaustiveConfig;
pub use runner::{ExhaustiveResult, ExhaustiveRunner};
