//! Simulated Annealing (SA).
//!
//! Walks a single path assignment through partial re-splices, accepting
//! worsening moves with a probability that shrinks as the temperature
//! cools, so the search can leave congested local optima early on.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{SaConfig, MIN_TEMPERATURE};
pub use runner::{SaResult, SaRunner};
