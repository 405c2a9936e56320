//! Genetic Algorithm (GA).
//!
//! Evolves a population of path assignments. Each demand's path is one
//! gene: crossover exchanges whole paths per demand, mutation re-splices
//! them.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population, selection and mutation parameters
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: best solution with generation statistics
//! - [`Individual`]: a solution with its cached fitness
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::Individual;
