//! Goal queries and puzzle generation over a finished catalogue.

pub mod constants;
mod core;
mod errors;
mod question;

pub use core::Solver;
pub use errors::SolverError;
pub use question::{Question, Solution};

#[cfg(test)]
mod tests;
