//! Shortest-path solvers.
//!
//! - [`uniform_cost`] builds a shortest-path tree with open/closed partitions
//!   and predecessor records.
//! - [`enumeration`] keeps explicit candidate paths per location name.
//!
//! Neither solver uses a heuristic. Both run iteratively on the caller's thread
//! and keep all working state local to one call.

pub mod enumeration;
pub mod uniform_cost;

pub use enumeration::EnumerationMetric;
pub use uniform_cost::ExpansionPolicy;
