//! Core library for randomized branching-tree generation.
//!
//! Main components:
//! - [`config`] — numeric bounds controlling generation, with documented
//!   defaults and validation.
//! - [`tree`] — branches and the generated tree structure.
//! - [`generator`] — recursive stochastic construction of a tree.
//! - [`errors`] — configuration and growth failures.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod errors;
pub mod generator;
pub mod tree;
pub mod types;
