//! Minimum sum coloring over random graphs: a greedy constructor builds a
//! proper coloring, a tabu search lowers the sum of the assigned colors.

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]

/// error taxonomy shared by the whole crate
pub mod error;

/// graph model, colorings and the feasibility checker
pub mod graph;

/// random graph generation
pub mod generator;

/// search algorithms for the minimum sum coloring problem
pub mod search;

/// batch experiment orchestration and artifact persistence
pub mod experiment;

/// chart and graph-drawing helpers
pub mod plot;

/// web presentation layer serving the cached artifacts
pub mod web;
