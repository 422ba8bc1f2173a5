//! Search algorithms for the minimum sum coloring problem.

/// greedy constructor (non-increasing degree order, smallest feasible color)
pub mod greedy;

/// tabu search improvement engine
pub mod tabu;
