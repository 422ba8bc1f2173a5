use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::InvalidGraphError;
use crate::graph::{Graph, VertexId};

/** samples an Erdős–Rényi G(n,p) graph: every unordered pair of distinct
vertices is an edge with probability p. The same seed always yields the
same graph. `p` must lie in [0,1] (run parameters are validated upstream). */
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Result<Graph, InvalidGraphError> {
    debug_assert!((0.0..=1.0).contains(&p));
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::new(n, &edges)
}

/** generates `count` independent G(n,p) graphs; graph i uses seed
base_seed + i, so the whole batch is reproducible. */
pub fn generate_batch(
    count: usize,
    n: usize,
    p: f64,
    base_seed: u64,
) -> Result<Vec<Graph>, InvalidGraphError> {
    (0..count)
        .map(|i| erdos_renyi(n, p, base_seed + i as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_graph() {
        let a = erdos_renyi(30, 0.3, 7).unwrap();
        let b = erdos_renyi(30, 0.3, 7).unwrap();
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = erdos_renyi(30, 0.3, 7).unwrap();
        let b = erdos_renyi(30, 0.3, 8).unwrap();
        assert_ne!(a.edges(), b.edges());
    }

    #[test]
    fn test_extreme_probabilities() {
        let empty = erdos_renyi(10, 0.0, 1).unwrap();
        assert_eq!(empty.m(), 0);
        let complete = erdos_renyi(10, 1.0, 1).unwrap();
        assert_eq!(complete.m(), 10 * 9 / 2);
    }

    #[test]
    fn test_batch_reproducible() {
        let a = generate_batch(3, 15, 0.2, 42).unwrap();
        let b = generate_batch(3, 15, 0.2, 42).unwrap();
        assert_eq!(a.len(), 3);
        for (ga, gb) in a.iter().zip(b.iter()) {
            assert_eq!(ga.edges(), gb.edges());
        }
        // each graph of the batch gets its own seed
        let first_alone = erdos_renyi(15, 0.2, 42).unwrap();
        assert_eq!(a[0].edges(), first_alone.edges());
    }
}
