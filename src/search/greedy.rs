use std::cmp::Reverse;

use bit_set::BitSet;

use crate::graph::{Color, Coloring, Graph};

/** greedy constructor for minimum sum coloring:
    1. order vertices by non-increasing degree, ties by ascending vertex id
    2. assign each vertex the smallest positive color not used by an
       already-colored neighbor

Coloring the most constrained vertices first tends to hand the small
labels to the high-degree vertices, which lowers the total sum.
Deterministic: two runs on the same graph return the same coloring.
Returns the coloring and its color sum. */
pub fn greedy_sum_coloring(graph: &Graph) -> (Coloring, usize) {
    let n = graph.n();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&v| (Reverse(graph.degree(v)), v));
    let mut coloring: Coloring = vec![0; n];
    let mut forbidden: BitSet = BitSet::default(); // colors used by the colored neighbors
    for &v in &order {
        forbidden.clear();
        for &u in graph.neighbors(v) {
            if coloring[u] != 0 {
                forbidden.insert(coloring[u]);
            }
        }
        let mut color: Color = 1;
        while forbidden.contains(color) {
            color += 1;
        }
        coloring[v] = color;
    }
    let sum = coloring.iter().sum();
    (coloring, sum)
}
