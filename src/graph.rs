use bit_set::BitSet;

use crate::error::InvalidGraphError;

/** Vertex Id */
pub type VertexId = usize;

/** Color label (positive, 1-based) */
pub type Color = usize;

/** Coloring of a graph: coloring[v] is the color assigned to vertex v */
pub type Coloring = Vec<Color>;

/** models an undirected simple graph: no self-loop, no duplicate edge.
Immutable once constructed. */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph (normalized: u < v)
    edges: Vec<(VertexId, VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
}

impl Graph {
    /** builds a graph from a vertex count and an edge list. Rejects edges
    with an out-of-range endpoint, self-loops, and duplicate edges (after
    normalizing unordered pairs). */
    pub fn new(n: usize, edges: &[(VertexId, VertexId)]) -> Result<Self, InvalidGraphError> {
        let mut adj_list = vec![Vec::new(); n];
        let mut adj_matrix = vec![BitSet::with_capacity(n); n];
        let mut normalized = Vec::with_capacity(edges.len());
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(InvalidGraphError::VertexOutOfRange(u, v, n));
            }
            if u == v {
                return Err(InvalidGraphError::SelfLoop(u));
            }
            let (a, b) = if u < v { (u, v) } else { (v, u) };
            if adj_matrix[a].contains(b) {
                return Err(InvalidGraphError::DuplicateEdge(a, b));
            }
            adj_matrix[a].insert(b);
            adj_matrix[b].insert(a);
            adj_list[a].push(b);
            adj_list[b].push(a);
            normalized.push((a, b));
        }
        Ok(Self { n, m: normalized.len(), edges: normalized, adj_list, adj_matrix })
    }

    /// number of vertices
    pub fn n(&self) -> usize { self.n }

    /// number of edges
    pub fn m(&self) -> usize { self.m }

    /// list of vertices adjacent to vertex i
    pub fn neighbors(&self, i: VertexId) -> &[VertexId] { &self.adj_list[i] }

    /// degree of vertex i
    pub fn degree(&self, i: VertexId) -> usize { self.adj_list[i].len() }

    /// edge list (normalized pairs, u < v)
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// returns if a and b are adjacent, in O(1) through the bitset matrix
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.adj_matrix[a].contains(b)
    }
}

/** sum of the colors assigned to all vertices */
pub fn color_sum(coloring: &[Color]) -> usize {
    coloring.iter().sum()
}

/** number of colors used, i.e. the largest color label (0 if empty) */
pub fn max_color(coloring: &[Color]) -> Color {
    coloring.iter().copied().max().unwrap_or(0)
}

/**
returns None if the coloring is not a proper complete coloring of the graph
returns the color sum if it is
*/
pub fn checker(graph: &Graph, coloring: &[Color]) -> Option<usize> {
    if coloring.len() != graph.n() {
        return None;
    }
    if coloring.iter().any(|&c| c == 0) {
        return None; // colors are positive
    }
    for &(u, v) in graph.edges() {
        if coloring[u] == coloring[v] {
            return None;
        }
    }
    Some(color_sum(coloring))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path() {
        let graph = Graph::new(3, &[(0, 1), (2, 1)]).unwrap();
        assert_eq!(graph.n(), 3);
        assert_eq!(graph.m(), 2);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(0), 1);
        assert!(graph.are_adjacent(1, 2));
        assert!(graph.are_adjacent(2, 1));
        assert!(!graph.are_adjacent(0, 2));
        // edges come back normalized
        assert_eq!(graph.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Graph::new(2, &[(0, 2)]).unwrap_err(),
            InvalidGraphError::VertexOutOfRange(0, 2, 2)
        );
    }

    #[test]
    fn test_rejects_self_loop() {
        assert_eq!(
            Graph::new(2, &[(1, 1)]).unwrap_err(),
            InvalidGraphError::SelfLoop(1)
        );
    }

    #[test]
    fn test_rejects_duplicate_even_reversed() {
        assert_eq!(
            Graph::new(3, &[(0, 1), (1, 0)]).unwrap_err(),
            InvalidGraphError::DuplicateEdge(0, 1)
        );
    }

    #[test]
    fn test_checker() {
        let graph = Graph::new(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(checker(&graph, &[1, 2, 1]), Some(4));
        assert_eq!(checker(&graph, &[1, 1, 2]), None); // conflict on (0,1)
        assert_eq!(checker(&graph, &[1, 2]), None); // incomplete
        assert_eq!(checker(&graph, &[1, 0, 1]), None); // 0 is not a color
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(color_sum(&[1, 2, 1]), 4);
        assert_eq!(max_color(&[1, 2, 1]), 2);
        assert_eq!(max_color(&[]), 0);
    }
}
