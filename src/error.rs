use thiserror::Error;

use crate::graph::VertexId;

/** error raised when constructing a graph from raw vertex/edge data */
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGraphError {
    /// an edge endpoint is not in 0..n
    #[error("edge ({0},{1}) references a vertex out of range (n={2})")]
    VertexOutOfRange(VertexId, VertexId, usize),
    /// an edge joins a vertex to itself
    #[error("edge ({0},{0}) is a self-loop")]
    SelfLoop(VertexId),
    /// the same unordered pair appears more than once
    #[error("edge ({0},{1}) is duplicated")]
    DuplicateEdge(VertexId, VertexId),
}

/** error raised when validating run or search parameters */
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// tabu tenure must be at least 1 iteration
    #[error("tabu tenure must be positive")]
    NonPositiveTenure,
    /// the iteration cap must be at least 1
    #[error("iteration cap must be positive")]
    NonPositiveIterationCap,
    /// the no-improve cap must be at least 1
    #[error("no-improve cap must be positive")]
    NonPositiveNoImproveCap,
    /// the edge probability is not a probability
    #[error("edge probability must lie in [0,1] (got {0})")]
    EdgeProbabilityOutOfRange(f64),
    /// a batch needs at least one graph
    #[error("at least one graph is required")]
    NoGraphs,
    /// graphs need at least one vertex
    #[error("graphs must have at least one vertex")]
    NoVertices,
}

/** top-level failure of an experiment run. The search itself never fails:
exhaustion (no-improve limit, empty neighborhood, time budget) is a
termination cause on the report, not an error. */
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// malformed input graph
    #[error(transparent)]
    Graph(#[from] InvalidGraphError),
    /// rejected run or search parameters
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// failure writing the metrics file or the images
    #[error("writing artifacts failed: {0}")]
    Io(#[from] std::io::Error),
    /// failure serializing the run summary
    #[error("serializing the summary failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// failure rendering an image
    #[error("rendering failed: {0}")]
    Render(String),
}
