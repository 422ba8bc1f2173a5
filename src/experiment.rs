use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ExperimentError};
use crate::generator::generate_batch;
use crate::graph::{max_color, Coloring, Graph};
use crate::plot::{plot_colored_graph, plot_metrics};
use crate::search::greedy::greedy_sum_coloring;
use crate::search::tabu::{TabuConfig, TabuSearch};

/// metrics table, one row per graph
pub const METRICS_CSV: &str = "metrics.csv";
/// run parameters and aggregates
pub const SUMMARY_JSON: &str = "summary.json";
/// drawing of the first graph's final coloring
pub const GRAPH_IMAGE: &str = "graph_example.png";
/// greedy vs tabu chart over all graph indices
pub const METRICS_IMAGE: &str = "metrics.png";

/** run parameters of a full experiment */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// number of random graphs
    pub num_graphs: usize,
    /// vertices per graph
    pub n: usize,
    /// edge probability
    pub p: f64,
    /// base seed: graph i is generated with seed base_seed + i
    pub base_seed: u64,
    /// directory receiving the metrics file and the images
    pub output_dir: PathBuf,
    /// tabu search configuration
    pub tabu: TabuConfig,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            num_graphs: 20,
            n: 100,
            p: 0.2,
            base_seed: 42,
            output_dir: PathBuf::from("web/static"),
            tabu: TabuConfig::default(),
        }
    }
}

impl RunParams {
    /// validates the generation parameters and the tabu configuration
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.num_graphs == 0 {
            return Err(ConfigError::NoGraphs);
        }
        if self.n == 0 {
            return Err(ConfigError::NoVertices);
        }
        if !(0.0..=1.0).contains(&self.p) {
            return Err(ConfigError::EdgeProbabilityOutOfRange(self.p));
        }
        self.tabu.check()
    }
}

/** per-graph metrics row, indexed by the graph's identity in the batch
(1-based), never by completion order */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// 1-based index of the graph in the batch
    pub index: usize,
    /// color sum of the greedy coloring
    pub greedy_sum: usize,
    /// color sum after tabu search
    pub tabu_sum: usize,
    /// colors used by the greedy coloring
    pub greedy_colors: usize,
    /// colors used after tabu search
    pub tabu_colors: usize,
    /// greedy construction time (seconds)
    pub greedy_time: f64,
    /// tabu search time (seconds)
    pub tabu_time: f64,
}

/** everything a run produces: one record per graph, plus the first graph
and its final coloring (kept for the example drawing) */
#[derive(Debug)]
pub struct ExperimentOutcome {
    /// one record per graph, ordered by graph index
    pub records: Vec<GraphRecord>,
    /// the first graph of the batch
    pub example_graph: Graph,
    /// its best coloring found
    pub example_coloring: Coloring,
}

/** runs the full experiment: generates the batch and solves every graph
with greedy construction followed by tabu search. Searches are
independent and run in parallel, each task owning its graph and search
state; the records come back ordered by graph index. */
pub fn run_experiment(params: &RunParams) -> Result<ExperimentOutcome, ExperimentError> {
    params.check()?;
    println!(
        "generating {} random graphs (n={}, p={}, base seed {})...",
        params.num_graphs, params.n, params.p, params.base_seed
    );
    let graphs = generate_batch(params.num_graphs, params.n, params.p, params.base_seed)?;
    let engine = TabuSearch::new(params.tabu.clone())?;
    let solved: Vec<(GraphRecord, Coloring)> = graphs
        .par_iter()
        .enumerate()
        .map(|(i, graph)| solve_one(i, graph, &engine))
        .collect();
    for (record, _) in &solved {
        println!(
            "graph {}: greedy sum={} colors={} ({:.4}s) | tabu sum={} colors={} ({:.4}s) | gain={}",
            record.index,
            record.greedy_sum,
            record.greedy_colors,
            record.greedy_time,
            record.tabu_sum,
            record.tabu_colors,
            record.tabu_time,
            record.greedy_sum - record.tabu_sum,
        );
    }
    let records: Vec<GraphRecord> = solved.iter().map(|(r, _)| r.clone()).collect();
    let avg_greedy = average(records.iter().map(|r| r.greedy_sum));
    let avg_tabu = average(records.iter().map(|r| r.tabu_sum));
    println!("average greedy sum: {:.2}", avg_greedy);
    println!("average tabu sum:   {:.2}", avg_tabu);
    println!("average improvement: {:.2}", avg_greedy - avg_tabu);
    let example_coloring = solved[0].1.clone();
    // num_graphs >= 1 was checked, so the batch has a first graph
    let example_graph = match graphs.into_iter().next() {
        Some(graph) => graph,
        None => Graph::new(0, &[])?,
    };
    Ok(ExperimentOutcome { records, example_graph, example_coloring })
}

/// greedy + tabu on one graph, both timed
fn solve_one(i: usize, graph: &Graph, engine: &TabuSearch) -> (GraphRecord, Coloring) {
    let greedy_start = Instant::now();
    let (greedy_coloring, greedy_sum) = greedy_sum_coloring(graph);
    let greedy_time = greedy_start.elapsed().as_secs_f64();
    let tabu_start = Instant::now();
    let report = engine.improve(graph, &greedy_coloring);
    let tabu_time = tabu_start.elapsed().as_secs_f64();
    let record = GraphRecord {
        index: i + 1,
        greedy_sum,
        tabu_sum: report.best_sum,
        greedy_colors: max_color(&greedy_coloring),
        tabu_colors: max_color(&report.best_coloring),
        greedy_time,
        tabu_time,
    };
    (record, report.best_coloring)
}

fn average(values: impl ExactSizeIterator<Item = usize>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<usize>() as f64 / len as f64
}

/** renders the metrics table as CSV, one row per graph */
pub fn metrics_to_csv(records: &[GraphRecord]) -> String {
    let mut csv = String::new();
    writeln!(csv, "index,greedy_sum,tabu_sum,greedy_colors,tabu_colors,greedy_time,tabu_time")
        .unwrap();
    for r in records {
        writeln!(
            csv,
            "{},{},{},{},{},{:.6},{:.6}",
            r.index, r.greedy_sum, r.tabu_sum, r.greedy_colors, r.tabu_colors, r.greedy_time,
            r.tabu_time
        )
        .unwrap();
    }
    csv
}

/// parses one CSV row; None on a malformed line
fn parse_record(line: &str) -> Option<GraphRecord> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 7 {
        return None;
    }
    Some(GraphRecord {
        index: parts[0].parse().ok()?,
        greedy_sum: parts[1].parse().ok()?,
        tabu_sum: parts[2].parse().ok()?,
        greedy_colors: parts[3].parse().ok()?,
        tabu_colors: parts[4].parse().ok()?,
        greedy_time: parts[5].parse().ok()?,
        tabu_time: parts[6].parse().ok()?,
    })
}

/** parses a metrics CSV (header line first) back into records,
skipping blank or malformed lines */
pub fn parse_metrics_csv(content: &str) -> Vec<GraphRecord> {
    content
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_record)
        .collect()
}

/** writes metrics.csv, summary.json and both images into the output
directory (created if absent) */
pub fn save_artifacts(params: &RunParams, outcome: &ExperimentOutcome) -> Result<(), ExperimentError> {
    fs::create_dir_all(&params.output_dir)?;
    fs::write(params.output_dir.join(METRICS_CSV), metrics_to_csv(&outcome.records))?;
    let summary = serde_json::json!({
        "params": params,
        "avg_greedy_sum": average(outcome.records.iter().map(|r| r.greedy_sum)),
        "avg_tabu_sum": average(outcome.records.iter().map(|r| r.tabu_sum)),
    });
    fs::write(
        params.output_dir.join(SUMMARY_JSON),
        serde_json::to_string_pretty(&summary)?,
    )?;
    plot_metrics(&outcome.records, &params.output_dir.join(METRICS_IMAGE))?;
    plot_colored_graph(
        &outcome.example_graph,
        &outcome.example_coloring,
        &params.output_dir.join(GRAPH_IMAGE),
    )?;
    Ok(())
}

/** true if every artifact the presentation layer serves is on disk */
pub fn artifacts_present(dir: &Path) -> bool {
    [METRICS_CSV, GRAPH_IMAGE, METRICS_IMAGE]
        .iter()
        .all(|name| dir.join(name).exists())
}

/** one full pass: run the experiment and persist every artifact */
pub fn run_and_save(params: &RunParams) -> Result<ExperimentOutcome, ExperimentError> {
    let outcome = run_experiment(params)?;
    save_artifacts(params, &outcome)?;
    Ok(outcome)
}
