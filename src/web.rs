use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::Filter;

use crate::experiment::{self, GraphRecord, RunParams, GRAPH_IMAGE, METRICS_CSV, METRICS_IMAGE};

/** runs the presentation layer until the process is stopped.

`GET /experiment` serves the cached artifacts, running one full
experiment first if any artifact is missing; `POST /experiment` re-runs
with the submitted form parameters; `/static/...` serves the artifact
directory itself. A failed (re)generation surfaces as an HTTP 500 page
carrying the error, never as stale output. */
pub async fn serve(params: RunParams, port: u16) {
    let params = Arc::new(params);
    let static_dir = params.output_dir.clone();

    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(index_page()));

    let get_params = params.clone();
    let experiment_get = warp::path("experiment")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(move || {
            let base = get_params.clone();
            async move { experiment_page(base, None).await }
        });

    let post_params = params.clone();
    let experiment_post = warp::path("experiment")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::form())
        .and_then(move |form: HashMap<String, String>| {
            let base = post_params.clone();
            async move { experiment_page(base, Some(form)).await }
        });

    let static_files = warp::path("static").and(warp::fs::dir(static_dir));

    let routes = index
        .or(experiment_get)
        .or(experiment_post)
        .or(static_files);
    println!("serving the dashboard on http://127.0.0.1:{}/", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;
}

/// overrides the run parameters with the submitted form values;
/// unparsable fields keep their previous value
fn apply_form(params: &mut RunParams, form: &HashMap<String, String>) {
    if let Some(v) = form.get("num_graphs").and_then(|s| s.parse().ok()) {
        params.num_graphs = v;
    }
    if let Some(v) = form.get("n").and_then(|s| s.parse().ok()) {
        params.n = v;
    }
    if let Some(v) = form.get("p").and_then(|s| s.parse().ok()) {
        params.p = v;
    }
    if let Some(v) = form.get("base_seed").and_then(|s| s.parse().ok()) {
        params.base_seed = v;
    }
}

async fn experiment_page(
    base: Arc<RunParams>,
    form: Option<HashMap<String, String>>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut params = (*base).clone();
    let rerun = form.is_some();
    if let Some(form) = &form {
        apply_form(&mut params, form);
    }
    // the search loop is synchronous; keep it off the async workers
    let generated = tokio::task::spawn_blocking(move || {
        if rerun || !experiment::artifacts_present(&params.output_dir) {
            experiment::run_and_save(&params).map(|_| params)
        } else {
            Ok(params)
        }
    })
    .await;
    let reply = match generated {
        Ok(Ok(effective)) => {
            let records = load_records(&effective);
            warp::reply::with_status(
                warp::reply::html(experiment_html(&effective, &records)),
                StatusCode::OK,
            )
        }
        Ok(Err(e)) => warp::reply::with_status(
            warp::reply::html(error_html(&e.to_string())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        Err(e) => warp::reply::with_status(
            warp::reply::html(error_html(&e.to_string())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    };
    Ok(reply)
}

/// reads the persisted metrics back; absent or unreadable file -> no rows
fn load_records(params: &RunParams) -> Vec<GraphRecord> {
    match fs::read_to_string(params.output_dir.join(METRICS_CSV)) {
        Ok(content) => experiment::parse_metrics_csv(&content),
        Err(_) => Vec::new(),
    }
}

const PAGE_STYLE: &str = "body { font-family: system-ui, sans-serif; margin: 2rem; } \
h1, h2 { color: #222; } .section { margin-bottom: 2rem; } \
img { max-width: 100%; border: 1px solid #ccc; padding: 4px; background: #fafafa; } \
code { background: #f4f4f4; padding: 2px 4px; border-radius: 3px; } \
table { border-collapse: collapse; } td, th { border: 1px solid #999; padding: 4px 8px; }";

fn index_page() -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\" />\
<title>Minimum Sum Coloring</title><style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Minimum Sum Coloring</h1>\n\
<p>Random graphs are colored with a greedy heuristic, then improved with a\n\
tabu search that minimizes the sum of the assigned colors. The experiment\n\
page shows the resulting metrics and images.</p>\n\
<p><a href=\"/experiment\">Go to the experiment</a></p>\n\
</body>\n</html>\n"
    )
}

fn error_html(message: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\" />\
<title>Experiment failed</title><style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Experiment failed</h1>\n<p>{message}</p>\n\
<p><a href=\"/experiment\">Try again</a></p>\n</body>\n</html>\n"
    )
}

fn experiment_html(params: &RunParams, records: &[GraphRecord]) -> String {
    let mut rows = String::new();
    for r in records {
        let gain = r.greedy_sum as i64 - r.tabu_sum as i64;
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
<td>{:.4}</td><td>{:.4}</td></tr>\n",
            r.index, r.greedy_sum, r.tabu_sum, gain, r.greedy_colors, r.tabu_colors,
            r.greedy_time, r.tabu_time
        ));
    }
    let dir = params.output_dir.display();
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\" />\
<title>Minimum Sum Coloring - Results</title><style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Minimum Sum Coloring - Results</h1>\n\
<div class=\"section\">\n<h2>Run parameters</h2>\n\
<form method=\"post\">\n\
<label>Number of graphs: <input type=\"number\" name=\"num_graphs\" value=\"{num_graphs}\" min=\"1\" /></label><br />\n\
<label>Vertices per graph: <input type=\"number\" name=\"n\" value=\"{n}\" min=\"1\" /></label><br />\n\
<label>Edge probability: <input type=\"number\" step=\"0.01\" name=\"p\" value=\"{p}\" min=\"0\" max=\"1\" /></label><br />\n\
<label>Base seed: <input type=\"number\" name=\"base_seed\" value=\"{seed}\" /></label><br />\n\
<button type=\"submit\">Re-run the experiment</button>\n</form>\n</div>\n\
<div class=\"section\">\n<h2>Example of a colored graph</h2>\n\
<p>A subgraph of the first graph (at most 40 vertices): adjacent vertices\n\
never share a color, and the search keeps the sum of the color labels as\n\
small as it can.</p>\n\
<img src=\"/static/{graph_image}\" alt=\"colored graph\" />\n</div>\n\
<div class=\"section\">\n<h2>Greedy vs tabu search</h2>\n\
<p>One point per graph; lower is better.</p>\n\
<img src=\"/static/{metrics_image}\" alt=\"metrics chart\" />\n\
<h3>Per-graph details</h3>\n\
<table>\n<tr><th>graph</th><th>greedy sum</th><th>tabu sum</th>\
<th>gain</th><th>greedy colors</th><th>tabu colors</th>\
<th>greedy time (s)</th><th>tabu time (s)</th></tr>\n{rows}</table>\n</div>\n\
<div class=\"section\">\n<h2>Where the data lives</h2>\n\
<ul>\n<li><code>{dir}/{metrics_csv}</code>: one row of metrics per graph</li>\n\
<li><code>{dir}/{graph_image}</code>: drawing of a colored graph</li>\n\
<li><code>{dir}/{metrics_image}</code>: greedy vs tabu chart</li>\n</ul>\n</div>\n\
</body>\n</html>\n",
        num_graphs = params.num_graphs,
        n = params.n,
        p = params.p,
        seed = params.base_seed,
        graph_image = GRAPH_IMAGE,
        metrics_image = METRICS_IMAGE,
        metrics_csv = METRICS_CSV,
        rows = rows,
        dir = dir,
    )
}
