use std::path::Path;

use plotters::prelude::*;
use plotters::style::Color as _;

use crate::error::ExperimentError;
use crate::experiment::GraphRecord;
use crate::graph::{Color, Graph};

/// largest number of vertices drawn in the example image
const MAX_DRAWN_VERTICES: usize = 40;

fn render_err<E: std::fmt::Display>(e: E) -> ExperimentError {
    ExperimentError::Render(e.to_string())
}

/** draws the greedy vs tabu color sums, one point per graph index */
pub fn plot_metrics(records: &[GraphRecord], path: &Path) -> Result<(), ExperimentError> {
    if records.is_empty() {
        return Ok(());
    }
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let max_sum = records.iter().map(|r| r.greedy_sum.max(r.tabu_sum)).max().unwrap_or(1);
    let min_sum = records.iter().map(|r| r.greedy_sum.min(r.tabu_sum)).min().unwrap_or(0);
    let x_max = records.len() as i32 + 1;
    let y_lo = min_sum.saturating_sub(1) as i32;
    let y_hi = max_sum as i32 + 1;
    let mut chart = ChartBuilder::on(&root)
        .caption("Greedy vs tabu search color sums", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..x_max, y_lo..y_hi)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("graph index")
        .y_desc("color sum")
        .draw()
        .map_err(render_err)?;
    let greedy: Vec<(i32, i32)> = records
        .iter()
        .map(|r| (r.index as i32, r.greedy_sum as i32))
        .collect();
    let tabu: Vec<(i32, i32)> = records
        .iter()
        .map(|r| (r.index as i32, r.tabu_sum as i32))
        .collect();
    chart
        .draw_series(LineSeries::new(greedy.iter().copied(), &BLUE))
        .map_err(render_err)?
        .label("greedy")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(greedy.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
        .map_err(render_err)?;
    chart
        .draw_series(LineSeries::new(tabu.iter().copied(), &RED))
        .map_err(render_err)?
        .label("tabu search")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(tabu.iter().map(|&p| Circle::new(p, 3, RED.filled())))
        .map_err(render_err)?;
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;
    root.present().map_err(render_err)?;
    Ok(())
}

/** draws (a subgraph of) the colored graph: at most 40 vertices laid out
on a circle, edges first, then one filled circle per vertex keyed by its
color */
pub fn plot_colored_graph(
    graph: &Graph,
    coloring: &[Color],
    path: &Path,
) -> Result<(), ExperimentError> {
    let shown = graph.n().min(MAX_DRAWN_VERTICES);
    let size: u32 = 600;
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    if shown == 0 {
        root.present().map_err(render_err)?;
        return Ok(());
    }
    let center = f64::from(size) / 2.0;
    let radius = center - 40.0;
    let position = |v: usize| -> (i32, i32) {
        let angle = 2.0 * std::f64::consts::PI * v as f64 / shown as f64;
        (
            (center + radius * angle.cos()) as i32,
            (center + radius * angle.sin()) as i32,
        )
    };
    for &(u, v) in graph.edges() {
        if u < shown && v < shown {
            root.draw(&PathElement::new(vec![position(u), position(v)], BLACK.mix(0.4)))
                .map_err(render_err)?;
        }
    }
    for v in 0..shown {
        let style = Palette99::pick(coloring[v]).filled();
        root.draw(&Circle::new(position(v), 8, style))
            .map_err(render_err)?;
    }
    root.present().map_err(render_err)?;
    Ok(())
}
