//! Minimum sum coloring experiments: generate random graphs, color them
//! greedily, improve with tabu search, persist metrics and images, and
//! optionally serve the results as a small web dashboard.

use std::path::PathBuf;

use anyhow::Result;
use clap::{arg, value_parser, ArgMatches, Command};

use msc_color::experiment::{run_and_save, RunParams};
use msc_color::search::tabu::NeighborhoodScope;
use msc_color::web;

fn cli() -> Command {
    Command::new("msc-color")
        .about("Minimum sum coloring: greedy construction + tabu search over random graphs")
        .arg(
            arg!(--graphs [COUNT] "Number of random graphs")
                .default_value("20")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--vertices [N] "Vertices per graph")
                .default_value("100")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"edge-prob" [P] "Edge probability of the G(n,p) graphs")
                .default_value("0.2")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!(--seed [SEED] "Base seed for graph generation")
                .default_value("42")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--tenure [ITERS] "Iterations a reversed move stays tabu")
                .default_value("7")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"max-iterations" [ITERS] "Iteration cap per search")
                .default_value("500")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"max-no-improve" [ITERS] "Stop after this many non-improving iterations")
                .default_value("100")
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(--"swap-moves" "Also enumerate pairwise color swaps"))
        .arg(
            arg!(--out [DIR] "Artifact directory")
                .default_value("web/static")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the experiment dashboard")
                .arg(
                    arg!(--port [PORT] "Listen port")
                        .default_value("8080")
                        .value_parser(value_parser!(u16)),
                ),
        )
}

fn params_from_args(args: &ArgMatches) -> RunParams {
    let mut params = RunParams::default();
    params.num_graphs = *args.get_one::<usize>("graphs").unwrap();
    params.n = *args.get_one::<usize>("vertices").unwrap();
    params.p = *args.get_one::<f64>("edge-prob").unwrap();
    params.base_seed = *args.get_one::<u64>("seed").unwrap();
    params.output_dir = args.get_one::<PathBuf>("out").unwrap().clone();
    params.tabu.tenure = *args.get_one::<usize>("tenure").unwrap();
    params.tabu.max_iterations = *args.get_one::<usize>("max-iterations").unwrap();
    params.tabu.max_no_improve = *args.get_one::<usize>("max-no-improve").unwrap();
    if args.get_flag("swap-moves") {
        params.tabu.neighborhood = NeighborhoodScope::RecolorAndSwap;
    }
    params
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli().get_matches();
    let params = params_from_args(&args);
    match args.subcommand() {
        Some(("serve", serve_args)) => {
            let port = *serve_args.get_one::<u16>("port").unwrap();
            web::serve(params, port).await;
        }
        _ => {
            println!("=========================================================");
            run_and_save(&params)?;
            println!("artifacts written to {}", params.output_dir.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_has_no_required_flags() {
        let args = cli().get_matches_from(["msc-color"]);
        let params = params_from_args(&args);
        assert_eq!(params.num_graphs, 20);
        assert_eq!(params.n, 100);
        assert_eq!(params.tabu.tenure, 7);
    }

    #[test]
    fn test_cli_overrides() {
        let args = cli().get_matches_from([
            "msc-color",
            "--graphs",
            "5",
            "--vertices",
            "50",
            "--edge-prob",
            "0.1",
            "--tenure",
            "9",
            "--swap-moves",
        ]);
        let params = params_from_args(&args);
        assert_eq!(params.num_graphs, 5);
        assert_eq!(params.n, 50);
        assert!((params.p - 0.1).abs() < 1e-12);
        assert_eq!(params.tabu.tenure, 9);
        assert_eq!(params.tabu.neighborhood, NeighborhoodScope::RecolorAndSwap);
    }
}
