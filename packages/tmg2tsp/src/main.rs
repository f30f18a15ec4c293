use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use log::{debug, error};
use std::time::Instant;
use tmg2tsp::common::config::{MatrixConfig, OutputFormat, UserMatrixConfig};
use tmg2tsp::load_graph;
use tmg2tsp::report::TspReport;
use tmg2tsp::stats::GraphStats;

fn main() {
    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let user_config = UserMatrixConfig::parse();

    let level = if user_config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let config = MatrixConfig::try_from(user_config)?;
    let now = Instant::now();

    let graph = load_graph(&config.filename, &config.load).with_context(
        || format!("could not load {}", config.filename.display()),
    )?;
    debug!("Loaded graph in {:.2?}", now.elapsed());

    if config.show_stats {
        match GraphStats::new(&graph) {
            Some(stats) => eprint!("{stats}"),
            None => eprintln!("Graph has no vertices, no statistics"),
        }
    }

    let progress = if config.show_progress {
        ProgressBar::new(config.num_points as u64)
    } else {
        ProgressBar::hidden()
    };

    let source = config.filename.display().to_string();
    let report =
        TspReport::new(&graph, config.num_points, source, &progress)?;
    progress.finish_and_clear();

    match config.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    debug!("Elapsed: {:.2?}", now.elapsed());
    Ok(())
}
