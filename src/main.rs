use crate::{
    app::{App, AppOptions},
    config::Config,
    render::terminal::wrap,
    sorting::Algorithm,
    theme::{Theme, ThemeMode},
};
use anyhow::{ensure, Context};
use clap::Parser;
use std::{fs::File, path::PathBuf, time::Duration};
use strum::IntoEnumIterator;

mod app;
mod config;
mod dataset;
mod pacer;
mod render;
mod session;
mod sorting;
mod theme;

/// Run classic sorting algorithms and watch them work.
#[derive(Parser)]
#[command(author, version, about = "Visualize sorting algorithms in your terminal", long_about = None)]
struct Cli {
    /// The algorithm to start with.
    #[clap(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// The number of bars to sort.
    #[clap(short, long)]
    bars: Option<usize>,

    /// The delay between steps, in milliseconds.
    #[clap(short, long)]
    delay_ms: Option<u64>,

    /// The theme to start with.
    #[clap(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// The path to the configuration file.
    #[clap(short, long, env = "SORTVIZ_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Seed the random number generator so datasets are reproducible.
    #[clap(long)]
    seed: Option<u64>,

    /// Run a single sort without a terminal and print its report.
    #[clap(long)]
    headless: bool,

    /// List the available algorithms.
    #[clap(short, long)]
    list: bool,

    /// Write logs to this file. The filter is taken from `SORTVIZ_LOG`.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Print the JSON schema for the configuration file.
    #[cfg(feature = "json-schema")]
    #[clap(long)]
    generate_config_schema: bool,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SORTVIZ_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("could not load config {}", path.display()))?,
        None => Config::load_default().context("could not load config")?,
    };
    Ok(config)
}

fn list_algorithms() {
    for algorithm in Algorithm::iter() {
        println!("{:<10} {}", algorithm.id(), algorithm.title());
        for line in wrap(algorithm.description(), 70) {
            println!("           {line}");
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli)?;

    #[cfg(feature = "json-schema")]
    if cli.generate_config_schema {
        let schema = schemars::schema_for!(Config);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    if cli.list {
        list_algorithms();
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    if let Some(seed) = cli.seed {
        fastrand::seed(seed);
    }
    if let Some(mode) = cli.theme {
        config.theme.mode = mode;
    }
    let algorithm = cli.algorithm.unwrap_or(config.defaults.algorithm);
    let bars = cli.bars.unwrap_or(config.defaults.bars);
    ensure!(bars > 0, "at least one bar is needed");
    let step_delay = Duration::from_millis(cli.delay_ms.unwrap_or(config.defaults.step_delay_ms));
    log::info!("starting with {algorithm}, {bars} bars, {}ms delay", step_delay.as_millis());

    if cli.headless {
        let report = app::run_headless(algorithm, bars, step_delay);
        println!("{}", report.time_text());
        println!("{}", report.description());
        println!(
            "frames: {}, comparisons: {}, swaps: {}, writes: {}",
            report.frames, report.comparisons, report.swaps, report.writes
        );
        return Ok(());
    }

    let options = AppOptions { algorithm, bars, step_delay, theme: Theme::new(&config.theme) };
    App::new(options)?.run()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
