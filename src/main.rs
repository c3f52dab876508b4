use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn, Level};

use balanced_groups::config::{AnnealParams, Config, Weights};
use balanced_groups::error::ShuffleResult;
use balanced_groups::history::History;
use balanced_groups::render::{render_partition, render_report};
use balanced_groups::roster::{load_roster, parse_roster};
use balanced_groups::Annealer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Roster file, one `name, gender, level, exchange` per line. Reads stdin when omitted.
    roster: Option<PathBuf>,

    #[arg(short, long)]
    size: Option<usize>,

    /// JSON config with `group_size`, `anneal` and `weights`; replaces the inline flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of earlier rounds, each an array of groups of names.
    #[arg(long)]
    history: Option<PathBuf>,

    /// Consecutive rounds; each accepted round is avoided by the next.
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    #[arg(long, default_value_t = 1)]
    restarts: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    report: bool,

    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, default_value_t = false)]
    debug: bool,

    #[command(flatten)]
    anneal: AnnealParams,

    #[command(flatten)]
    weights: Weights,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> ShuffleResult<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config {
            anneal: cli.anneal.clone(),
            weights: cli.weights.clone(),
            ..Default::default()
        },
    };
    if let Some(size) = cli.size {
        config.group_size = size;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> ShuffleResult<()> {
    let config = load_config(&cli)?;

    let students = match &cli.roster {
        Some(path) => load_roster(path)?,
        None => parse_roster(&io::read_to_string(io::stdin())?),
    };
    if students.is_empty() {
        warn!("Roster is empty, nothing to group");
    }
    info!(
        "Grouping {} students into groups of {}",
        students.len(),
        config.group_size
    );

    let mut history = match &cli.history {
        Some(path) => History::load_from_file(path, &students)?,
        None => History::new(),
    };
    info!(
        "History: {} rounds, {} pairs to avoid",
        history.len(),
        history.forbidden_pairs().len()
    );

    let annealer = Annealer::new(config.anneal.clone(), config.weights.clone());
    let mut exported = Vec::new();

    for round in 0..cli.rounds.max(1) {
        let seed = cli.seed.map(|s| s.wrapping_add(round as u64 * 1_000));
        let outcome = annealer.run_restarts(
            &students,
            config.group_size,
            history.forbidden_pairs(),
            cli.restarts,
            seed,
        )?;
        info!(
            round = round + 1,
            score = outcome.score,
            initial = outcome.initial_score,
            accepted = outcome.accepted_moves,
            improving = outcome.improving_moves,
            uphill = outcome.uphill_moves,
            skipped = outcome.skipped_moves,
            "round finished"
        );

        if cli.json {
            exported.push(outcome.partition.names());
        } else {
            if cli.rounds > 1 {
                println!("# Round {}", round + 1);
            }
            println!("{}", render_partition(&outcome.partition));
            if cli.report {
                println!(
                    "{}",
                    render_report(
                        &outcome.partition,
                        history.forbidden_pairs(),
                        config.group_size,
                        &config.weights,
                    )
                );
            }
        }
        history.accept(outcome.partition);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&exported)?);
    }
    Ok(())
}
