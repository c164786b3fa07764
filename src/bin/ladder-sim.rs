//! Ladder Simulation CLI Tool
//!
//! Drives the full ranking engine end-to-end without any web frontend:
//! seeds items from a directory listing or a synthetic set, runs a batch
//! of randomly decided duels, and prints the resulting standings.
//!
//! Usage:
//!   cargo run --bin ladder-sim -- --items 12 --duels 200
//!   cargo run --bin ladder-sim -- --dir ./uploads --mode closeness --threshold 150

use anyhow::Result;
use clap::Parser;
use podium::gallery::{CandidateSource, DirectoryCandidateSource, StaticCandidateSource};
use podium::rating::win_probability;
use podium::{LadderManager, RankingConfig, SelectionMode};
use rand::Rng;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Podium ladder simulator - end-to-end exercise of the ranking engine
#[derive(Parser)]
#[command(
    name = "ladder-sim",
    version,
    about = "Simulate pairwise picture comparisons and print the resulting Elo standings"
)]
struct Args {
    /// Directory whose file names become the item set
    #[arg(long, value_name = "DIR", help = "Use file names from this directory as items")]
    dir: Option<PathBuf>,

    /// Number of synthetic items when no directory is given
    #[arg(long, default_value = "8", help = "Synthetic item count (ignored with --dir)")]
    items: usize,

    /// Number of duels to simulate
    #[arg(long, default_value = "200")]
    duels: u64,

    /// Selection mode (unconstrained or closeness)
    #[arg(long, default_value = "unconstrained")]
    mode: String,

    /// Closeness threshold in rating points
    #[arg(long, default_value = "300.0")]
    threshold: f64,

    /// K-factor for rating updates
    #[arg(short, long, default_value = "32.0")]
    k: f64,

    /// Include never-judged items in the final standings
    #[arg(long)]
    include_unrated: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn parse_mode(mode: &str, threshold: f64) -> Result<SelectionMode> {
    match mode.to_lowercase().as_str() {
        "unconstrained" => Ok(SelectionMode::Unconstrained),
        "closeness" => Ok(SelectionMode::Closeness { threshold }),
        _ => Err(anyhow::anyhow!(
            "Invalid mode '{}'. Use 'unconstrained' or 'closeness'",
            mode
        )),
    }
}

/// Hidden per-item quality used to decide simulated duels
///
/// Items earlier in the candidate list are "better"; a well-behaved engine
/// should roughly recover that order in the standings.
fn hidden_qualities(candidates: &[String]) -> HashMap<String, f64> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, id)| (id.clone(), 1800.0 - 60.0 * index as f64))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mode = parse_mode(&args.mode, args.threshold)?;

    let source: Box<dyn CandidateSource> = match &args.dir {
        Some(dir) => Box::new(DirectoryCandidateSource::new(dir)),
        None => Box::new(StaticCandidateSource::new(
            (1..=args.items)
                .map(|index| format!("picture-{:03}.jpg", index))
                .collect(),
        )),
    };

    let config = RankingConfig {
        k_factor: args.k,
        closeness_threshold: args.threshold,
        ..RankingConfig::default()
    };
    let manager = LadderManager::from_config(config)?;

    let candidates = source.candidates()?;
    info!(
        "Simulating {} duels over {} items ({} mode)",
        args.duels,
        candidates.len(),
        mode
    );

    let qualities = hidden_qualities(&candidates);
    let mut rng = rand::rng();
    let mut skipped = 0u64;

    for _ in 0..args.duels {
        let (first, second) = match manager.select_pair(&candidates, mode) {
            Ok(pair) => pair,
            Err(e) => {
                skipped += 1;
                warn!("Pair selection failed: {}", e);
                if skipped >= 25 {
                    warn!("Too many failed selections, stopping early");
                    break;
                }
                continue;
            }
        };
        skipped = 0;

        // Decide the duel from the hidden qualities
        let first_quality = qualities[&first];
        let second_quality = qualities[&second];
        let first_wins = rng.random::<f64>() < win_probability(first_quality, second_quality);

        let (winner, loser) = if first_wins {
            (first, second)
        } else {
            (second, first)
        };
        manager.apply_outcome(&winner, &loser, args.k)?;
    }

    let stats = manager.stats();
    info!(
        "Applied {} outcomes over {} selections",
        stats.comparisons_applied, stats.pairs_selected
    );

    println!("{:>4}  {:<32} {:>9}  {:>6}", "rank", "item", "rating", "duels");
    for (index, record) in manager
        .ranked_list(args.include_unrated)?
        .iter()
        .enumerate()
    {
        println!(
            "{:>4}  {:<32} {:>9.1}  {:>6}",
            index + 1,
            record.item_id,
            record.rating,
            record.comparisons
        );
    }

    Ok(())
}
