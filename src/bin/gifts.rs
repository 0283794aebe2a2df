use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use gift_cover::{Problem, Solver, Status, Tracing};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Stardew Valley 1.6 loved gifts, wiki accessed 2024/11/11
const LOVED_GIFTS: &str = include_str!("../../data/loved_gifts.json");

type Favorites = IndexMap<String, Vec<String>>;

/// Find the fewest gifts that make everybody happy.
#[derive(Debug, Parser)]
#[clap(version)]
struct Opt {
    /// JSON object mapping each person to the items they love
    /// (defaults to the built-in table)
    #[clap(long, short, env = "GIFTS_FAVORITES")]
    favorites: Option<PathBuf>,

    /// Do not try combinations of more than this many items
    #[clap(long, env = "GIFTS_MAX_SIZE")]
    max_size: Option<usize>,

    /// Do not start a new combination size after this many seconds
    #[clap(long, env = "GIFTS_TIMEOUT")]
    timeout: Option<u64>,

    /// Print the covers as a JSON array
    #[clap(long)]
    json: bool,

    /// Also log every pruned item (-vv for everything)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    init_logging(opt.verbose);

    let favorites = load(opt.favorites.as_deref())?;
    let problem = Problem::new(favorites).context("Invalid favorites table")?;
    tracing::info!(
        people = problem.people().len(),
        items = problem.items().len(),
        "loaded favorites"
    );

    let deadline = opt.timeout.map(|secs| Instant::now() + Duration::from_secs(secs));
    let max_size = opt.max_size;
    let solution = Solver::new(&problem)
        .with_diagnostics(Tracing)
        .with_cancel(move |size| {
            let too_large = max_size.is_some_and(|max| size > max);
            let too_late = deadline.is_some_and(|deadline| Instant::now() >= deadline);
            if too_large || too_late {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .solve();

    if let Status::Cancelled { size } = solution.status {
        tracing::warn!(
            uncovered = solution.near_cover.uncovered,
            "no exact cover below {size} items, reporting the best near covers"
        );
    }
    let covers = solution.into_covers();
    for cover in covers.iter().filter(|cover| !problem.is_cover(cover)) {
        tracing::error!(cover = %cover.iter().join(", "), "result does not satisfy everyone");
    }

    if opt.json {
        let covers: Vec<Vec<String>> = covers
            .iter()
            .map(|cover| cover.iter().map(ToString::to_string).collect())
            .collect();
        println!("{}", serde_json::to_string_pretty(&covers)?);
    } else {
        for cover in &covers {
            println!("{}", cover.iter().join(", "));
        }
    }
    Ok(())
}

fn load(path: Option<&Path>) -> Result<Favorites> {
    let Some(path) = path else {
        return serde_json::from_str(LOVED_GIFTS).context("Built-in favorites table is malformed");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read favorites from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse favorites in {}", path.display()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}
