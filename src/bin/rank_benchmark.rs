use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use hdrhistogram::Histogram;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rankboard::{new_leaderboard, Backend, Leaderboard, LeaderboardService, RankConfig, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TESTS: [&str; 4] = ["update", "rank", "topn", "range"];

#[derive(Parser, Clone, Debug)]
#[command(name = "rank-benchmark")]
#[command(about = "Compare the linked list and skip list leaderboards under concurrent load", long_about = None)]
struct BenchmarkConfig {
    /// players preloaded before timing starts
    #[arg(short, long, default_value_t = 1000)]
    pub players: usize,
    /// requests issued by each client
    #[arg(short, long, default_value_t = 10000)]
    pub requests: u32,
    #[arg(short, long, default_value_t = 4)]
    pub clients: u32,
    #[arg(short = 'm', long, default_value_t = 1000)]
    pub score_max: i64,
    #[arg(long, default_value_t = 5)]
    pub range: i64,
    #[arg(long, default_value_t = 10)]
    pub top: i64,
    #[arg(long)]
    pub seed: Option<u64>,
    /// rank_config.json / rank_config.toml to read skip list settings from
    #[arg(long)]
    pub config: Option<String>,
    #[arg(short, long, num_args = 1..)]
    pub tests: Vec<String>,
}

fn test_is_selected(tests: &[String], name: &str) -> bool {
    tests.is_empty() || tests.iter().any(|t| t == name)
}

fn player_id(i: usize) -> String {
    format!("player{i}")
}

fn preload(board: &dyn Leaderboard, config: &BenchmarkConfig, rng: &mut StdRng) {
    for i in 0..config.players {
        board.update_score(&player_id(i), rng.random_range(0..config.score_max.max(1)), Instant::now());
    }
}

fn run_client(
    board: Arc<dyn Leaderboard>,
    cmd: &str,
    config: &BenchmarkConfig,
    mut rng: StdRng,
) -> Result<Histogram<u64>> {
    let mut hist = Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3)?;
    let players = config.players.max(1);
    for _ in 0..config.requests {
        let id = player_id(rng.random_range(0..players));
        let st = Instant::now();
        match cmd {
            "update" => board.update_score(&id, rng.random_range(0..config.score_max.max(1)), Instant::now()),
            "rank" => {
                board.get_player_rank(&id);
            }
            "topn" => {
                board.get_top_n(config.top);
            }
            "range" => {
                board.get_player_rank_range(&id, config.range);
            }
            _ => {}
        }
        hist.record((st.elapsed().as_nanos() as u64).max(1))?;
    }
    Ok(hist)
}

async fn benchmark(backend: Backend, cmd: &'static str, rank_config: &RankConfig, config: Arc<BenchmarkConfig>) -> Result<()> {
    let rank_config = RankConfig { backend, ..rank_config.clone() };
    let board: Arc<dyn Leaderboard> = Arc::from(new_leaderboard(&rank_config)?);
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    preload(board.as_ref(), &config, &mut StdRng::seed_from_u64(seed));
    info!(?backend, cmd, players = board.len(), "preloaded");

    let st = Instant::now();
    let mut handles = Vec::with_capacity(config.clients as usize);
    for client in 0..config.clients {
        let board = board.clone();
        let config = config.clone();
        let rng = StdRng::seed_from_u64(seed.wrapping_add(client as u64 + 1));
        handles.push(tokio::task::spawn_blocking(move || run_client(board, cmd, &config, rng)));
    }
    let mut hist = Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3)?;
    for handle in handles {
        hist.add(handle.await??)?;
    }
    let elapsed = st.elapsed().as_secs_f64();
    let total = config.requests as u64 * config.clients as u64;

    println!("======{:?} {}======", backend, cmd.to_uppercase());
    println!(" {} requests completed in {:.3} seconds", total, elapsed);
    println!(" {} parallel clients, {} players", config.clients, board.len());
    println!(" Summary:");
    println!("     Throughput summary: {:.2} requests per second", total as f64 / elapsed.max(f64::EPSILON));
    println!("     Latency summary (ns): ");
    println!("               {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}", "avg", "min", "p50", "p95", "p99", "max");
    println!(
        "               {:>10.0} {:>10} {:>10} {:>10} {:>10} {:>10}",
        hist.mean(),
        hist.min(),
        hist.value_at_quantile(0.5),
        hist.value_at_quantile(0.95),
        hist.value_at_quantile(0.99),
        hist.max()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()?;

    let config = BenchmarkConfig::parse();
    let rank_config = match &config.config {
        Some(path) => RankConfig::load(path)?,
        None => RankConfig::default(),
    };
    let config = Arc::new(config);

    for cmd in TESTS {
        if !test_is_selected(&config.tests, cmd) {
            continue;
        }
        for backend in [Backend::LinkedList, Backend::SkipList] {
            benchmark(backend, cmd, &rank_config, config.clone()).await?;
        }
    }
    Ok(())
}
