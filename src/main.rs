use std::time::{Duration, Instant};

use rankboard::{DenseRankService, LeaderboardService, LinkedListLeaderboard, RankConfig, RankInfo, SkipListLeaderboard};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn report(name: &str, linked_list: &[RankInfo], skip_list: &[RankInfo]) -> rankboard::Result<()> {
    if linked_list == skip_list {
        info!("{name} agree: {}", serde_json::to_string(linked_list)?);
    } else {
        warn!(
            "{name} disagree: linkedlist {}, skiplist {}",
            serde_json::to_string(linked_list)?,
            serde_json::to_string(skip_list)?
        );
    }
    Ok(())
}

fn main() -> rankboard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()?;

    let config = RankConfig::new(None);
    let linked_list = LinkedListLeaderboard::new();
    let skip_list = SkipListLeaderboard::with_generator(config.level_generator());

    let now = Instant::now();
    let hour_ago = now.checked_sub(Duration::from_secs(3600)).unwrap_or(now);
    let test_data = [
        ("player1", 100, hour_ago),
        ("player2", 90, now),
        ("player3", 100, now),
        ("player4", 80, now),
    ];
    for (player_id, score, timestamp) in test_data {
        linked_list.update_score(player_id, score, timestamp);
        skip_list.update_score(player_id, score, timestamp);
    }

    let player_id = "player2";
    let ranks: Vec<RankInfo> = linked_list.get_player_rank(player_id).into_iter().collect();
    let skip_ranks: Vec<RankInfo> = skip_list.get_player_rank(player_id).into_iter().collect();
    report("GetPlayerRank", &ranks, &skip_ranks)?;

    let n = 2;
    report("GetTopN", &linked_list.get_top_n(n), &skip_list.get_top_n(n))?;

    let range_n = 1;
    report(
        "GetPlayerRankRange",
        &linked_list.get_player_rank_range(player_id, range_n),
        &skip_list.get_player_rank_range(player_id, range_n),
    )?;

    report(
        "GetDenseTopN",
        &linked_list.get_dense_top_n(test_data.len() as i64),
        &skip_list.get_dense_top_n(test_data.len() as i64),
    )?;
    Ok(())
}
