//! Score leaderboards answering rank, top-N and neighbourhood queries.
//!
//! Two interchangeable backends implement [`LeaderboardService`]:
//!
//! - [`LinkedListLeaderboard`] - sorted doubly linked list, O(n) updates
//! - [`SkipListLeaderboard`] - skip list, expected O(log n) updates
//!
//! Both keep players ordered by score descending, earlier timestamp first on
//! equal scores, and report sequential ranks (every player distinct) or
//! dense ranks (equal scores share a rank, see [`DenseRankService`]).

use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::RankConfig;
use crate::error::ConfigError;

pub mod dense_rank;
pub mod linked_list;
pub mod rank;
pub mod skip_list;

pub use linked_list::{LinkedListLeaderboard, ListSet};
pub use rank::OrderedStore;
pub use skip_list::{SkipListLeaderboard, ZSet};

/// One participant's current standing. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub player_id: String,
    pub score: i64,
    /// when the score was reached; earlier wins a tie
    pub timestamp: Instant,
}

impl Player {
    pub fn new(player_id: impl Into<String>, score: i64, timestamp: Instant) -> Self {
        Self {
            player_id: player_id.into(),
            score,
            timestamp,
        }
    }

    /// Ranking order: higher score first, then earlier timestamp. Players
    /// with equal score and timestamp are unordered.
    #[inline]
    pub fn before(&self, other: &Player) -> bool {
        self.score > other.score || (self.score == other.score && self.timestamp < other.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankInfo {
    pub player_id: String,
    pub score: i64,
    /// 1-based
    pub rank: usize,
}

impl RankInfo {
    pub fn new(player: &Player, rank: usize) -> Self {
        Self {
            player_id: player.player_id.clone(),
            score: player.score,
            rank,
        }
    }
}

/// Sequential-rank queries. Every player holds a distinct rank equal to its
/// 1-based position in ranking order.
pub trait LeaderboardService {
    /// Inserts the player or replaces its score and timestamp.
    fn update_score(&self, player_id: &str, score: i64, timestamp: Instant);

    fn get_player_rank(&self, player_id: &str) -> Option<RankInfo>;

    /// The first `n` players; empty when `n <= 0`.
    fn get_top_n(&self, n: i64) -> Vec<RankInfo>;

    /// Players ranked within `range_n` places of `player_id`, inclusive.
    /// Empty when the player is unknown; negative `range_n` acts as zero.
    fn get_player_rank_range(&self, player_id: &str, range_n: i64) -> Vec<RankInfo>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, player_id: &str) -> bool;

    /// Snapshot of all players in ranking order.
    fn entries(&self) -> Vec<Player>;
}

/// Dense-rank queries: equal scores share a rank and the next distinct
/// score ranks exactly one lower.
pub trait DenseRankService {
    fn get_dense_player_rank(&self, player_id: &str) -> Option<RankInfo>;

    fn get_dense_top_n(&self, n: i64) -> Vec<RankInfo>;

    /// Players whose dense rank lies within `range_n` of the target's dense
    /// rank. Tie groups are never split, so the result may hold more or
    /// fewer than `2 * range_n + 1` players.
    fn get_dense_player_rank_range(&self, player_id: &str, range_n: i64) -> Vec<RankInfo>;
}

pub trait Leaderboard: LeaderboardService + DenseRankService + Send + Sync {}

impl<T: LeaderboardService + DenseRankService + Send + Sync> Leaderboard for T {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    LinkedList,
    #[default]
    SkipList,
}

/// Builds the backend selected by `config`.
pub fn new_leaderboard(config: &RankConfig) -> Result<Box<dyn Leaderboard>, ConfigError> {
    config.validate()?;
    let board: Box<dyn Leaderboard> = match config.backend {
        Backend::LinkedList => Box::new(LinkedListLeaderboard::new()),
        Backend::SkipList => Box::new(SkipListLeaderboard::with_generator(config.level_generator())),
    };
    Ok(board)
}

/// A store behind one reader-writer lock. Updates hold it exclusively for
/// the whole remove-and-insert; every query holds it shared for its whole
/// traversal.
#[derive(Debug, Default)]
pub struct RankBoard<S> {
    inner: RwLock<S>,
}

impl<S: OrderedStore> RankBoard<S> {
    pub fn from_store(store: S) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

impl<S: OrderedStore> LeaderboardService for RankBoard<S> {
    fn update_score(&self, player_id: &str, score: i64, timestamp: Instant) {
        self.inner
            .write()
            .upsert(Player::new(player_id, score, timestamp));
    }

    fn get_player_rank(&self, player_id: &str) -> Option<RankInfo> {
        rank::player_rank(&*self.inner.read(), player_id)
    }

    fn get_top_n(&self, n: i64) -> Vec<RankInfo> {
        rank::top_n(&*self.inner.read(), n)
    }

    fn get_player_rank_range(&self, player_id: &str, range_n: i64) -> Vec<RankInfo> {
        rank::rank_range(&*self.inner.read(), player_id, range_n)
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn contains(&self, player_id: &str) -> bool {
        self.inner.read().lookup(player_id).is_some()
    }

    fn entries(&self) -> Vec<Player> {
        self.inner.read().players().cloned().collect()
    }
}

impl<S: OrderedStore> DenseRankService for RankBoard<S> {
    fn get_dense_player_rank(&self, player_id: &str) -> Option<RankInfo> {
        dense_rank::dense_player_rank(&*self.inner.read(), player_id)
    }

    fn get_dense_top_n(&self, n: i64) -> Vec<RankInfo> {
        dense_rank::dense_top_n(&*self.inner.read(), n)
    }

    fn get_dense_player_rank_range(&self, player_id: &str, range_n: i64) -> Vec<RankInfo> {
        dense_rank::dense_rank_range(&*self.inner.read(), player_id, range_n)
    }
}
