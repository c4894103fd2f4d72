pub mod adlist;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod skiplist;

pub use config::RankConfig;
pub use error::ConfigError;
pub use leaderboard::{
    new_leaderboard, Backend, DenseRankService, Leaderboard, LeaderboardService,
    LinkedListLeaderboard, Player, RankInfo, SkipListLeaderboard,
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
