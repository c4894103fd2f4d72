#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("[Config] skiplist_max_level must be within 1..={max}, got {0}", max = crate::skiplist::SKIP_LIST_MAX_LEVEL)]
    InvalidMaxLevel(usize),
    #[error("[Config] skiplist_p must be within (0, 1), got {0}")]
    InvalidProbability(f32),
    #[error("[Config] read {path} fail: {reason}")]
    Read { path: String, reason: String },
    #[error("[Config] parse {path} fail: {reason}")]
    Parse { path: String, reason: String },
}
