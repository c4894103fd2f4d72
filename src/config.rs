use std::fs::File;
use std::io::Read;

use json_comments::StripComments;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::leaderboard::Backend;
use crate::skiplist::{LevelGenerator, SKIP_LIST_MAX_LEVEL, SKIP_LIST_P};

pub const RANK_CONFIG_JSON: &str = "./rank_config.json";
pub const RANK_CONFIG_TOML: &str = "./rank_config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "skiplist_max_level")]
    pub skiplist_max_level: usize,
    #[serde(default = "skiplist_p")]
    pub skiplist_p: f32,
    /// seeds the skip list level generator; drawn from the OS when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            skiplist_max_level: skiplist_max_level(),
            skiplist_p: skiplist_p(),
            seed: None,
        }
    }
}

impl RankConfig {
    /// Reads `path`, or the default JSON then TOML locations. Any failure
    /// is logged and the defaults are used instead.
    pub fn new(path: Option<&str>) -> Self {
        let candidates: Vec<&str> = match path {
            Some(path) => vec![path],
            None => vec![RANK_CONFIG_JSON, RANK_CONFIG_TOML],
        };
        for candidate in &candidates {
            if File::open(candidate).is_err() {
                continue;
            }
            return match Self::load(candidate) {
                Ok(config) => config,
                Err(e) => {
                    warn!("{e}, use default config");
                    RankConfig::default()
                }
            };
        }
        warn!("Config File: {} Read Fail, Use Default Config.", candidates.join(" | "));
        RankConfig::default()
    }

    /// Strict variant of [`RankConfig::new`]: read, parse and validate
    /// exactly `path`. TOML is tried first, then JSON with comments.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config_string = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut config_string))
            .map_err(|e| ConfigError::Read {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let config = Self::parse(&config_string).map_err(|reason| ConfigError::Parse {
            path: path.to_string(),
            reason,
        })?;
        config.validate()?;
        info!("Config File: {}", path);
        Ok(config)
    }

    pub fn parse(config_string: &str) -> Result<Self, String> {
        if let Ok(config) = toml::from_str(config_string) {
            return Ok(config);
        }
        let stripped = StripComments::new(config_string.as_bytes());
        serde_json::from_reader(stripped).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=SKIP_LIST_MAX_LEVEL).contains(&self.skiplist_max_level) {
            return Err(ConfigError::InvalidMaxLevel(self.skiplist_max_level));
        }
        if !(self.skiplist_p > 0.0 && self.skiplist_p < 1.0) {
            return Err(ConfigError::InvalidProbability(self.skiplist_p));
        }
        Ok(())
    }

    pub fn level_generator(&self) -> LevelGenerator {
        LevelGenerator::new(self.skiplist_max_level, self.skiplist_p, self.seed)
    }
}

fn skiplist_max_level() -> usize { SKIP_LIST_MAX_LEVEL }

fn skiplist_p() -> f32 { SKIP_LIST_P }
