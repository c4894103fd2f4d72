use std::collections::HashMap;

use tracing::{debug, trace};

use super::rank::OrderedStore;
use super::{Player, RankBoard};
use crate::skiplist::{LevelGenerator, NodeId, SkipList};

/// Leaderboard over a skip list. Updates take expected O(log n); rank
/// queries still walk level 0 because the links carry no spans.
pub type SkipListLeaderboard = RankBoard<ZSet>;

impl SkipListLeaderboard {
    pub fn new() -> Self {
        RankBoard::from_store(ZSet::new())
    }

    /// Node heights come from a generator seeded with `seed`, so the same
    /// updates always build the same list.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(LevelGenerator::with_seed(seed))
    }

    pub fn with_generator(level_gen: LevelGenerator) -> Self {
        RankBoard::from_store(ZSet::with_generator(level_gen))
    }
}

/// Players in a skip list plus an id index onto their nodes.
#[derive(Debug, Default, Clone)]
pub struct ZSet {
    dict: HashMap<String, NodeId>,
    zsl: SkipList,
}

impl ZSet {
    pub fn new() -> Self {
        Self::with_generator(LevelGenerator::default())
    }

    pub fn with_generator(level_gen: LevelGenerator) -> Self {
        Self {
            dict: HashMap::new(),
            zsl: SkipList::with_generator(level_gen),
        }
    }

    pub fn skiplist(&self) -> &SkipList {
        &self.zsl
    }
}

impl OrderedStore for ZSet {
    fn upsert(&mut self, player: Player) {
        if let Some(node) = self.dict.remove(&player.player_id) {
            if let Some(old) = self.zsl.delete_node(node) {
                debug!(player = %old.player_id, old_score = old.score, new_score = player.score, "replacing skiplist entry");
            }
        }

        let player_id = player.player_id.clone();
        let node = self.zsl.insert(player);
        trace!(player = %player_id, node, level = self.zsl.level(), "skiplist insert");
        self.dict.insert(player_id, node);
    }

    fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.zsl.iter()
    }

    fn lookup(&self, player_id: &str) -> Option<&Player> {
        self.dict.get(player_id).and_then(|&node| self.zsl.player(node))
    }

    fn position(&self, player_id: &str) -> Option<usize> {
        self.dict.get(player_id).and_then(|&node| self.zsl.position(node))
    }

    fn len(&self) -> usize {
        self.zsl.len()
    }
}
