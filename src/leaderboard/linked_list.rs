use std::collections::HashMap;

use tracing::debug;

use super::rank::OrderedStore;
use super::{Player, RankBoard};
use crate::adlist::{List, NodeId};

/// Leaderboard over a sorted doubly linked list. Updates scan from the head
/// for the insertion point, so they cost O(n).
pub type LinkedListLeaderboard = RankBoard<ListSet>;

impl LinkedListLeaderboard {
    pub fn new() -> Self {
        RankBoard::from_store(ListSet::new())
    }
}

/// Players in ranking order plus an id index onto their list nodes.
#[derive(Debug, Default, Clone)]
pub struct ListSet {
    dict: HashMap<String, NodeId>,
    list: List<Player>,
}

impl ListSet {
    pub fn new() -> Self {
        Self {
            dict: HashMap::new(),
            list: List::create(),
        }
    }
}

impl OrderedStore for ListSet {
    fn upsert(&mut self, player: Player) {
        if let Some(node) = self.dict.remove(&player.player_id) {
            if let Some(old) = self.list.delete_node(node) {
                debug!(player = %old.player_id, old_score = old.score, new_score = player.score, "replacing list entry");
            }
        }

        // stop at the first player the new one does not rank behind
        let mut at = self.list.first();
        while let Some(id) = at {
            match self.list.node(id) {
                Some(node) if node.value().before(&player) => at = node.next_node(),
                _ => break,
            }
        }

        let player_id = player.player_id.clone();
        let node = self.list.insert_before(at, player);
        self.dict.insert(player_id, node);
    }

    fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.list.iter()
    }

    fn lookup(&self, player_id: &str) -> Option<&Player> {
        self.dict.get(player_id).and_then(|&node| self.list.value(node))
    }

    fn position(&self, player_id: &str) -> Option<usize> {
        self.dict.get(player_id).and_then(|&node| self.list.position(node))
    }

    fn len(&self) -> usize {
        self.list.length()
    }
}
