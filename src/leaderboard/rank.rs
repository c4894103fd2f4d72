//! Sequential ranking: a player's rank is its 1-based position in ranking
//! order, found by walking the store from its first entry.

use super::{Player, RankInfo};

/// Ordered storage with an id index, the part each backend provides.
pub trait OrderedStore {
    /// Removes any entry for `player.player_id`, then inserts `player` at its
    /// ranking position.
    fn upsert(&mut self, player: Player);

    /// All players in ranking order.
    fn players(&self) -> impl Iterator<Item = &Player> + '_;

    fn lookup(&self, player_id: &str) -> Option<&Player>;

    /// Zero-based position of the player, by walking from the first entry
    /// up to the indexed node.
    fn position(&self, player_id: &str) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Non-negative `n` as a count; negatives give zero.
pub(crate) fn clamp_count(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

/// Inclusive rank window `[max(1, rank - range_n), min(upper, rank + range_n)]`.
pub(crate) fn rank_window(rank: usize, range_n: i64, upper: usize) -> (usize, usize) {
    let range = clamp_count(range_n);
    let start = rank.saturating_sub(range).max(1);
    let end = rank.saturating_add(range).min(upper);
    (start, end)
}

pub fn player_rank<S: OrderedStore>(store: &S, player_id: &str) -> Option<RankInfo> {
    let player = store.lookup(player_id)?;
    let rank = store.position(player_id)? + 1;
    Some(RankInfo::new(player, rank))
}

pub fn top_n<S: OrderedStore>(store: &S, n: i64) -> Vec<RankInfo> {
    store
        .players()
        .take(clamp_count(n))
        .enumerate()
        .map(|(i, p)| RankInfo::new(p, i + 1))
        .collect()
}

pub fn rank_range<S: OrderedStore>(store: &S, player_id: &str, range_n: i64) -> Vec<RankInfo> {
    let Some(rank) = store.position(player_id).map(|pos| pos + 1) else {
        return Vec::new();
    };
    let (start, end) = rank_window(rank, range_n, store.len());

    store
        .players()
        .enumerate()
        .skip(start - 1)
        .take(end + 1 - start)
        .map(|(i, p)| RankInfo::new(p, i + 1))
        .collect()
}
