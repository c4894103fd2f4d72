//! Dense ranking: players with equal scores share a rank regardless of
//! timestamp, and each new distinct score advances the rank by one.

use super::rank::{clamp_count, rank_window, OrderedStore};
use super::{Player, RankInfo};

/// Tags each player of an ordered sequence with its dense rank.
pub struct DenseRanks<I> {
    players: I,
    current_rank: usize,
    previous_score: Option<i64>,
}

impl<I> DenseRanks<I> {
    pub fn new(players: I) -> Self {
        Self {
            players,
            current_rank: 0,
            previous_score: None,
        }
    }
}

impl<'a, I: Iterator<Item = &'a Player>> Iterator for DenseRanks<I> {
    type Item = (&'a Player, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let player = self.players.next()?;
        if self.previous_score != Some(player.score) {
            self.current_rank += 1;
            self.previous_score = Some(player.score);
        }
        Some((player, self.current_rank))
    }
}

pub fn dense_player_rank<S: OrderedStore>(store: &S, player_id: &str) -> Option<RankInfo> {
    store.lookup(player_id)?;
    DenseRanks::new(store.players())
        .find(|(p, _)| p.player_id == player_id)
        .map(|(p, rank)| RankInfo::new(p, rank))
}

pub fn dense_top_n<S: OrderedStore>(store: &S, n: i64) -> Vec<RankInfo> {
    DenseRanks::new(store.players())
        .take(clamp_count(n))
        .map(|(p, rank)| RankInfo::new(p, rank))
        .collect()
}

pub fn dense_rank_range<S: OrderedStore>(store: &S, player_id: &str, range_n: i64) -> Vec<RankInfo> {
    if store.lookup(player_id).is_none() {
        return Vec::new();
    }
    let ranked: Vec<(&Player, usize)> = DenseRanks::new(store.players()).collect();
    let Some(current) = ranked
        .iter()
        .find(|(p, _)| p.player_id == player_id)
        .map(|&(_, rank)| rank)
    else {
        return Vec::new();
    };
    let max_rank = ranked.last().map_or(0, |&(_, rank)| rank);
    let (start, end) = rank_window(current, range_n, max_rank);

    ranked
        .into_iter()
        .filter(|&(_, rank)| rank >= start && rank <= end)
        .map(|(p, rank)| RankInfo::new(p, rank))
        .collect()
}
