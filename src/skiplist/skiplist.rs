use std::iter::FusedIterator;

use tracing::trace;

use super::lib::LevelGenerator;
use super::SKIP_LIST_MAX_LEVEL;
use crate::leaderboard::Player;

/// Handle of a node stored in a [`SkipList`].
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    player: Player,
    /// forward link per level the node takes part in
    pub(crate) level: Vec<Option<NodeId>>,
}

impl Node {
    fn new(player: Player, height: usize) -> Self {
        Self {
            player,
            level: vec![None; height],
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn height(&self) -> usize {
        self.level.len()
    }

    pub fn forward(&self, level: usize) -> Option<NodeId> {
        self.level.get(level).copied().flatten()
    }
}

/// Skip list of players kept in ranking order (see [`Player::before`]).
///
/// Nodes live in a slab and point at each other by [`NodeId`]. The header
/// carries no player; it is addressed as `None` wherever a predecessor is
/// expected, so `forward(None, i)` is the first node on level `i`.
#[derive(Debug, Clone)]
pub struct SkipList {
    /// header forward links
    head: [Option<NodeId>; SKIP_LIST_MAX_LEVEL],
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    /// number of nodes in skip_list
    length: usize,
    /// level of node with max level
    level: usize,
    level_gen: LevelGenerator,
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

impl SkipList {
    pub fn new() -> Self {
        Self::with_generator(LevelGenerator::default())
    }

    pub fn with_generator(level_gen: LevelGenerator) -> Self {
        Self {
            head: [None; SKIP_LIST_MAX_LEVEL],
            nodes: Vec::new(),
            free: Vec::new(),
            length: 0,
            level: 1,
            level_gen,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Highest level currently occupied, at least 1.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn player(&self, id: NodeId) -> Option<&Player> {
        self.node(id).map(Node::player)
    }

    pub fn first(&self) -> Option<NodeId> {
        self.head[0]
    }

    /// Successor of `at` on `level`; `at == None` reads the header.
    pub(crate) fn forward(&self, at: Option<NodeId>, level: usize) -> Option<NodeId> {
        match at {
            None => self.head.get(level).copied().flatten(),
            Some(id) => self.node(id).and_then(|node| node.forward(level)),
        }
    }

    fn set_forward(&mut self, at: Option<NodeId>, level: usize, to: Option<NodeId>) {
        let slot = match at {
            None => self.head.get_mut(level),
            Some(id) => self
                .nodes
                .get_mut(id)
                .and_then(Option::as_mut)
                .and_then(|node| node.level.get_mut(level)),
        };
        if let Some(slot) = slot {
            *slot = to;
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    pub fn insert(&mut self, player: Player) -> NodeId {
        let mut update: [Option<NodeId>; SKIP_LIST_MAX_LEVEL] = [None; SKIP_LIST_MAX_LEVEL];
        let mut x = None;

        for i in (0..self.level).rev() {
            while let Some(next) = self.forward(x, i) {
                match self.player(next) {
                    Some(p) if p.before(&player) => x = Some(next),
                    _ => break,
                }
            }
            update[i] = x;
        }

        let level = self.level_gen.random_level();
        if level > self.level {
            // the header is the predecessor on every level the list just gained
            for slot in update.iter_mut().take(level).skip(self.level) {
                *slot = None;
            }
            trace!(from = self.level, to = level, "skiplist level raised");
            self.level = level;
        }

        let node = self.alloc(Node::new(player, level));
        for (i, prev) in update.iter().copied().enumerate().take(level) {
            let next = self.forward(prev, i);
            self.set_forward(Some(node), i, next);
            self.set_forward(prev, i, Some(node));
        }
        self.length += 1;
        node
    }

    /// Unlinks `target` from every level and returns its player.
    ///
    /// The descent skips nodes that sort strictly before the target, then
    /// walks across equal-ranked nodes only on levels the target occupies,
    /// so it never overshoots the target on a lower level.
    pub fn delete_node(&mut self, target: NodeId) -> Option<Player> {
        let height = self.node(target)?.height();
        let mut update: [Option<NodeId>; SKIP_LIST_MAX_LEVEL] = [None; SKIP_LIST_MAX_LEVEL];
        let mut x = None;

        {
            let player = self.player(target)?;
            for i in (0..self.level).rev() {
                while let Some(next) = self.forward(x, i) {
                    match self.player(next) {
                        Some(p) if next != target && p.before(player) => x = Some(next),
                        _ => break,
                    }
                }
                if i < height {
                    while let Some(next) = self.forward(x, i) {
                        if next == target {
                            break;
                        }
                        x = Some(next);
                    }
                }
                update[i] = x;
            }
        }

        for (i, prev) in update.iter().copied().enumerate().take(self.level) {
            if self.forward(prev, i) == Some(target) {
                let next = self.forward(Some(target), i);
                self.set_forward(prev, i, next);
            }
        }

        let node = self.nodes.get_mut(target)?.take()?;
        self.free.push(target);
        self.length -= 1;

        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
            trace!(to = self.level, "skiplist level lowered");
        }
        Some(node.player)
    }

    /// Zero-based position of `target` on level 0, found by walking from the
    /// header.
    pub fn position(&self, target: NodeId) -> Option<usize> {
        let mut x = self.first();
        let mut pos = 0;
        while let Some(id) = x {
            if id == target {
                return Some(pos);
            }
            pos += 1;
            x = self.forward(x, 0);
        }
        None
    }

    /// Players in level-0 order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.first(),
            len: self.length,
        }
    }

    /// Players linked on `level`, in order.
    pub fn iter_level(&self, level: usize) -> impl Iterator<Item = &Player> + '_ {
        let mut x = self.forward(None, level);
        std::iter::from_fn(move || {
            let id = x?;
            x = self.forward(Some(id), level);
            self.player(id)
        })
    }
}

pub struct Iter<'a> {
    list: &'a SkipList,
    next: Option<NodeId>,
    len: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Player;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let node = list.node(self.next?)?;
        self.next = node.forward(0);
        self.len = self.len.saturating_sub(1);
        Some(node.player())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a SkipList {
    type Item = &'a Player;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
