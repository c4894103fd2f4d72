pub mod lib;
pub mod skiplist;
#[cfg(test)]
mod test;

pub use lib::LevelGenerator;
pub use skiplist::{Iter, Node, NodeId, SkipList};

/// Width of the header node, and the tallest height a node can draw.
pub const SKIP_LIST_MAX_LEVEL: usize = 16;
/// Chance that a node is promoted one more level.
pub const SKIP_LIST_P: f32 = 0.25;
