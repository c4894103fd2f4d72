pub mod adlist;

pub use adlist::{Iter, List, Node, NodeId};
