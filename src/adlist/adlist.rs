use std::iter::FusedIterator;

/// Handle of a node stored in a [`List`].
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn prev_node(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_node(&self) -> Option<NodeId> {
        self.next
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Doubly linked list whose nodes live in a slab and link to each other
/// through [`NodeId`] handles. Freed slots are recycled by later inserts.
#[derive(Debug, Clone)]
pub struct List<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::create()
    }
}

impl<T> List<T> {
    pub fn create() -> List<T> {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(Node::value)
    }

    pub fn first(&self) -> Option<NodeId> {
        self.head
    }

    pub fn last(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn add_node_head(&mut self, elem: T) -> NodeId {
        let head = self.head;
        self.insert_before(head, elem)
    }

    pub fn add_node_tail(&mut self, elem: T) -> NodeId {
        self.insert_before(None, elem)
    }

    /// Links `elem` in front of `at`. `None`, or a handle that is no longer
    /// live, appends at the tail.
    pub fn insert_before(&mut self, at: Option<NodeId>, elem: T) -> NodeId {
        let at = at.filter(|&id| self.node(id).is_some());
        let prev = match at {
            Some(id) => self.node(id).and_then(Node::prev_node),
            None => self.tail,
        };
        let new_node = self.alloc(Node {
            value: elem,
            prev,
            next: at,
        });

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = Some(new_node);
                }
            }
            None => self.head = Some(new_node),
        }
        match at {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = Some(new_node);
                }
            }
            None => self.tail = Some(new_node),
        }
        self.len += 1;
        new_node
    }

    /// Unlinks the node and hands back its value. The handle becomes free
    /// for reuse.
    pub fn delete_node(&mut self, id: NodeId) -> Option<T> {
        let node = self.nodes.get_mut(id)?.take()?;

        match node.prev {
            Some(p) => {
                if let Some(prev) = self.node_mut(p) {
                    prev.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => {
                if let Some(next) = self.node_mut(n) {
                    next.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        self.free.push(id);
        self.len -= 1;
        Some(node.value)
    }

    /// Negative indexes count from the tail, `-1` being the last node.
    pub fn index(&self, mut index: i64) -> Option<NodeId> {
        if index < 0 {
            index = (-index) - 1;
            let mut cur = self.tail;
            while let Some(id) = cur {
                if index == 0 {
                    break;
                }
                cur = self.node(id).and_then(Node::prev_node);
                index -= 1;
            }
            cur
        } else {
            let mut cur = self.head;
            while let Some(id) = cur {
                if index == 0 {
                    break;
                }
                cur = self.node(id).and_then(Node::next_node);
                index -= 1;
            }
            cur
        }
    }

    /// Zero-based distance of `id` from the head, found by walking forward.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let mut cur = self.head;
        let mut pos = 0;
        while let Some(node) = cur {
            if node == id {
                return Some(pos);
            }
            pos += 1;
            cur = self.node(node).and_then(Node::next_node);
        }
        None
    }

    pub fn length(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn empty(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a List<T>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let list = self.list;
        let node = list.node(self.head?)?;
        self.len -= 1;
        self.head = node.next;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let list = self.list;
        let node = list.node(self.tail?)?;
        self.len -= 1;
        self.tail = node.prev;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
