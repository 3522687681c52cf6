//! Breadth first navigation
//!
//! Traversal works on the owned tree directly with an explicit work queue,
//! no parent pointers and no node identity beyond position. Search visits
//! nodes level by level, so the shallowest match wins and a match is found
//! before any of its own descendants.

use std::collections::VecDeque;

use crate::ast::node::Node;

impl Node {
    /// First node in breadth first order satisfying `predicate`.
    /// With `include_self` the search starts at this node, otherwise at
    /// its children.
    pub fn find_first<P>(&self, include_self: bool, predicate: P) -> Option<&Node>
    where
        P: Fn(&Node) -> bool,
    {
        let mut queue: VecDeque<&Node> = VecDeque::new();
        if include_self {
            queue.push_back(self);
        } else {
            queue.extend(self.children());
        }
        while let Some(node) = queue.pop_front() {
            if predicate(node) {
                return Some(node);
            }
            queue.extend(node.children());
        }
        None
    }

    /// Mutable variant of [`Node::find_first`], same visit order
    pub fn find_first_mut<P>(&mut self, include_self: bool, predicate: P) -> Option<&mut Node>
    where
        P: Fn(&Node) -> bool,
    {
        let mut queue: VecDeque<&mut Node> = VecDeque::new();
        if include_self {
            queue.push_back(self);
        } else {
            queue.extend(self.children_mut());
        }
        while let Some(node) = queue.pop_front() {
            if predicate(node) {
                return Some(node);
            }
            queue.extend(node.children_mut());
        }
        None
    }

    /// Visit every node in breadth first order
    pub fn walk_all<V>(&self, include_self: bool, mut visitor: V)
    where
        V: FnMut(&Node),
    {
        let mut queue: VecDeque<&Node> = VecDeque::new();
        if include_self {
            queue.push_back(self);
        } else {
            queue.extend(self.children());
        }
        while let Some(node) = queue.pop_front() {
            visitor(node);
            queue.extend(node.children());
        }
    }
}
