//! Owned tree nodes produced by the builder

use std::fmt;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A record together with the children attached to it
///
/// Children are owned exclusively by their parent, and the roots of a forest
/// are owned by the `Vec<Node<R>>` returned from the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<R> {
    /// The source record, moved in from the input
    pub record: R,
    /// Child nodes in order of attachment
    pub children: Children<R>,
}

/// Ordered child list of a [`Node`]
///
/// Derefs to `Vec<Node<R>>`. Dropping it frees the whole subtree with an
/// explicit stack, so arbitrarily deep chains are released without
/// recursing once per level.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Children<R>(Vec<Node<R>>);

impl<R> Children<R> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Take the nodes out, leaving this list empty
    pub fn into_vec(mut self) -> Vec<Node<R>> {
        std::mem::take(&mut self.0)
    }
}

impl<R> Default for Children<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Drop for Children<R> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.0);
        while let Some(mut node) = stack.pop() {
            // `node` goes out of scope with an empty child list
            stack.append(&mut node.children.0);
        }
    }
}

impl<R> Deref for Children<R> {
    type Target = Vec<Node<R>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<R> DerefMut for Children<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<R> From<Vec<Node<R>>> for Children<R> {
    fn from(nodes: Vec<Node<R>>) -> Self {
        Self(nodes)
    }
}

impl<R> FromIterator<Node<R>> for Children<R> {
    fn from_iter<I: IntoIterator<Item = Node<R>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<R> IntoIterator for Children<R> {
    type Item = Node<R>;
    type IntoIter = std::vec::IntoIter<Node<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Children<R> {
    type Item = &'a Node<R>;
    type IntoIter = std::slice::Iter<'a, Node<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<R: fmt::Debug> fmt::Debug for Children<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<R> Node<R> {
    /// Create a node without children
    pub fn new(record: R) -> Self {
        Self {
            record,
            children: Children::new(),
        }
    }

    /// Create a node with the given children
    pub fn with_children(record: R, children: Vec<Node<R>>) -> Self {
        Self {
            record,
            children: children.into(),
        }
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in this subtree, including this one
    pub fn size(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }

    /// Height of this subtree (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Map every record in this subtree, keeping the shape
    ///
    /// Records are visited in pre-order.
    pub fn map<T, F>(self, mut f: F) -> Node<T>
    where
        F: FnMut(R) -> T,
    {
        let Node { record, children } = self;
        let root = f(record);

        // Mapped records in pre-order with the position of their parent;
        // position 0 is the root.
        let mut mapped: Vec<(T, usize)> = Vec::new();
        let mut stack: Vec<(Node<R>, usize)> =
            children.into_iter().rev().map(|child| (child, 0)).collect();
        while let Some((node, parent)) = stack.pop() {
            let Node { record, children } = node;
            mapped.push((f(record), parent));
            let position = mapped.len();
            stack.extend(children.into_iter().rev().map(|child| (child, position)));
        }

        // Rebuild from the back so every child is finished before its parent
        let mut built: Vec<Vec<Node<T>>> = std::iter::repeat_with(Vec::new)
            .take(mapped.len() + 1)
            .collect();
        while let Some((record, parent)) = mapped.pop() {
            let mut children = std::mem::take(&mut built[mapped.len() + 1]);
            children.reverse();
            built[parent].push(Node::with_children(record, children));
        }

        let mut children = std::mem::take(&mut built[0]);
        children.reverse();
        Node::with_children(root, children)
    }

    /// Consume the node and return its record, discarding the children
    pub fn into_record(self) -> R {
        self.record
    }
}

impl<R: fmt::Display> fmt::Display for Node<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} children)", self.record, self.children.len())
    }
}

/// Total number of nodes in a forest
pub fn count<R>(forest: &[Node<R>]) -> usize {
    forest.iter().map(Node::size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<&'static str> {
        Node::with_children(
            "root",
            vec![
                Node::with_children("a", vec![Node::new("a1"), Node::new("a2")]),
                Node::new("b"),
            ],
        )
    }

    #[test]
    fn test_node_leaf() {
        let node = Node::new(42);
        assert!(node.is_leaf());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.size(), 1);
        assert_eq!(node.depth(), 0);
    }

    #[test]
    fn test_node_size_and_depth() {
        let tree = sample();
        assert!(!tree.is_leaf());
        assert_eq!(tree.child_count(), 2);
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_node_map_keeps_shape() {
        let mapped = sample().map(str::len);
        assert_eq!(mapped.record, 4);
        assert_eq!(mapped.children[0].children[1].record, 2);
        assert_eq!(mapped.size(), 5);
        assert_eq!(
            format!("{:?}", mapped.children[1]),
            "Node { record: 1, children: [] }"
        );
    }

    #[test]
    fn test_forest_count() {
        let forest = vec![sample(), Node::new("lonely")];
        assert_eq!(count(&forest), 6);
        assert_eq!(count::<&str>(&[]), 0);
    }

    fn chain(depth: u32) -> Node<u32> {
        let mut node = Node::new(depth);
        for id in (1..depth).rev() {
            node = Node::with_children(id, vec![node]);
        }
        node
    }

    #[test]
    fn test_deep_chain_map_and_drop() {
        let tree = chain(200_000).map(|id| id * 2);
        assert_eq!(tree.record, 2);
        assert_eq!(tree.size(), 200_000);
        assert_eq!(tree.depth(), 199_999);
        drop(tree);
    }

    #[test]
    fn test_children_list() {
        let mut tree = Node::new("root");
        tree.children.push(Node::new("a"));
        tree.children.extend(vec![Node::new("b")]);
        assert_eq!(tree.child_count(), 2);

        let names: Vec<_> = tree.children.into_iter().map(Node::into_record).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_node_display() {
        assert_eq!(sample().to_string(), "root (2 children)");
    }
}
