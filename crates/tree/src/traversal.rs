//! Walking and searching a built forest

use std::collections::VecDeque;

use derive_more::Display;

use crate::node::Node;

/// Traversal order for walking a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    #[display(fmt = "pre-order")]
    PreOrder,
    /// Visit children before parent (bottom-up)
    #[display(fmt = "post-order")]
    PostOrder,
    /// Visit level by level
    #[display(fmt = "breadth-first")]
    BreadthFirst,
}

/// Iterator over the nodes of a forest, yielding each node with its depth
///
/// Roots have depth 0. Siblings are always visited in their stored order.
pub struct ForestWalker<'a, R> {
    order: TraversalOrder,
    /// Pre-order and post-order stack; the flag marks an expanded node
    stack: Vec<(&'a Node<R>, usize, bool)>,
    queue: VecDeque<(&'a Node<R>, usize)>,
}

impl<'a, R> ForestWalker<'a, R> {
    /// Create a walker over the given roots
    pub fn new(roots: &'a [Node<R>], order: TraversalOrder) -> Self {
        let mut walker = Self {
            order,
            stack: Vec::new(),
            queue: VecDeque::new(),
        };
        match order {
            TraversalOrder::BreadthFirst => walker.queue.extend(roots.iter().map(|n| (n, 0))),
            _ => walker
                .stack
                .extend(roots.iter().rev().map(|n| (n, 0, false))),
        }
        walker
    }

    fn next_preorder(&mut self) -> Option<(&'a Node<R>, usize)> {
        let (current, depth, _) = self.stack.pop()?;

        // Push children in reverse so they pop in stored order
        for child in current.children.iter().rev() {
            self.stack.push((child, depth + 1, false));
        }

        Some((current, depth))
    }

    fn next_postorder(&mut self) -> Option<(&'a Node<R>, usize)> {
        while let Some((current, depth, expanded)) = self.stack.pop() {
            if expanded || current.is_leaf() {
                return Some((current, depth));
            }

            self.stack.push((current, depth, true));
            for child in current.children.iter().rev() {
                self.stack.push((child, depth + 1, false));
            }
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<(&'a Node<R>, usize)> {
        let (current, depth) = self.queue.pop_front()?;
        self.queue
            .extend(current.children.iter().map(|child| (child, depth + 1)));
        Some((current, depth))
    }
}

impl<'a, R> Iterator for ForestWalker<'a, R> {
    type Item = (&'a Node<R>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}

/// Walk every node of a forest in the given order
pub fn walk<R>(forest: &[Node<R>], order: TraversalOrder) -> ForestWalker<'_, R> {
    ForestWalker::new(forest, order)
}

/// Records of every node matching a predicate, in pre-order
pub fn find<'a, R, F>(forest: &'a [Node<R>], predicate: F) -> Vec<&'a R>
where
    F: Fn(&R) -> bool,
{
    walk(forest, TraversalOrder::PreOrder)
        .map(|(node, _)| &node.record)
        .filter(|record| predicate(*record))
        .collect()
}

impl<R> Node<R> {
    /// Walk this subtree, starting at this node with depth 0
    pub fn walk(&self, order: TraversalOrder) -> ForestWalker<'_, R> {
        ForestWalker::new(std::slice::from_ref(self), order)
    }
}
