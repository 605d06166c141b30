//! Single-pass reconstruction of a forest from flat parent/child records
//!
//! Records may arrive in any order. A child whose parent has not been seen
//! yet is parked in a pending queue keyed by the parent's identifier and is
//! adopted, in arrival order, once that parent shows up.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::node::{count, Node};

type Queue = SmallVec<[usize; 4]>;

/// A flat record that knows its own identifier and its parent's
pub trait Record {
    type Key: Eq + Hash + Clone + fmt::Debug;

    /// The record's own identifier
    fn id(&self) -> Self::Key;

    /// The parent's identifier, or `None` for a root
    fn parent_id(&self) -> Option<Self::Key>;
}

/// Arena entry used while the pass is running
#[derive(Debug)]
struct Slot<R> {
    record: Option<R>,
    children: Queue,
}

/// A subtree whose parent identifier never appeared in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan<K, R> {
    /// The identifier the subtree root was waiting for
    pub missing_parent: K,
    /// The detached subtree
    pub node: Node<R>,
}

/// Everything a build produced, including what did not make it into the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport<K, R> {
    /// Root nodes in input order
    pub forest: Vec<Node<R>>,
    /// Subtrees dropped because their parent never resolved
    pub orphans: Vec<Orphan<K, R>>,
    /// Identifiers that were registered more than once, in order of the repeat
    pub duplicate_ids: Vec<K>,
    /// Nodes lost to parent cycles, reachable from neither forest nor orphans
    pub detached: usize,
}

impl<K, R> BuildReport<K, R> {
    /// Number of nodes in the forest
    pub fn node_count(&self) -> usize {
        count(&self.forest)
    }

    /// Number of records in orphaned subtrees
    pub fn orphaned(&self) -> usize {
        self.orphans.iter().map(|o| o.node.size()).sum()
    }

    /// Number of input records that are not part of the forest
    pub fn dropped(&self) -> usize {
        self.orphaned() + self.detached
    }

    /// True if every record landed in the forest
    pub fn is_complete(&self) -> bool {
        self.dropped() == 0
    }
}

/// Streaming forest builder
///
/// Feed records with [`TreeBuilder::push`] and collect the forest with
/// [`TreeBuilder::finish`]. All bookkeeping is owned by the builder and
/// released when it is consumed.
///
/// # Example
///
/// ```
/// use flat_tree::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// builder.push(2, Some(1), "child");
/// builder.push(1, None, "root");
///
/// let forest = builder.finish();
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].record, "root");
/// assert_eq!(forest[0].children[0].record, "child");
/// ```
#[derive(Debug)]
pub struct TreeBuilder<K, R> {
    /// Arena storage, one slot per pushed record
    slots: Vec<Slot<R>>,
    /// Indices of root nodes in input order
    roots: Vec<usize>,
    /// Identifier -> slot of the node constructed for it
    resolved: HashMap<K, usize>,
    /// Parent identifier -> children waiting for that parent
    pending: HashMap<K, Queue>,
    /// Order in which pending queues were opened
    pending_order: Vec<K>,
    duplicate_ids: Vec<K>,
}

impl<K, R> Default for TreeBuilder<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> TreeBuilder<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create an empty builder
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a builder sized for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            roots: Vec::new(),
            resolved: HashMap::with_capacity(capacity),
            pending: HashMap::new(),
            pending_order: Vec::new(),
            duplicate_ids: Vec::new(),
        }
    }

    /// Number of records pushed so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of children currently waiting for a parent
    pub fn pending_count(&self) -> usize {
        self.pending.values().map(|queue| queue.len()).sum()
    }

    /// Add one record to the forest under construction
    ///
    /// The new node adopts every child already waiting for `id`. It then
    /// becomes a root (`parent_id` is `None`), joins an already constructed
    /// parent, or waits in the pending queue for `parent_id`.
    pub fn push(&mut self, id: K, parent_id: Option<K>, record: R) {
        let index = self.slots.len();
        let children = self.pending.remove(&id).unwrap_or_default();
        self.slots.push(Slot {
            record: Some(record),
            children,
        });

        if self.resolved.insert(id.clone(), index).is_some() {
            debug!("Duplicate id {:?}: later record takes over the identity slot", id);
            self.duplicate_ids.push(id.clone());
        }

        let Some(parent_id) = parent_id else {
            self.roots.push(index);
            return;
        };

        // A node is never its own parent; it waits for an id that cannot arrive first.
        let parent = if parent_id == id {
            None
        } else {
            self.resolved.get(&parent_id).copied()
        };

        match parent {
            Some(parent) => self.slots[parent].children.push(index),
            None => {
                trace!("Deferring {:?} until parent {:?} arrives", id, parent_id);
                self.defer(parent_id, index);
            }
        }
    }

    fn defer(&mut self, parent_id: K, index: usize) {
        match self.pending.entry(parent_id) {
            Entry::Occupied(mut entry) => entry.get_mut().push(index),
            Entry::Vacant(entry) => {
                self.pending_order.push(entry.key().clone());
                entry.insert(Queue::from_elem(index, 1));
            }
        }
    }

    /// Consume the builder and return the forest
    ///
    /// Children whose parent never arrived are not part of the result.
    pub fn finish(self) -> Vec<Node<R>> {
        self.finish_with_report().forest
    }

    /// Consume the builder and return the forest along with what was dropped
    pub fn finish_with_report(self) -> BuildReport<K, R> {
        let TreeBuilder {
            mut slots,
            roots,
            mut pending,
            pending_order,
            duplicate_ids,
            ..
        } = self;

        let total = slots.len();
        let mut starts = roots.clone();
        let mut waiting = Vec::new();
        for key in pending_order {
            if let Some(queue) = pending.remove(&key) {
                starts.extend(queue.iter().copied());
                waiting.push((key, queue));
            }
        }

        let mut built = materialize(&mut slots, &starts);

        let forest: Vec<Node<R>> = roots.iter().filter_map(|&i| built[i].take()).collect();
        let mut orphans = Vec::new();
        for (key, queue) in waiting {
            for index in queue {
                if let Some(node) = built[index].take() {
                    orphans.push(Orphan {
                        missing_parent: key.clone(),
                        node,
                    });
                }
            }
        }

        let mut report = BuildReport {
            forest,
            orphans,
            duplicate_ids,
            detached: 0,
        };
        report.detached = total - report.node_count() - report.orphaned();

        debug!(
            "Built forest: {} records, {} roots, {} orphaned subtrees, {} detached",
            total,
            report.forest.len(),
            report.orphans.len(),
            report.detached
        );
        if !report.orphans.is_empty() {
            warn!(
                "{} records dropped from the forest: parent ids never resolved",
                report.orphaned()
            );
        }
        if report.detached > 0 {
            warn!(
                "{} records dropped from the forest: caught in parent cycles",
                report.detached
            );
        }

        report
    }
}

impl<R: Record> Extend<R> for TreeBuilder<R::Key, R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, records: I) {
        for record in records {
            let id = record.id();
            let parent_id = record.parent_id();
            self.push(id, parent_id, record);
        }
    }
}

/// Turn the subtrees rooted at `starts` into owned nodes
///
/// Returns one entry per slot; entries reachable from `starts` are `Some`.
/// Works bottom-up over a pre-order listing so deep chains never recurse.
fn materialize<R>(slots: &mut [Slot<R>], starts: &[usize]) -> Vec<Option<Node<R>>> {
    let mut visited = vec![false; slots.len()];
    let mut order = Vec::with_capacity(slots.len());
    let mut stack: Vec<usize> = starts.iter().rev().copied().collect();

    while let Some(index) = stack.pop() {
        if std::mem::replace(&mut visited[index], true) {
            continue;
        }
        order.push(index);
        stack.extend(slots[index].children.iter().rev().copied());
    }

    let mut built: Vec<Option<Node<R>>> = std::iter::repeat_with(|| None)
        .take(slots.len())
        .collect();

    // Descendants follow their ancestor in pre-order, so walking backwards
    // always finds every child already built.
    for &index in order.iter().rev() {
        let slot = &mut slots[index];
        let Some(record) = slot.record.take() else {
            continue;
        };
        let children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(Node::with_children(record, children));
    }

    built
}

/// Build a forest from records that carry their own identifiers
pub fn build<R, I>(records: I) -> Vec<Node<R>>
where
    R: Record,
    I: IntoIterator<Item = R>,
{
    build_with_report(records).forest
}

/// Build a forest and report dropped subtrees, duplicates and cycles
pub fn build_with_report<R, I>(records: I) -> BuildReport<R::Key, R>
where
    R: Record,
    I: IntoIterator<Item = R>,
{
    let records = records.into_iter();
    let mut builder = TreeBuilder::with_capacity(records.size_hint().0);
    builder.extend(records);
    builder.finish_with_report()
}
