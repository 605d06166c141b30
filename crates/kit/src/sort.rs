//! Simple non-mutating sorts
//!
//! Both sorts copy their input and return a new vector.

use std::cmp::Ordering;

/// Bubble sort in ascending order
pub fn bubble<T: Ord + Clone>(data: &[T]) -> Vec<T> {
    bubble_by(data, T::cmp)
}

/// Bubble sort with a comparator; equal elements keep their order
pub fn bubble_by<T, F>(data: &[T], mut compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut items = data.to_vec();
    let mut unsorted = items.len();

    while unsorted > 1 {
        let mut last_swap = 0;
        for i in 1..unsorted {
            if compare(&items[i - 1], &items[i]) == Ordering::Greater {
                items.swap(i - 1, i);
                last_swap = i;
            }
        }
        // Everything after the last swap is already in place
        unsorted = last_swap;
    }

    items
}

/// Quick sort in ascending order
pub fn quick<T: Ord + Clone>(data: &[T]) -> Vec<T> {
    quick_by(data, |pivot, item| item < pivot)
}

/// Quick sort with a partition predicate
///
/// `before(pivot, item)` decides whether `item` goes before the pivot. The
/// first element of each partition is the pivot, and partitions keep the
/// relative order of their items.
pub fn quick_by<T, F>(data: &[T], mut before: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let mut sorted = Vec::with_capacity(data.len());
    // Explicit work stack: an entry is either a partition or a placed pivot
    let mut work: Vec<Result<Vec<T>, T>> = vec![Ok(data.to_vec())];

    while let Some(entry) = work.pop() {
        let mut items = match entry {
            Ok(items) => items,
            Err(pivot) => {
                sorted.push(pivot);
                continue;
            }
        };
        if items.len() <= 1 {
            sorted.append(&mut items);
            continue;
        }

        let mut rest = items.into_iter();
        let Some(pivot) = rest.next() else {
            continue;
        };
        let (prefix, suffix): (Vec<T>, Vec<T>) = rest.partition(|item| before(&pivot, item));

        work.push(Ok(suffix));
        work.push(Err(pivot));
        work.push(Ok(prefix));
    }

    sorted
}
