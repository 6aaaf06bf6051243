//! Ordered collections used for team rosters and engine queries.
//!
//! [`Roster`] is an insertion-ordered sequence with identity removal.
//! [`SizedIter`] wraps any iterator and reports how many items remain, which
//! is what renderers need to print "N bunkers:" before listing them.

use serde::{Deserialize, Serialize};

/// Insertion-ordered sequence with removal by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster<T> {
    items: Vec<T>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> Roster<T> {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item at the end.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Index of the first item equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Remove the item at `index`, shifting later items left.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let index = self.index_of(item)?;
        self.remove_at(index)
    }

    /// Check whether `item` is present.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the roster has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> SizedIter<std::slice::Iter<'_, T>> {
        SizedIter::new(self.items.iter())
    }

    /// View the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T: PartialEq> IntoIterator for &'a Roster<T> {
    type Item = &'a T;
    type IntoIter = SizedIter<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator adapter that tracks how many items are left.
#[derive(Debug, Clone)]
pub struct SizedIter<I> {
    inner: I,
    remaining: usize,
}

impl<I: ExactSizeIterator> SizedIter<I> {
    /// Wrap an exact-size iterator.
    pub fn new(inner: I) -> Self {
        let remaining = inner.len();
        Self { inner, remaining }
    }
}

impl<I> SizedIter<I> {
    /// Wrap an iterator whose length is known up front.
    pub fn with_size(inner: I, size: usize) -> Self {
        Self {
            inner,
            remaining: size,
        }
    }

    /// Items not yet yielded.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.remaining
    }
}

impl<I: Iterator> Iterator for SizedIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I: Iterator> ExactSizeIterator for SizedIter<I> {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_keeps_insertion_order() {
        let mut roster = Roster::new();
        roster.push(3);
        roster.push(1);
        roster.push(2);
        assert_eq!(roster.as_slice(), &[3, 1, 2]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_remove_by_identity() {
        let mut roster = Roster::new();
        for n in [10, 20, 30] {
            roster.push(n);
        }
        assert_eq!(roster.remove(&20), Some(20));
        assert_eq!(roster.as_slice(), &[10, 30]);
        assert_eq!(roster.remove(&99), None);
        assert!(!roster.contains(&20));
    }

    #[test]
    fn test_roster_remove_at_out_of_range() {
        let mut roster: Roster<u8> = Roster::new();
        assert_eq!(roster.remove_at(0), None);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_sized_iter_counts_down() {
        let mut roster = Roster::new();
        roster.push('a');
        roster.push('b');

        let mut iter = roster.iter();
        assert_eq!(iter.size(), 2);
        assert_eq!(iter.next(), Some(&'a'));
        assert_eq!(iter.size(), 1);
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&'b'));
        assert_eq!(iter.size(), 0);
        assert_eq!(iter.next(), None);
    }
}
