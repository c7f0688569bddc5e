//! Rank-ordered storage for catalog records
//!
//! A record's offset in its list is the identifier every other catalog
//! operation uses, so the list has two phases: [`SortedList`] accepts
//! insertions while a catalog is being imported, and [`SealedList`] is what
//! the catalog keeps afterwards. A sealed list cannot grow, so positions
//! never shift under an outstanding loan reference.

use std::cmp::Ordering;
use std::slice;

/// A record with a total ordering used for shelving.
pub trait Ranked {
    fn rank(&self, other: &Self) -> Ordering;
}

/// Compare two strings ignoring case, one character at a time.
///
/// Each character is folded to upper case and then lower case before
/// comparison; characters whose folding is not one-to-one keep their first
/// folded form. Shorter strings rank first when one is a prefix of the other.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x == y {
                    continue;
                }
                let ord = fold(x).cmp(&fold(y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn fold(c: char) -> char {
    let upper = c.to_uppercase().next().unwrap_or(c);
    upper.to_lowercase().next().unwrap_or(upper)
}

/// A list that keeps its elements ordered by [`Ranked::rank`] on every insert.
#[derive(Debug, Clone)]
pub struct SortedList<T> {
    items: Vec<T>,
}

impl<T: Ranked> SortedList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert before the first element that ranks strictly after `item`.
    ///
    /// Equal elements keep their insertion order. Returns the position used.
    pub fn insert(&mut self, item: T) -> usize {
        let pos = self
            .items
            .iter()
            .position(|existing| item.rank(existing) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(pos, item);
        pos
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Close the list to further insertion.
    pub fn seal(self) -> SealedList<T> {
        SealedList { items: self.items }
    }
}

impl<T: Ranked> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ranked> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An index-addressable list that can no longer grow.
#[derive(Debug, Clone)]
pub struct SealedList<T> {
    items: Vec<T>,
}

impl<T> SealedList<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every element. All previously issued indices become meaningless.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for SealedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, T> IntoIterator for &'a SealedList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
