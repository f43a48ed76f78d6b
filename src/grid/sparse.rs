//! Sparse containers keyed by signed integers.  A [`SparseGrid`] is a [`SparseLine`] of
//! [`SparseLine`]s, so both levels track their own key bounds.

use std::collections::HashMap;

/// A sparse, one-dimensional map from `i32` keys to values which remembers the smallest and
/// largest key ever set.  Traversal always runs in ascending key order.
#[derive(Debug, Clone)]
pub struct SparseLine<T> {
    items: HashMap<i32, T>,
    /// `(min, max)` of every key passed to [`Self::set`], or `None` if nothing has been set.
    ///
    /// **Invariant**: every key in `items` lies within these bounds
    bounds: Option<(i32, i32)>,
}

impl<T> SparseLine<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            bounds: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn bounds(&self) -> Option<(i32, i32)> {
        self.bounds
    }

    pub fn get(&self, key: i32) -> Option<&T> {
        self.items.get(&key)
    }

    /// Sets the value at `key`, widening the bounds if required
    pub fn set(&mut self, key: i32, value: T) {
        self.widen_bounds(key);
        self.items.insert(key, value);
    }

    /// Gets a mutable reference to the value at `key`, inserting one made by `f` if the key is
    /// vacant.
    pub fn get_or_insert_with(&mut self, key: i32, f: impl FnOnce() -> T) -> &mut T {
        self.widen_bounds(key);
        self.items.entry(key).or_insert_with(f)
    }

    /// Iterate over `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> + '_ {
        // An empty line gets the empty range `0..=-1`
        let (min, max) = self.bounds.unwrap_or((0, -1));
        (min..=max).filter_map(move |k| self.items.get(&k).map(|v| (k, v)))
    }

    fn widen_bounds(&mut self, key: i32) {
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(key), max.max(key)),
            None => (key, key),
        });
    }
}

impl<T> Default for SparseLine<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sparse two-dimensional map from `(row, col)` pairs to values.  Each row stores its columns in
/// a nested [`SparseLine`].
#[derive(Debug, Clone)]
pub struct SparseGrid<T> {
    rows: SparseLine<SparseLine<T>>,
}

impl<T> SparseGrid<T> {
    pub fn new() -> Self {
        Self {
            rows: SparseLine::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The smallest and largest row which have been [`set`](Self::set)
    pub fn row_bounds(&self) -> Option<(i32, i32)> {
        self.rows.bounds()
    }

    pub fn get(&self, row: i32, col: i32) -> Option<&T> {
        self.rows.get(row)?.get(col)
    }

    pub fn set(&mut self, row: i32, col: i32, value: T) {
        self.rows
            .get_or_insert_with(row, SparseLine::new)
            .set(col, value);
    }

    /// Iterate over `(row, col, value)` triples, by ascending row then ascending column
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> + '_ {
        self.rows
            .iter()
            .flat_map(|(row, line)| line.iter().map(move |(col, v)| (row, col, v)))
    }

    /// Calls `f(value, row, col)` on every entry, in the order of [`Self::iter`]
    pub fn for_each(&self, mut f: impl FnMut(&T, i32, i32)) {
        for (row, col, v) in self.iter() {
            f(v, row, col);
        }
    }
}

impl<T> Default for SparseGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn empty_grid() {
        let grid = SparseGrid::<u8>::new();
        assert!(grid.is_empty());
        assert_eq!(grid.row_bounds(), None);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn set_and_get_with_negative_keys() {
        let mut grid = SparseGrid::new();
        grid.set(-3, 7, 'a');
        grid.set(2, -5, 'b');
        grid.set(-3, 7, 'c'); // Overwrite
        assert!(!grid.is_empty());
        assert_eq!(grid.get(-3, 7), Some(&'c'));
        assert_eq!(grid.get(2, -5), Some(&'b'));
        assert_eq!(grid.get(2, 7), None);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.row_bounds(), Some((-3, 2)));
    }

    #[test]
    fn traversal_is_row_major() {
        let mut grid = SparseGrid::new();
        for &(r, c) in &[(1, 0), (-1, 4), (0, 2), (-1, -2), (1, -1), (0, 0)] {
            grid.set(r, c, r * 10 + c);
        }
        let visited = grid.iter().map(|(r, c, _)| (r, c)).collect_vec();
        assert_eq!(
            visited,
            vec![(-1, -2), (-1, 4), (0, 0), (0, 2), (1, -1), (1, 0)]
        );

        let mut via_for_each = Vec::new();
        grid.for_each(|v, r, c| via_for_each.push((*v, r, c)));
        assert_eq!(via_for_each[0], (-12, -1, -2));
        assert_eq!(via_for_each.len(), 6);
    }
}
