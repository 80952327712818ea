//! Dense traversal over a map's coverage range.

use std::collections::btree_map;
use std::iter::FusedIterator;

use crate::error::KeyframeError;
use crate::map::KeyframeMap;
use crate::value::Keyed;

/// Every integer from `start` to `end`, merged against the stored keyframes.
///
/// `start` is always emitted first. Each stored key `k` then pulls the
/// sequence forward to `k`, and the tail runs on to `end`. Stored keys at or
/// behind the last emitted position are skipped, so with `start > end` and no
/// keyframes only `start` comes out.
pub struct OrderedPositions<'a, V> {
    keys: btree_map::Keys<'a, i64, V>,
    start: i64,
    end: i64,
    last: Option<i64>,
    ceiling: i64,
    keys_done: bool,
}

impl<'a, V> OrderedPositions<'a, V> {
    pub(crate) fn new(keys: btree_map::Keys<'a, i64, V>, start: i64, end: i64) -> Self {
        Self {
            keys,
            start,
            end,
            last: None,
            ceiling: start,
            keys_done: false,
        }
    }
}

impl<V> Iterator for OrderedPositions<'_, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let Some(last) = self.last else {
            self.last = Some(self.start);
            return Some(self.start);
        };
        loop {
            if last < self.ceiling {
                let next = last + 1;
                self.last = Some(next);
                return Some(next);
            }
            if self.keys_done {
                return None;
            }
            match self.keys.next() {
                Some(&k) => self.ceiling = k,
                None => {
                    self.keys_done = true;
                    self.ceiling = self.end;
                }
            }
        }
    }
}

impl<V> FusedIterator for OrderedPositions<'_, V> {}

/// Resolved value for each position of [`OrderedPositions`].
pub struct Values<'a, V: Keyed> {
    map: &'a KeyframeMap<V>,
    positions: OrderedPositions<'a, V>,
}

impl<'a, V: Keyed> Values<'a, V> {
    pub(crate) fn new(map: &'a KeyframeMap<V>) -> Self {
        Self {
            map,
            positions: map.ordered_positions(),
        }
    }
}

impl<V: Keyed> Iterator for Values<'_, V> {
    type Item = Result<V, KeyframeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        Some(self.map.get(position))
    }
}

impl<V: Keyed> FusedIterator for Values<'_, V> {}

/// `(position, value)` pairs for each position of [`OrderedPositions`].
pub struct Items<'a, V: Keyed> {
    map: &'a KeyframeMap<V>,
    positions: OrderedPositions<'a, V>,
}

impl<'a, V: Keyed> Items<'a, V> {
    pub(crate) fn new(map: &'a KeyframeMap<V>) -> Self {
        Self {
            map,
            positions: map.ordered_positions(),
        }
    }
}

impl<V: Keyed> Iterator for Items<'_, V> {
    type Item = Result<(i64, V), KeyframeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        Some(self.map.get(position).map(|value| (position, value)))
    }
}

impl<V: Keyed> FusedIterator for Items<'_, V> {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn walk(keys: &[i64], start: i64, end: i64) -> Vec<i64> {
        let stored: BTreeMap<i64, ()> = keys.iter().map(|&k| (k, ())).collect();
        OrderedPositions::new(stored.keys(), start, end).collect()
    }

    #[test]
    fn dense_regardless_of_keys() {
        assert_eq!(walk(&[], 0, 5), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(walk(&[2, 4], 0, 5), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(walk(&[0, 1, 2], 0, 2), vec![0, 1, 2]);
        assert_eq!(walk(&[-3, 3], -3, 3), vec![-3, -2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn single_point_range() {
        assert_eq!(walk(&[], 0, 0), vec![0]);
        assert_eq!(walk(&[7], 7, 7), vec![7]);
    }

    #[test]
    fn inverted_bounds_yield_start_only() {
        assert_eq!(walk(&[], 5, 2), vec![5]);
    }

    #[test]
    fn fused_after_exhaustion() {
        let stored: BTreeMap<i64, ()> = BTreeMap::new();
        let mut it = OrderedPositions::new(stored.keys(), 1, 2);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
