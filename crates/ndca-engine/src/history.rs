//! Retained grid snapshots.
//!
//! [`GridHistory`] is a FIFO of frozen [`Grid`] copies tagged with the tick
//! they were committed at. With a limit, pushing past capacity evicts the
//! oldest snapshot.

use std::collections::VecDeque;

use ndca_core::TickId;
use ndca_space::Grid;

/// FIFO of `(tick, snapshot)` pairs, optionally bounded.
#[derive(Clone, Debug)]
pub struct GridHistory<S> {
    entries: VecDeque<(TickId, Grid<S>)>,
    limit: Option<usize>,
    evicted: u64,
}

impl<S> GridHistory<S> {
    /// An empty history. `None` retains everything.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
            evicted: 0,
        }
    }

    /// Append a snapshot, returning the evicted one if the limit was hit.
    pub fn push(&mut self, tick: TickId, grid: Grid<S>) -> Option<(TickId, Grid<S>)> {
        self.entries.push_back((tick, grid));
        match self.limit {
            Some(limit) if self.entries.len() > limit => {
                self.evicted += 1;
                self.entries.pop_front()
            }
            _ => None,
        }
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshots are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The retention limit, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Total snapshots evicted so far.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// The snapshot committed at `tick`, if still retained.
    pub fn get(&self, tick: TickId) -> Option<&Grid<S>> {
        // Ticks are pushed in increasing order.
        self.entries
            .binary_search_by_key(&tick, |(t, _)| *t)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<(TickId, &Grid<S>)> {
        self.entries.back().map(|(t, g)| (*t, g))
    }

    /// The oldest retained snapshot.
    pub fn oldest(&self) -> Option<(TickId, &Grid<S>)> {
        self.entries.front().map(|(t, g)| (*t, g))
    }

    /// Retained ticks, oldest first.
    pub fn ticks(&self) -> impl Iterator<Item = TickId> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// Retained snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (TickId, &Grid<S>)> + '_ {
        self.entries.iter().map(|(t, g)| (*t, g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndca_core::{Coord, Dimension};

    fn grid(v: u8) -> Grid<u8> {
        Grid::new(vec![Dimension::new(2)], v).unwrap()
    }

    #[test]
    fn bounded_evicts_oldest_first() {
        let mut h = GridHistory::new(Some(3));
        for t in 1..=5u64 {
            let evicted = h.push(TickId(t), grid(t as u8));
            assert_eq!(evicted.map(|(tick, _)| tick), t.checked_sub(3).filter(|&e| e > 0).map(TickId));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.evicted(), 2);
        assert_eq!(h.ticks().collect::<Vec<_>>(), vec![TickId(3), TickId(4), TickId(5)]);
        assert_eq!(h.oldest().map(|(t, _)| t), Some(TickId(3)));
    }

    #[test]
    fn unbounded_keeps_everything() {
        let mut h = GridHistory::new(None);
        for t in 1..=50u64 {
            assert!(h.push(TickId(t), grid(0)).is_none());
        }
        assert_eq!(h.len(), 50);
        assert_eq!(h.limit(), None);
    }

    #[test]
    fn lookup_by_tick() {
        let mut h = GridHistory::new(Some(2));
        h.push(TickId(1), grid(1));
        h.push(TickId(2), grid(2));
        h.push(TickId(3), grid(3));
        assert!(h.get(TickId(1)).is_none());
        let g = h.get(TickId(2)).unwrap();
        assert_eq!(*g.cell_value(&Coord::from([0])).unwrap(), 2);
        assert_eq!(h.latest().map(|(t, _)| t), Some(TickId(3)));
    }
}
