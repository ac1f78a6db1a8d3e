//! Multi-neighborhood cellular automata.
//!
//! An [`Mnca`] rule watches two offset sets at once, an inner shell and an
//! outer shell, and averages the states it sees in each. An ordered list of
//! [`Band`]s maps averages to new states; when several bands match, the
//! last one wins.

use ndca_core::Coord;
use ndca_engine::{Rule, RuleContext};
use ndca_space::Neighborhood;

/// Which shell a [`Band`] reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shell {
    /// The inner offset set.
    Inner,
    /// The outer offset set.
    Outer,
}

/// "If the `shell` average lies in `[min, max]`, become `state`."
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Shell whose average is tested.
    pub shell: Shell,
    /// Inclusive lower bound.
    pub min: f32,
    /// Inclusive upper bound.
    pub max: f32,
    /// State written on a match.
    pub state: u8,
}

impl Band {
    /// A band on `shell` over `[min, max]` writing `state`.
    pub const fn new(shell: Shell, min: f32, max: f32, state: u8) -> Self {
        Self {
            shell,
            min,
            max,
            state,
        }
    }

    /// Whether `average` falls inside the band.
    pub fn contains(&self, average: f32) -> bool {
        average >= self.min && average <= self.max
    }
}

/// The six bands of slackermanz's first multi-neighborhood example.
const PRESET_BANDS: [Band; 6] = [
    Band::new(Shell::Outer, 0.210, 0.220, 1),
    Band::new(Shell::Outer, 0.350, 0.500, 0),
    Band::new(Shell::Outer, 0.750, 0.850, 0),
    Band::new(Shell::Inner, 0.100, 0.280, 0),
    Band::new(Shell::Inner, 0.430, 0.550, 1),
    Band::new(Shell::Outer, 0.120, 0.150, 0),
];

/// A two-shell banded rule over `u8` states.
///
/// Averages divide by the full shell size, so offsets that fall off a
/// non-wrapping edge count as state 0. An offset present in both shells
/// counts toward the inner one only.
#[derive(Clone, Debug)]
pub struct Mnca {
    inner: Neighborhood,
    outer: Neighborhood,
    bands: Vec<Band>,
}

impl Mnca {
    /// A rule from explicit shells and bands.
    pub fn new(inner: Neighborhood, outer: Neighborhood, bands: Vec<Band>) -> Self {
        Self {
            inner,
            outer,
            bands,
        }
    }

    /// Disc-shaped shells with the classic six-band table: inner ring of
    /// radius 1 to 3, outer ring of radius 4 to 7.
    pub fn banded_preset() -> Self {
        Self::new(ring(1.0, 3.0), ring(4.0, 7.0), PRESET_BANDS.to_vec())
    }

    /// The inner shell.
    pub fn inner(&self) -> &Neighborhood {
        &self.inner
    }

    /// The outer shell.
    pub fn outer(&self) -> &Neighborhood {
        &self.outer
    }

    /// The bands, in application order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Both shells combined: the neighborhood to run this rule with.
    pub fn neighborhood(&self) -> Neighborhood {
        self.inner.combine(&self.outer)
    }

    /// The state chosen by the bands for the given shell averages, or
    /// `None` when no band matches.
    pub fn select(&self, inner_average: f32, outer_average: f32) -> Option<u8> {
        self.bands
            .iter()
            .filter(|band| match band.shell {
                Shell::Inner => band.contains(inner_average),
                Shell::Outer => band.contains(outer_average),
            })
            .map(|band| band.state)
            .last()
    }
}

impl<E> Rule<u8, E> for Mnca {
    fn apply(&mut self, ctx: &mut RuleContext<'_, u8, E>) {
        if ctx.neighbor_count() == 0 {
            return;
        }
        let mut inner_sum = 0u32;
        let mut outer_sum = 0u32;
        for (offset, cell) in ctx.neighbors() {
            if self.inner.contains(offset) {
                inner_sum += u32::from(*cell.state());
            } else if self.outer.contains(offset) {
                outer_sum += u32::from(*cell.state());
            }
        }
        let inner_average = inner_sum as f32 / self.inner.len() as f32;
        let outer_average = outer_sum as f32 / self.outer.len() as f32;
        if let Some(next) = self.select(inner_average, outer_average) {
            ctx.set_state(next);
        }
    }
}

/// Every 2-D offset whose Euclidean distance from the origin lies in
/// `[min_radius, max_radius]`. An empty ring falls back to the origin.
pub fn ring(min_radius: f32, max_radius: f32) -> Neighborhood {
    let reach = max_radius.max(0.0).ceil() as i32;
    let mut shape: Option<Neighborhood> = None;
    for y in -reach..=reach {
        for x in -reach..=reach {
            let d = ((x * x + y * y) as f32).sqrt();
            if d >= min_radius && d <= max_radius {
                let offset = Coord::from([x, y]);
                match shape.as_mut() {
                    Some(s) => {
                        s.insert(offset);
                    }
                    None => shape = Some(Neighborhood::single(offset)),
                }
            }
        }
    }
    shape.unwrap_or_else(|| Neighborhood::single(Coord::ORIGIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_bands_override() {
        let m = Mnca::banded_preset();
        // Outer 0.215 says 1; inner 0.2 says 0 and comes later.
        assert_eq!(m.select(0.2, 0.215), Some(0));
        assert_eq!(m.select(0.0, 0.215), Some(1));
        // Inner 0.5 says 1, then outer 0.13 says 0.
        assert_eq!(m.select(0.5, 0.13), Some(0));
        assert_eq!(m.select(0.5, 0.0), Some(1));
        assert_eq!(m.select(0.0, 0.0), None);
    }

    #[test]
    fn band_edges_inclusive() {
        let b = Band::new(Shell::Outer, 0.35, 0.5, 0);
        assert!(b.contains(0.35));
        assert!(b.contains(0.5));
        assert!(!b.contains(0.51));
    }

    #[test]
    fn ring_shapes() {
        let r = ring(1.0, 1.0);
        assert_eq!(r.len(), 4);
        assert!(!r.contains(&Coord::ORIGIN));
        let disc = ring(1.0, 1.5);
        assert_eq!(disc.len(), 8);
        let preset = Mnca::banded_preset();
        assert!(preset.inner().offsets().iter().all(|o| !preset.outer().contains(o)));
        assert_eq!(preset.neighborhood().len(), preset.inner().len() + preset.outer().len());
    }
}
