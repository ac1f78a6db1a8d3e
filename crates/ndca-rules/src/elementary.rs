//! Wolfram elementary rules.
//!
//! Time runs along axis 1: each cell of row `y` reads the three cells of
//! row `y - 1` at `x - 1`, `x`, and `x + 1`, and sets itself from bit
//! `4l + 2c + r` of the rule number. The extruded variant widens each of the
//! three taps into a column along a depth axis and takes the maximum of
//! each column, turning the rule into a 2-D sheet that grows over time.

use ndca_core::{Coord, ShapeError};
use ndca_engine::{Rule, RuleContext};
use ndca_space::Neighborhood;

/// An elementary cellular automaton rule (0 to 255).
///
/// # Examples
///
/// ```
/// use ndca_rules::Elementary;
///
/// let rule30 = Elementary::new(30);
/// assert_eq!(rule30.next_state(1, 0, 0), 1);
/// assert_eq!(rule30.next_state(1, 1, 1), 0);
/// assert_eq!(rule30.neighborhood().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elementary {
    rule: u8,
    left: Vec<Coord>,
    centre: Vec<Coord>,
    right: Vec<Coord>,
    neighborhood: Neighborhood,
}

impl Elementary {
    /// The flat 2-D rule: one tap per position.
    pub fn new(rule: u8) -> Self {
        let (left, centre, right) = (
            Coord::from([-1, -1]),
            Coord::from([0, -1]),
            Coord::from([1, -1]),
        );
        let mut neighborhood = Neighborhood::single(left);
        neighborhood.insert(centre);
        neighborhood.insert(right);
        Self {
            rule,
            left: vec![left],
            centre: vec![centre],
            right: vec![right],
            neighborhood,
        }
    }

    /// Each tap extruded over `start..=end` along `axis`.
    ///
    /// With `axis = 2` and `-1..=1` this reads a 3x3 block of the previous
    /// row-plane, 3 deep.
    pub fn extruded(rule: u8, start: i32, end: i32, axis: usize) -> Result<Self, ShapeError> {
        let flat = Self::new(rule);
        let widen = |taps: &[Coord]| -> Result<Vec<Coord>, ShapeError> {
            let mut out = Vec::new();
            for tap in taps {
                out.extend(tap.extrude(start, end, &[axis])?);
            }
            if out.is_empty() {
                return Err(ShapeError::Empty);
            }
            Ok(out)
        };
        let (left, centre, right) = (
            widen(&flat.left)?,
            widen(&flat.centre)?,
            widen(&flat.right)?,
        );
        let neighborhood =
            Neighborhood::from_offsets(left.iter().chain(&centre).chain(&right).copied())?;
        Ok(Self {
            rule,
            left,
            centre,
            right,
            neighborhood,
        })
    }

    /// The rule number.
    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Every tap, left group first.
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood.clone()
    }

    /// Look up the rule table for a `(left, centre, right)` pattern of 0/1.
    pub fn next_state(&self, left: u8, centre: u8, right: u8) -> u8 {
        let index = (left.min(1) << 2) | (centre.min(1) << 1) | right.min(1);
        (self.rule >> index) & 1
    }
}

fn group_value<E>(ctx: &RuleContext<'_, u8, E>, taps: &[Coord]) -> u8 {
    taps.iter()
        .filter_map(|tap| ctx.neighbor_state(tap))
        .copied()
        .max()
        .unwrap_or(0)
}

impl<E> Rule<u8, E> for Elementary {
    fn apply(&mut self, ctx: &mut RuleContext<'_, u8, E>) {
        // Row 0 has nothing above it and keeps its seed.
        if ctx.neighbor_count() == 0 {
            return;
        }
        let l = group_value(ctx, &self.left);
        let c = group_value(ctx, &self.centre);
        let r = group_value(ctx, &self.right);
        let next = self.next_state(l, c, r);
        ctx.set_state(next);
    }
}
