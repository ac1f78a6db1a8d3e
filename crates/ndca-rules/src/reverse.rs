//! Generalized elementary rules and the reverse rule search.
//!
//! [`GeneralizedElementary`] reads five cells of the previous row
//! (`x - 2 ..= x + 2`) and treats the rule number as a set of allowed live
//! patterns: a dead cell comes alive when every live tap it sees is a bit of
//! the rule. [`RuleSearch`] runs candidate rule numbers against a target
//! picture row by row and reports which one reproduces it.

use std::error::Error;
use std::fmt;
use std::ops::Range;

use ndca_core::{Coord, Dimension};
use ndca_engine::{Automaton, AutomatonConfig, ConfigError, Rule, RuleContext};
use ndca_space::{GridError, Neighborhood};

/// Horizontal reach of the taps on each side.
const REACH: i32 = 2;

/// A 5-tap rule over `u8` states where 1 is alive.
///
/// Tap `dx` (from -2 to 2) contributes bit `2 + dx` to the pattern index.
/// A cell with no live taps, or with any live tap outside the rule, is left
/// alone; otherwise a dead cell becomes alive. Live cells never die.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneralizedElementary {
    rule: u32,
    taps: Vec<Coord>,
}

impl GeneralizedElementary {
    /// The rule with the given number. Only the low 5 bits matter.
    pub fn new(rule: u32) -> Self {
        Self {
            rule,
            taps: (-REACH..=REACH).map(|dx| Coord::from([dx, -1])).collect(),
        }
    }

    /// The rule number.
    pub fn rule(&self) -> u32 {
        self.rule
    }

    /// The five taps.
    pub fn neighborhood(&self) -> Neighborhood {
        let mut shape = Neighborhood::single(Coord::from([-REACH, -1]));
        for &tap in &self.taps {
            shape.insert(tap);
        }
        shape
    }

    /// Whether a live-tap pattern `index` turns a dead cell alive.
    pub fn fires(&self, index: u32) -> bool {
        index & self.rule != 0 && index & !self.rule == 0
    }
}

impl<E> Rule<u8, E> for GeneralizedElementary {
    fn apply(&mut self, ctx: &mut RuleContext<'_, u8, E>) {
        let index = self
            .taps
            .iter()
            .filter(|tap| ctx.neighbor_state(tap) == Some(&1))
            .fold(0u32, |acc, tap| acc | 1 << (REACH + tap[0]));
        if self.fires(index) && *ctx.state() == 0 {
            ctx.set_state(1);
        }
    }
}

// ── RuleSearch ─────────────────────────────────────────────────────

/// Errors from [`RuleSearch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The target has no rows or no columns.
    EmptyTarget,
    /// A target row has a different width than the first.
    RaggedTarget {
        /// Index of the offending row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The automaton could not be built.
    Config(ConfigError),
    /// The initial state does not fit the target.
    Grid(GridError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTarget => write!(f, "target picture is empty"),
            Self::RaggedTarget {
                row,
                expected,
                found,
            } => write!(f, "target row {row} has width {found}, expected {expected}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Result of [`RuleSearch::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First rule reaching the most matching rows.
    pub best_rule: Option<u32>,
    /// Leading rows `best_rule` reproduced.
    pub best_rows: usize,
    /// First rule reproducing every row.
    pub matched: Option<u32>,
    /// Number of candidates evaluated.
    pub tried: usize,
}

/// Search for a [`GeneralizedElementary`] rule that draws a target picture.
///
/// The picture is `rows x width`; row `y` must equal the grid's row `y`
/// after step `y + 1`. By default the grid is seeded with the live cells of
/// the target's first row and candidates `8..32` are tried.
///
/// # Examples
///
/// ```
/// use ndca_rules::RuleSearch;
///
/// let search = RuleSearch::new(vec![vec![0, 1, 0, 1, 0], vec![1, 0, 1, 0, 1]]).unwrap();
/// let outcome = search.run().unwrap();
/// assert_eq!(outcome.matched, Some(10));
/// ```
#[derive(Clone, Debug)]
pub struct RuleSearch {
    target: Vec<Vec<u8>>,
    initial: Vec<(Coord, u8)>,
    candidates: Range<u32>,
}

impl RuleSearch {
    /// Default candidate range.
    pub const DEFAULT_CANDIDATES: Range<u32> = 8..32;

    /// A search for `target`, seeded from its first row.
    pub fn new(target: Vec<Vec<u8>>) -> Result<Self, SearchError> {
        let width = target.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(SearchError::EmptyTarget);
        }
        if let Some((row, r)) = target.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SearchError::RaggedTarget {
                row,
                expected: width,
                found: r.len(),
            });
        }
        let initial = target[0]
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(x, &v)| (Coord::from([x as i32, 0]), v))
            .collect();
        Ok(Self {
            target,
            initial,
            candidates: Self::DEFAULT_CANDIDATES,
        })
    }

    /// Replace the initial state.
    pub fn with_initial<I>(mut self, initial: I) -> Self
    where
        I: IntoIterator<Item = (Coord, u8)>,
    {
        self.initial = initial.into_iter().collect();
        self
    }

    /// Replace the candidate range.
    pub fn with_candidates(mut self, candidates: Range<u32>) -> Self {
        self.candidates = candidates;
        self
    }

    fn width(&self) -> usize {
        self.target[0].len()
    }

    /// Number of leading target rows that `rule` reproduces.
    pub fn evaluate(&self, rule: u32) -> Result<usize, SearchError> {
        let rows = self.target.len();
        let candidate = GeneralizedElementary::new(rule);
        let config = AutomatonConfig::new(
            vec![
                Dimension::new(self.width() as u32),
                Dimension::new(rows as u32),
            ],
            0u8,
        );
        let mut ca: Automaton<u8> = Automaton::new(config, candidate.neighborhood(), candidate)?;
        ca.initialize(self.initial.iter().copied())?;

        let mut matched = 0;
        for (y, expected) in self.target.iter().enumerate() {
            let grid = ca.step();
            let row_matches = expected.iter().enumerate().all(|(x, want)| {
                grid.cell_value(&Coord::from([x as i32, y as i32]))
                    .is_ok_and(|v| v == want)
            });
            if !row_matches {
                break;
            }
            matched += 1;
        }
        Ok(matched)
    }

    /// Try every candidate until one reproduces the whole target.
    pub fn run(&self) -> Result<SearchOutcome, SearchError> {
        let mut outcome = SearchOutcome::default();
        for rule in self.candidates.clone() {
            let rows = self.evaluate(rule)?;
            outcome.tried += 1;
            log::debug!("rule {rule}: {rows}/{} rows", self.target.len());
            if rows > outcome.best_rows {
                outcome.best_rows = rows;
                outcome.best_rule = Some(rule);
            }
            if rows == self.target.len() {
                log::info!("rule {rule} reproduces the target");
                outcome.matched = Some(rule);
                break;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Vec<Vec<u8>> {
        vec![vec![0, 1, 0, 1, 0], vec![1, 0, 1, 0, 1]]
    }

    #[test]
    fn pattern_index_subset_test() {
        let r = GeneralizedElementary::new(10);
        assert!(r.fires(8));
        assert!(r.fires(2));
        assert!(r.fires(10));
        assert!(!r.fires(0));
        assert!(!r.fires(20));
        assert!(!r.fires(5));
    }

    #[test]
    fn taps_span_five_columns() {
        let n = GeneralizedElementary::new(0).neighborhood();
        assert_eq!(n.len(), 5);
        assert!(n.contains(&Coord::from([2, -1])));
        assert!(!n.contains(&Coord::from([3, -1])));
    }

    #[test]
    fn search_finds_rule_ten() {
        let search = RuleSearch::new(target())
            .unwrap()
            .with_initial([(Coord::from([1, 0]), 1), (Coord::from([3, 0]), 1)]);
        let outcome = search.run().unwrap();
        assert_eq!(
            outcome,
            SearchOutcome {
                best_rule: Some(10),
                best_rows: 2,
                matched: Some(10),
                tried: 3,
            }
        );
    }

    #[test]
    fn partial_matches_are_counted() {
        let search = RuleSearch::new(target()).unwrap();
        assert_eq!(search.evaluate(8).unwrap(), 1);
        assert_eq!(search.evaluate(10).unwrap(), 2);
    }

    #[test]
    fn no_match_reports_best_partial() {
        let search = RuleSearch::new(target()).unwrap().with_candidates(8..10);
        let outcome = search.run().unwrap();
        assert_eq!(outcome.matched, None);
        assert_eq!(outcome.best_rule, Some(8));
        assert_eq!(outcome.best_rows, 1);
        assert_eq!(outcome.tried, 2);
    }

    #[test]
    fn malformed_targets_rejected() {
        assert_eq!(RuleSearch::new(Vec::new()).unwrap_err(), SearchError::EmptyTarget);
        assert!(matches!(
            RuleSearch::new(vec![vec![0, 1], vec![1]]),
            Err(SearchError::RaggedTarget { row: 1, expected: 2, found: 1 })
        ));
        let out_of_range = RuleSearch::new(target())
            .unwrap()
            .with_initial([(Coord::from([9, 0]), 1)]);
        assert!(matches!(out_of_range.evaluate(10), Err(SearchError::Grid(_))));
    }
}
