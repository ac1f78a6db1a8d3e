//! Outer-totalistic birth/survival rules.
//!
//! A [`LifeLike`] rule counts live neighbors (any non-zero state) and
//! consults two sets: a dead cell with a count in the birth set comes
//! alive, and a live cell with a count in the survival set stays alive.
//! Everything else dies. Conway's Game of Life is `B3/S23`.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use ndca_engine::{Rule, RuleContext};

/// Errors from [`LifeLike::new`] and rulestring parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulestringError {
    /// A section did not start with `B` or `S`.
    UnknownSection {
        /// The offending section text.
        section: String,
    },
    /// The same section appeared twice.
    DuplicateSection {
        /// `'B'` or `'S'`.
        section: char,
    },
    /// A section was missing.
    MissingSection {
        /// `'B'` or `'S'`.
        section: char,
    },
    /// A character in a section was not a decimal digit.
    InvalidDigit {
        /// The offending character.
        found: char,
    },
    /// A neighbor count exceeds [`LifeLike::MAX_COUNT`].
    CountTooLarge {
        /// The offending count.
        count: usize,
    },
}

impl fmt::Display for RulestringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection { section } => {
                write!(f, "section '{section}' must start with 'B' or 'S'")
            }
            Self::DuplicateSection { section } => write!(f, "section '{section}' given twice"),
            Self::MissingSection { section } => write!(f, "section '{section}' is missing"),
            Self::InvalidDigit { found } => write!(f, "'{found}' is not a neighbor count"),
            Self::CountTooLarge { count } => write!(
                f,
                "neighbor count {count} exceeds the maximum of {}",
                LifeLike::MAX_COUNT
            ),
        }
    }
}

impl Error for RulestringError {}

/// A birth/survival rule over `u8` states.
///
/// Cells whose neighbor map is empty are left untouched, so a neighborhood
/// that falls entirely off the grid does not kill anything.
///
/// # Examples
///
/// ```
/// use ndca_rules::LifeLike;
///
/// let highlife: LifeLike = "B36/S23".parse().unwrap();
/// assert!(highlife.births_on(6));
/// assert!(!highlife.survives_on(6));
/// assert_eq!(LifeLike::conway().to_string(), "B3/S23");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifeLike {
    birth: u64,
    survival: u64,
}

impl LifeLike {
    /// Largest representable neighbor count.
    pub const MAX_COUNT: usize = 63;

    /// A rule from explicit birth and survival counts.
    pub fn new(birth: &[usize], survival: &[usize]) -> Result<Self, RulestringError> {
        Ok(Self {
            birth: mask(birth)?,
            survival: mask(survival)?,
        })
    }

    /// Conway's Game of Life: `B3/S23`.
    pub fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survival: (1 << 2) | (1 << 3),
        }
    }

    /// Whether a dead cell with `count` live neighbors comes alive.
    pub fn births_on(&self, count: usize) -> bool {
        count <= Self::MAX_COUNT && self.birth & (1 << count) != 0
    }

    /// Whether a live cell with `count` live neighbors stays alive.
    pub fn survives_on(&self, count: usize) -> bool {
        count <= Self::MAX_COUNT && self.survival & (1 << count) != 0
    }

    /// The next state (0 or 1) of a cell.
    pub fn next_state(&self, alive: bool, live_neighbors: usize) -> u8 {
        let next = if alive {
            self.survives_on(live_neighbors)
        } else {
            self.births_on(live_neighbors)
        };
        next as u8
    }
}

impl<E> Rule<u8, E> for LifeLike {
    fn apply(&mut self, ctx: &mut RuleContext<'_, u8, E>) {
        if ctx.neighbor_count() == 0 {
            return;
        }
        let live = ctx.neighbors().filter(|(_, c)| *c.state() != 0).count();
        let next = self.next_state(*ctx.state() != 0, live);
        ctx.set_state(next);
    }
}

fn mask(counts: &[usize]) -> Result<u64, RulestringError> {
    counts.iter().try_fold(0u64, |acc, &count| {
        if count > LifeLike::MAX_COUNT {
            return Err(RulestringError::CountTooLarge { count });
        }
        Ok(acc | (1 << count))
    })
}

fn digits(section: &str) -> Result<u64, RulestringError> {
    let counts = section
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as usize)
                .ok_or(RulestringError::InvalidDigit { found: c })
        })
        .collect::<Result<Vec<_>, _>>()?;
    mask(&counts)
}

/// Parses `B<digits>/S<digits>` in either order, case-insensitive.
impl FromStr for LifeLike {
    type Err = RulestringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut birth = None;
        let mut survival = None;
        for section in s.trim().split('/') {
            let mut chars = section.chars();
            let (slot, name) = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => (&mut birth, 'B'),
                Some('S') => (&mut survival, 'S'),
                _ => {
                    return Err(RulestringError::UnknownSection {
                        section: section.to_string(),
                    })
                }
            };
            if slot.is_some() {
                return Err(RulestringError::DuplicateSection { section: name });
            }
            *slot = Some(digits(chars.as_str())?);
        }
        Ok(Self {
            birth: birth.ok_or(RulestringError::MissingSection { section: 'B' })?,
            survival: survival.ok_or(RulestringError::MissingSection { section: 'S' })?,
        })
    }
}

impl fmt::Display for LifeLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in (0..=Self::MAX_COUNT).filter(|&n| self.births_on(n)) {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in (0..=Self::MAX_COUNT).filter(|&n| self.survives_on(n)) {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_table() {
        let life = LifeLike::conway();
        for n in 0..=8 {
            assert_eq!(life.next_state(false, n), (n == 3) as u8, "birth on {n}");
            assert_eq!(life.next_state(true, n), (n == 2 || n == 3) as u8, "survival on {n}");
        }
    }

    #[test]
    fn parse_matches_conway() {
        assert_eq!("B3/S23".parse::<LifeLike>().unwrap(), LifeLike::conway());
        assert_eq!("s23/b3".parse::<LifeLike>().unwrap(), LifeLike::conway());
    }

    #[test]
    fn parse_empty_sections() {
        let seeds: LifeLike = "B2/S".parse().unwrap();
        assert!(seeds.births_on(2));
        assert!((0..=8).all(|n| !seeds.survives_on(n)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "B3".parse::<LifeLike>(),
            Err(RulestringError::MissingSection { section: 'S' })
        );
        assert_eq!(
            "B3/B4".parse::<LifeLike>(),
            Err(RulestringError::DuplicateSection { section: 'B' })
        );
        assert_eq!(
            "B3/Sx".parse::<LifeLike>(),
            Err(RulestringError::InvalidDigit { found: 'x' })
        );
        assert!(matches!(
            "23/3".parse::<LifeLike>(),
            Err(RulestringError::UnknownSection { .. })
        ));
    }

    #[test]
    fn large_counts_for_3d() {
        let rule = LifeLike::new(&[5], &[4, 5, 26]).unwrap();
        assert!(rule.survives_on(26));
        assert!(!rule.births_on(26));
        assert!(matches!(
            LifeLike::new(&[64], &[]),
            Err(RulestringError::CountTooLarge { count: 64 })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let rule: LifeLike = "B36/S23".parse().unwrap();
        assert_eq!(rule.to_string(), "B36/S23");
        assert_eq!(rule.to_string().parse::<LifeLike>().unwrap(), rule);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rulestrings_survive_display(
                birth in proptest::collection::btree_set(0usize..10, 0..6),
                survival in proptest::collection::btree_set(0usize..10, 0..6),
            ) {
                let birth: Vec<usize> = birth.into_iter().collect();
                let survival: Vec<usize> = survival.into_iter().collect();
                let rule = LifeLike::new(&birth, &survival).unwrap();
                let parsed: LifeLike = rule.to_string().parse().unwrap();
                prop_assert_eq!(parsed, rule);
            }
        }
    }
}
