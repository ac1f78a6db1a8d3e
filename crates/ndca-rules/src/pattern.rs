//! Text-mask loaders and seeded random fills.
//!
//! Masks are plain text: each line is a row (axis 1, increasing downward)
//! and each character a column (axis 0). Neighborhood masks use
//!
//! | glyph        | meaning                        |
//! |--------------|--------------------------------|
//! | `@`          | origin, not an offset          |
//! | `*`          | origin, also an offset         |
//! | `#`          | offset                         |
//! | `.` or space | nothing                        |
//!
//! and every marked glyph becomes the offset `(column - ox, row - oy)`.

use std::error::Error;
use std::fmt;

use ndca_core::{Coord, Dimension, ShapeError};
use ndca_space::{Grid, GridError, Neighborhood};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Errors from the pattern loaders.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternError {
    /// A neighborhood mask has no `@` or `*`.
    NoOrigin,
    /// A neighborhood mask has more than one origin.
    MultipleOrigins {
        /// Row of the second origin.
        row: usize,
        /// Column of the second origin.
        column: usize,
    },
    /// A neighborhood mask contains a character outside its alphabet.
    UnknownGlyph {
        /// The offending character.
        glyph: char,
        /// Its row.
        row: usize,
        /// Its column.
        column: usize,
    },
    /// A random fill density outside `[0, 1]`.
    InvalidDensity {
        /// The rejected value.
        density: f64,
    },
    /// The mask marked no offsets.
    Shape(ShapeError),
    /// The fill dimensions are invalid.
    Grid(GridError),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOrigin => write!(f, "mask has no origin ('@' or '*')"),
            Self::MultipleOrigins { row, column } => {
                write!(f, "second origin at row {row}, column {column}")
            }
            Self::UnknownGlyph { glyph, row, column } => {
                write!(f, "unknown glyph '{glyph}' at row {row}, column {column}")
            }
            Self::InvalidDensity { density } => {
                write!(f, "density {density} is not in [0, 1]")
            }
            Self::Shape(e) => write!(f, "shape: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for PatternError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<GridError> for PatternError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Parse a 2-D neighborhood mask.
///
/// Offsets are returned in row-major scan order.
///
/// # Examples
///
/// ```
/// use ndca_core::Coord;
/// use ndca_rules::pattern::parse_offsets;
///
/// let plus = parse_offsets(
///     ".#.\n\
///      #@#\n\
///      .#.",
/// )
/// .unwrap();
/// assert_eq!(plus.len(), 4);
/// assert!(plus.contains(&Coord::from([0, -1])));
/// assert!(plus.contains(&Coord::from([-1, 0])));
/// ```
pub fn parse_offsets(text: &str) -> Result<Neighborhood, PatternError> {
    let mut origin = None;
    let mut marked = Vec::new();
    for (row, line) in text.lines().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            let (is_origin, is_member) = match glyph {
                '@' => (true, false),
                '*' => (true, true),
                '#' => (false, true),
                '.' | ' ' | '\t' | '\r' => (false, false),
                _ => return Err(PatternError::UnknownGlyph { glyph, row, column }),
            };
            if is_origin {
                if origin.is_some() {
                    return Err(PatternError::MultipleOrigins { row, column });
                }
                origin = Some((row, column));
            }
            if is_member {
                marked.push((row, column));
            }
        }
    }
    let (oy, ox) = origin.ok_or(PatternError::NoOrigin)?;
    let offsets = marked
        .into_iter()
        .map(|(row, column)| Coord::from([column as i32 - ox as i32, row as i32 - oy as i32]));
    Ok(Neighborhood::from_offsets(offsets)?)
}

/// Parse a 2-D picture into initial states.
///
/// `glyph` maps each character to a state; characters it maps to `None`
/// are skipped. Positions are absolute: `(column, row)`.
///
/// # Examples
///
/// ```
/// use ndca_core::Coord;
/// use ndca_rules::pattern::parse_states;
///
/// let glider = parse_states(".#.\n..#\n###", |c| (c == '#').then_some(1u8));
/// assert_eq!(glider.len(), 5);
/// assert_eq!(glider[0], (Coord::from([1, 0]), 1));
/// ```
pub fn parse_states<S, F>(text: &str, mut glyph: F) -> Vec<(Coord, S)>
where
    F: FnMut(char) -> Option<S>,
{
    let mut states = Vec::new();
    for (row, line) in text.lines().enumerate() {
        for (column, c) in line.chars().enumerate() {
            if let Some(state) = glyph(c) {
                states.push((Coord::from([column as i32, row as i32]), state));
            }
        }
    }
    states
}

/// Live cells (state 1) of a seeded random fill.
///
/// Every cell of a grid with `dimensions` is alive with probability
/// `density`. The same seed always yields the same cells, in grid order.
pub fn random_states(
    dimensions: &[Dimension],
    density: f64,
    seed: u64,
) -> Result<Vec<(Coord, u8)>, PatternError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(PatternError::InvalidDensity { density });
    }
    let count = Grid::<u8>::validate_dimensions(dimensions)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut odometer = vec![0i32; dimensions.len()];
    let mut states = Vec::new();
    for _ in 0..count {
        if rng.random_bool(density) {
            states.push((Coord::new(&odometer)?, 1));
        }
        // Axis 0 varies fastest.
        for (value, dim) in odometer.iter_mut().zip(dimensions) {
            *value += 1;
            if (*value as u32) < dim.size {
                break;
            }
            *value = 0;
        }
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_shifts_offsets() {
        let n = parse_offsets("@##").unwrap();
        let offsets: Vec<Coord> = n.offsets().iter().copied().collect();
        assert_eq!(offsets, vec![Coord::from([1, 0]), Coord::from([2, 0])]);

        let above = parse_offsets("###\n.@.").unwrap();
        assert!(above.contains(&Coord::from([-1, -1])));
        assert!(above.contains(&Coord::from([1, -1])));
        assert_eq!(above.len(), 3);
    }

    #[test]
    fn star_origin_is_a_member() {
        let n = parse_offsets("#*#").unwrap();
        assert_eq!(n.len(), 3);
        assert!(n.contains(&Coord::ORIGIN));
    }

    #[test]
    fn mask_errors() {
        assert_eq!(parse_offsets("###").unwrap_err(), PatternError::NoOrigin);
        assert_eq!(
            parse_offsets("@#\n#@").unwrap_err(),
            PatternError::MultipleOrigins { row: 1, column: 1 }
        );
        assert_eq!(
            parse_offsets("@x").unwrap_err(),
            PatternError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                column: 1
            }
        );
        assert_eq!(
            parse_offsets("..@..").unwrap_err(),
            PatternError::Shape(ShapeError::Empty)
        );
    }

    #[test]
    fn states_skip_unmapped_glyphs() {
        let states = parse_states("a.b\n..c", |c| match c {
            'a' => Some(1u8),
            'b' => Some(2),
            'c' => Some(3),
            _ => None,
        });
        assert_eq!(
            states,
            vec![
                (Coord::from([0, 0]), 1),
                (Coord::from([2, 0]), 2),
                (Coord::from([2, 1]), 3),
            ]
        );
    }

    #[test]
    fn random_fill_is_seeded() {
        let dims = [Dimension::new(16), Dimension::new(16)];
        let a = random_states(&dims, 0.3, 7).unwrap();
        let b = random_states(&dims, 0.3, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|(p, v)| *v == 1 && p[0] < 16 && p[1] < 16));
    }

    #[test]
    fn random_fill_extremes() {
        let dims = [Dimension::new(3), Dimension::new(2), Dimension::new(2)];
        assert!(random_states(&dims, 0.0, 1).unwrap().is_empty());
        let full = random_states(&dims, 1.0, 1).unwrap();
        assert_eq!(full.len(), 12);
        assert_eq!(full[1].0, Coord::from([1, 0, 0]));
        assert_eq!(full[3].0, Coord::from([0, 1, 0]));
        assert_eq!(full[11].0, Coord::from([2, 1, 1]));
    }

    #[test]
    fn random_fill_rejects_bad_input() {
        let dims = [Dimension::new(4)];
        assert!(matches!(
            random_states(&dims, 1.5, 0),
            Err(PatternError::InvalidDensity { .. })
        ));
        assert!(matches!(
            random_states(&dims, f64::NAN, 0),
            Err(PatternError::InvalidDensity { .. })
        ));
        assert!(matches!(
            random_states(&[], 0.5, 0),
            Err(PatternError::Grid(GridError::NoDimensions))
        ));
    }
}
