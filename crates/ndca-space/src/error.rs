//! Error types for grid construction and cell access.

use ndca_core::{Coord, ShapeError};
use std::error::Error;
use std::fmt;

/// Errors arising from grid construction or direct cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A position lies outside the configured dimensions.
    OutOfRange {
        /// The offending position.
        position: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A grid needs at least one dimension.
    NoDimensions,
    /// More dimensions than a coordinate can address.
    TooManyDimensions {
        /// Number of dimensions supplied.
        given: usize,
        /// The coordinate capacity.
        max: usize,
    },
    /// A dimension has zero cells.
    EmptyDimension {
        /// Index of the empty axis.
        axis: usize,
    },
    /// A dimension is larger than `i32` positions can address.
    DimensionTooLarge {
        /// Index of the axis.
        axis: usize,
        /// The configured size.
        size: u32,
    },
    /// The product of all dimension sizes does not fit in `usize`.
    CellCountOverflow,
    /// A coordinate or offset shape was malformed.
    Shape(ShapeError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { position, bounds } => {
                write!(f, "position {position} is out of range: {bounds}")
            }
            Self::NoDimensions => write!(f, "a grid needs at least one dimension"),
            Self::TooManyDimensions { given, max } => {
                write!(f, "{given} dimensions exceed the coordinate capacity of {max}")
            }
            Self::EmptyDimension { axis } => write!(f, "dimension {axis} has zero cells"),
            Self::DimensionTooLarge { axis, size } => {
                write!(f, "dimension {axis} size {size} exceeds i32::MAX")
            }
            Self::CellCountOverflow => write!(f, "total cell count overflows usize"),
            Self::Shape(e) => write!(f, "malformed shape: {e}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for GridError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}
