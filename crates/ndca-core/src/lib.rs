//! Core types for the ndca cellular-automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! grid address type [`Coord`], per-axis [`Dimension`] specs, strongly-typed
//! identifiers, and the [`ShapeError`] raised by malformed coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod dimension;
pub mod error;
pub mod id;

pub use coord::{Coord, MAX_AXES};
pub use dimension::{describe_bounds, is_in_bounds, Dimension};
pub use error::ShapeError;
pub use id::{CellId, TickId};
