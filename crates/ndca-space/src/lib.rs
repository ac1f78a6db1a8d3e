//! Grid storage and neighborhood resolution for ndca automata.
//!
//! This crate owns the spatial side of the engine:
//!
//! - [`Cell`]: one location's committed state, pending state, and history
//! - [`Grid`]: a dense coordinate-to-cell map over a fixed set of
//!   [`Dimension`](ndca_core::Dimension)s, with bounds checks and snapshots
//! - [`Neighborhood`]: a reusable set of relative offsets and the wrap-aware
//!   algorithm that turns them into concrete neighbor cells
//!
//! Nothing here knows about rules or stepping; see `ndca-engine` for that.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod neighborhood;

pub use cell::{Cell, CellHistory};
pub use error::GridError;
pub use grid::Grid;
pub use neighborhood::{wrap_position, NeighborMap, Neighborhood};
