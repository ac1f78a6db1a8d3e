//! ndca: dimension-agnostic cellular automata.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! ndca sub-crates. For most users, adding `ndca` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ndca::prelude::*;
//!
//! // Conway's Game of Life on a 16x16 torus.
//! let torus = Dimension::new(16).wrapping();
//! let config = AutomatonConfig::new(vec![torus, torus], 0u8);
//! let mut ca: Automaton<u8> =
//!     Automaton::new(config, Neighborhood::moore(), LifeLike::conway()).unwrap();
//!
//! // A blinker flips between horizontal and vertical.
//! ca.initialize((4..=6).map(|x| (Coord::from([x, 5]), 1))).unwrap();
//! ca.step();
//! assert_eq!(*ca.grid().cell_value(&Coord::from([5, 4])).unwrap(), 1);
//! assert_eq!(*ca.grid().cell_value(&Coord::from([4, 5])).unwrap(), 0);
//! assert_eq!(ca.tick(), TickId(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ndca-core` | Coordinates, dimensions, ids |
//! | [`space`] | `ndca-space` | Cells, grids, neighborhoods, wrapping |
//! | [`engine`] | `ndca-engine` | Automaton, rules, history, metrics |
//! | [`rules`] | `ndca-rules` | Reference rules, pattern loaders, rendering |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, dimensions, and ids (`ndca-core`).
pub use ndca_core as types;

/// Cells, grids, and neighborhoods (`ndca-space`).
///
/// [`space::Grid`] stores the cells; [`space::Neighborhood`] resolves
/// relative offsets against it with each axis's wrap policy.
pub use ndca_space as space;

/// The stepping engine (`ndca-engine`).
///
/// [`engine::Automaton`] runs a [`engine::Rule`] over the active frontier.
pub use ndca_engine as engine;

/// Reference rules and utilities (`ndca-rules`).
pub use ndca_rules as rules;

/// Common imports for typical ndca usage.
///
/// ```rust
/// use ndca::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ndca_core::{CellId, Coord, Dimension, TickId};

    // Space
    pub use ndca_space::{Cell, CellHistory, Grid, Neighborhood};

    // Errors
    pub use ndca_core::ShapeError;
    pub use ndca_engine::ConfigError;
    pub use ndca_space::GridError;

    // Engine
    pub use ndca_engine::{rule_fn, Automaton, AutomatonConfig, Rule, RuleContext, StepMetrics};

    // Rules
    pub use ndca_rules::{Elementary, LifeLike, Mnca};
}
