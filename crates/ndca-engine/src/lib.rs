//! Sparse active-frontier stepping for ndca automata.
//!
//! An [`Automaton`] owns a [`Grid`](ndca_space::Grid), a
//! [`Neighborhood`](ndca_space::Neighborhood), and a [`Rule`]. Each
//! [`step`](Automaton::step) runs the rule only on the active frontier:
//! cells that changed recently and the cells that can see them. Quiescent
//! regions cost nothing beyond the global commit sweep.
//!
//! # Quick start
//!
//! ```
//! use ndca_core::{Coord, Dimension};
//! use ndca_engine::{rule_fn, Automaton, AutomatonConfig};
//! use ndca_space::Neighborhood;
//!
//! // Cells copy their left neighbor: a single live cell walks right.
//! let config = AutomatonConfig::new(vec![Dimension::new(8)], 0u8);
//! let left = Neighborhood::from_offsets([Coord::from([-1])]).unwrap();
//! let mut ca: Automaton<u8> = Automaton::new(
//!     config,
//!     left,
//!     rule_fn(|ctx| {
//!         let next = ctx.neighbor_state(&Coord::from([-1])).copied().unwrap_or(0);
//!         ctx.set_state(next);
//!     }),
//! )
//! .unwrap();
//!
//! ca.initialize([(Coord::from([2]), 1)]).unwrap();
//! let grid = ca.step();
//! assert_eq!(grid.to_string(), "00010000");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod automaton;
pub mod config;
pub mod history;
pub mod metrics;
pub mod rule;

pub use automaton::Automaton;
pub use config::{AutomatonConfig, ConfigError};
pub use history::GridHistory;
pub use metrics::StepMetrics;
pub use rule::{rule_fn, Rule, RuleContext};
