//! Reference rules and utilities for ndca automata.
//!
//! # Rules
//!
//! - [`LifeLike`]: outer-totalistic birth/survival rules (`B3/S23`)
//! - [`Elementary`]: Wolfram elementary rules, flat or extruded into 3-D
//! - [`Mnca`]: multi-neighborhood rules with threshold bands
//! - [`GeneralizedElementary`]: 5-tap elementary rule, searched by
//!   [`RuleSearch`]
//!
//! # Utilities
//!
//! - [`pattern`]: text-mask loaders for neighborhoods and initial states,
//!   plus seeded random fills
//! - [`render`]: plain-text pictures of 2-D slices

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod elementary;
pub mod life;
pub mod mnca;
pub mod pattern;
pub mod render;
pub mod reverse;

pub use elementary::Elementary;
pub use life::{LifeLike, RulestringError};
pub use mnca::{Band, Mnca, Shell};
pub use pattern::PatternError;
pub use reverse::{GeneralizedElementary, RuleSearch, SearchError, SearchOutcome};
