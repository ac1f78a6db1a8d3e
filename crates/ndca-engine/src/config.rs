//! Automaton configuration, validation, and error types.
//!
//! [`AutomatonConfig`] is the construction input for an
//! [`Automaton`](crate::Automaton). [`validate()`](AutomatonConfig::validate)
//! checks structural invariants and is called by
//! [`Automaton::new`](crate::Automaton::new), so a bad configuration fails
//! before any cell is allocated.

use std::error::Error;
use std::fmt;

use ndca_core::Dimension;
use ndca_space::{CellHistory, Grid, GridError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`AutomatonConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `keep_all_grid_states` is set while `keep_any_grid_states` is not.
    KeepAllWithoutKeepAny,
    /// Bounded grid history with `grid_states_memory_limit == 0`.
    ZeroHistoryLimit,
    /// [`CellHistory::Bounded`] with a limit of 0.
    ZeroCellHistoryLimit,
    /// The dimensions cannot form a grid.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepAllWithoutKeepAny => write!(
                f,
                "keep_all_grid_states requires keep_any_grid_states to be enabled"
            ),
            Self::ZeroHistoryLimit => {
                write!(f, "grid_states_memory_limit must be at least 1")
            }
            Self::ZeroCellHistoryLimit => {
                write!(f, "bounded cell history limit must be at least 1")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── AutomatonConfig ────────────────────────────────────────────────

/// Complete configuration for constructing an automaton.
///
/// Grid history is controlled by two flags: `keep_any_grid_states` turns
/// snapshotting on, and `keep_all_grid_states` lifts the
/// `grid_states_memory_limit` bound. Retaining everything while retaining
/// nothing is rejected.
#[derive(Clone, Debug)]
pub struct AutomatonConfig<S> {
    /// One entry per active axis.
    pub dimensions: Vec<Dimension>,
    /// State every cell starts with.
    pub default_state: S,
    /// Snapshot the grid after every step. Default: `false`.
    pub keep_any_grid_states: bool,
    /// Never evict snapshots. Default: `false`.
    pub keep_all_grid_states: bool,
    /// Snapshots retained when not keeping all. Default: 10.
    pub grid_states_memory_limit: usize,
    /// Per-cell history policy. Default: [`CellHistory::Disabled`].
    pub cell_history: CellHistory,
}

impl<S> AutomatonConfig<S> {
    /// Default for [`grid_states_memory_limit`](Self::grid_states_memory_limit).
    pub const DEFAULT_GRID_STATES_MEMORY_LIMIT: usize = 10;

    /// A configuration with no history retention.
    pub fn new(dimensions: Vec<Dimension>, default_state: S) -> Self {
        Self {
            dimensions,
            default_state,
            keep_any_grid_states: false,
            keep_all_grid_states: false,
            grid_states_memory_limit: Self::DEFAULT_GRID_STATES_MEMORY_LIMIT,
            cell_history: CellHistory::Disabled,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The dimensions must describe a non-empty, addressable grid.
        Grid::<S>::validate_dimensions(&self.dimensions)?;
        // 2. Retaining all snapshots implies retaining some.
        if self.keep_all_grid_states && !self.keep_any_grid_states {
            return Err(ConfigError::KeepAllWithoutKeepAny);
        }
        // 3. A bounded history must be able to hold something.
        if self.keep_any_grid_states
            && !self.keep_all_grid_states
            && self.grid_states_memory_limit == 0
        {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        if self.cell_history == CellHistory::Bounded(0) {
            return Err(ConfigError::ZeroCellHistoryLimit);
        }
        Ok(())
    }

    /// Snapshot retention derived from the flags: `None` when disabled,
    /// `Some(None)` when unbounded, `Some(Some(n))` when bounded.
    pub(crate) fn grid_history_limit(&self) -> Option<Option<usize>> {
        match (self.keep_any_grid_states, self.keep_all_grid_states) {
            (false, _) => None,
            (true, true) => Some(None),
            (true, false) => Some(Some(self.grid_states_memory_limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AutomatonConfig<u8> {
        AutomatonConfig::new(vec![Dimension::new(4), Dimension::new(4)], 0)
    }

    #[test]
    fn defaults_are_valid() {
        let c = config();
        assert!(!c.keep_any_grid_states);
        assert!(!c.keep_all_grid_states);
        assert_eq!(c.grid_states_memory_limit, 10);
        assert_eq!(c.cell_history, CellHistory::Disabled);
        assert!(c.validate().is_ok());
        assert_eq!(c.grid_history_limit(), None);
    }

    #[test]
    fn keep_all_without_keep_any_rejected() {
        let mut c = config();
        c.keep_all_grid_states = true;
        assert_eq!(c.validate(), Err(ConfigError::KeepAllWithoutKeepAny));
    }

    #[test]
    fn zero_limits_rejected() {
        let mut c = config();
        c.keep_any_grid_states = true;
        c.grid_states_memory_limit = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroHistoryLimit));

        // Irrelevant when keeping everything.
        c.keep_all_grid_states = true;
        assert!(c.validate().is_ok());
        assert_eq!(c.grid_history_limit(), Some(None));

        let mut c = config();
        c.cell_history = CellHistory::Bounded(0);
        assert_eq!(c.validate(), Err(ConfigError::ZeroCellHistoryLimit));
    }

    #[test]
    fn bad_dimensions_wrap_grid_error() {
        let c = AutomatonConfig::new(Vec::new(), 0u8);
        let err = c.validate().unwrap_err();
        assert_eq!(err, ConfigError::Grid(GridError::NoDimensions));
        assert!(err.source().is_some());
    }

    #[test]
    fn bounded_limit_reported() {
        let mut c = config();
        c.keep_any_grid_states = true;
        c.grid_states_memory_limit = 3;
        assert_eq!(c.grid_history_limit(), Some(Some(3)));
    }
}
