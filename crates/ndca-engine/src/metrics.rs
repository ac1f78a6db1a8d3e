//! Per-step performance metrics for the stepping engine.
//!
//! [`StepMetrics`] captures timing and frontier data for a single step,
//! for profiling and for tests that check the frontier stays small.

/// Timing and frontier metrics collected during a single step.
///
/// All durations are in microseconds. The engine populates these fields
/// after each `step()` call; read them with
/// [`Automaton::last_metrics`](crate::Automaton::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent resolving neighbors and running the rule, in microseconds.
    pub rule_us: u64,
    /// Time spent in the global commit sweep, in microseconds.
    pub commit_us: u64,
    /// Time spent copying the grid into history, in microseconds.
    pub snapshot_us: u64,
    /// Number of cells the rule was invoked for.
    pub visited_cells: usize,
    /// Number of cells whose committed state changed.
    pub changed_cells: usize,
    /// Size of the active frontier after pruning and growth.
    pub active_cells: usize,
    /// Number of retained grid snapshots after the step.
    pub history_len: usize,
}
