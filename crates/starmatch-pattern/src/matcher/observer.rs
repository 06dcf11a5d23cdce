use super::Hypothesis;

/// Hook into the pattern search for progress reporting or diagnostics.
///
/// Both methods default to doing nothing. In the parallel search the
/// callbacks fire after the workers finish, in ranking order.
pub trait SearchObserver {
    /// `done` of `total` outer segments have been scanned.
    fn on_progress(&mut self, _done: usize, _total: usize) {}

    /// A candidate cleared `min_matches` (not yet verified).
    fn on_candidate(&mut self, _candidate: &Hypothesis) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
