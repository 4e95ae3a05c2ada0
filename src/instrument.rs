//! Lightweight wall-clock instrumentation.
//!
//! A plain accumulator rather than a global sink, since this crate has one
//! entry point (`layout_table`) rather than thousands of call sites spread
//! across a whole compiler. Nothing here is required for correct layout;
//! it's opt-in bookkeeping a caller can use to see where time went.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cumulative wall-clock time spent in named phases of a `layout_table`
/// call, keyed by phase name (`"split_point"`, `"partial_row"`).
#[derive(Debug, Default, Clone)]
pub struct Timings {
    totals: HashMap<&'static str, Duration>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time recorded under `name` so far, or zero if never recorded.
    pub fn get(&self, name: &str) -> Duration {
        self.totals.get(name).copied().unwrap_or_default()
    }

    /// Adds `elapsed` to the running total for `name`.
    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        *self.totals.entry(name).or_insert(Duration::ZERO) += elapsed;
    }

    /// Opens an RAII scope that adds its elapsed wall-clock time to `name`
    /// when dropped. Convenient for call sites that don't already hold an
    /// `Instant`.
    pub fn scope(&mut self, name: &'static str) -> TimingScope<'_> {
        TimingScope { timings: self, name, start: Instant::now() }
    }
}

/// Guard returned by [`Timings::scope`]; records elapsed time on drop.
pub struct TimingScope<'a> {
    timings: &'a mut Timings,
    name: &'static str,
    start: Instant,
}

impl Drop for TimingScope<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.timings.record(self.name, elapsed);
    }
}

/// Per-call context threaded through [`crate::driver::layout_table_with_context`].
///
/// Currently carries only the optional timings sink; grows as a small
/// `*Context` struct at the layout entry point rather than adding
/// parameters one at a time.
#[derive(Default)]
pub struct LayoutContext<'a> {
    pub timings: Option<&'a mut Timings>,
}

impl<'a> LayoutContext<'a> {
    pub fn new() -> Self {
        Self { timings: None }
    }

    pub fn with_timings(timings: &'a mut Timings) -> Self {
        Self { timings: Some(timings) }
    }

    /// Records `elapsed` under `name` if a timings sink is attached.
    pub(crate) fn record(&mut self, name: &'static str, elapsed: Duration) {
        if let Some(timings) = self.timings.as_mut() {
            timings.record(name, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn scope_records_elapsed_time() {
        let mut timings = Timings::new();
        {
            let _scope = timings.scope("split_point");
            thread::sleep(Duration::from_millis(1));
        }
        assert!(timings.get("split_point") >= Duration::from_millis(1));
        assert_eq!(timings.get("never_recorded"), Duration::ZERO);
    }

    #[test]
    fn record_accumulates_across_calls() {
        let mut timings = Timings::new();
        timings.record("partial_row", Duration::from_millis(5));
        timings.record("partial_row", Duration::from_millis(7));
        assert_eq!(timings.get("partial_row"), Duration::from_millis(12));
    }
}
