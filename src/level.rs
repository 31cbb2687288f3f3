//! Process-wide profiling level.
//!
//! The level is set once during startup, before any thread creates a
//! [`Profiler`]. A profiler created concurrently with [`set_profile_level`]
//! may observe either the old or the new level; callers must finish setup
//! before instrumented code runs on other threads.

use std::borrow::Cow;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::profiler::Profiler;
use crate::sink::{Console, LogSink, Stdout, TelemetrySink};

static PROFILE_LEVEL: AtomicI64 = AtomicI64::new(0);

/// The current process-wide profiling level. Defaults to 0.
pub fn profile_level() -> i64 {
    PROFILE_LEVEL.load(Ordering::Relaxed)
}

/// Sets the process-wide profiling level.
///
/// All profilers created afterwards at or below this level record and
/// report their checkpoints. Profilers created before the call keep the
/// decision they made at creation.
pub fn set_profile_level(level: i64) {
    set_profile_level_with(level, &LogSink, &Stdout);
}

pub fn set_profile_level_with(level: i64, sink: &dyn TelemetrySink, console: &dyn Console) {
    let msg = format!(" - Enabling Profiling Level {level}");
    PROFILE_LEVEL.store(level, Ordering::Relaxed);
    console.line(&msg);
    sink.notice(&msg);
}

/// A snapshot of the profiling level, passed to the code that creates profilers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy {
    level: i64,
}

impl ProfilePolicy {
    pub const fn new(level: i64) -> Self {
        Self { level }
    }

    /// Takes the process-wide level as it is right now.
    pub fn current() -> Self {
        Self::new(profile_level())
    }

    pub const fn level(&self) -> i64 {
        self.level
    }

    pub const fn is_active(&self, level: i64) -> bool {
        level <= self.level
    }

    pub fn profiler(&self, label: impl Into<Cow<'static, str>>, level: i64) -> Profiler {
        Profiler::with_active(label, level, self.is_active(level))
    }
}

impl Default for ProfilePolicy {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::testing::{capture_json, MemoryConsole, MemorySink};

    #[test]
    fn test_policy_gating() {
        for threshold in -3..=3 {
            let policy = ProfilePolicy::new(threshold);
            for level in -5..=5 {
                assert_eq!(policy.is_active(level), level <= threshold);
                assert_eq!(
                    policy.profiler("gate", level).is_active(),
                    level <= threshold
                );
            }
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = ProfilePolicy::default();
        assert_eq!(policy.level(), 0);
        assert!(policy.is_active(0));
        assert!(!policy.is_active(1));
    }

    // The only test that touches the process-wide level.
    #[test]
    fn test_global_level() {
        assert_eq!(profile_level(), 0);
        assert!(Profiler::new("x", 0).is_active());
        assert!(!Profiler::new("x", 1).is_active());

        let dormant = Profiler::new("before", 2);

        let sink = MemorySink::default();
        let console = MemoryConsole::default();
        set_profile_level_with(2, &sink, &console);

        assert_eq!(profile_level(), 2);
        assert_eq!(ProfilePolicy::current(), ProfilePolicy::new(2));
        assert!(Profiler::new("load", 1).is_active());
        assert!(Profiler::new("load", 2).is_active());
        assert!(!Profiler::new("load", 3).is_active());
        assert!(!dormant.is_active());

        assert_eq!(console.lines(), vec![" - Enabling Profiling Level 2"]);
        assert_eq!(sink.notices(), vec![" - Enabling Profiling Level 2"]);
        assert!(sink.records().is_empty());

        let lines = capture_json(|| set_profile_level_with(-1, &LogSink, &console));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["target"], "profiler");
        assert_eq!(lines[0]["fields"]["message"], " - Enabling Profiling Level -1");
        assert_eq!(profile_level(), -1);
        assert!(!Profiler::new("x", 0).is_active());
        assert!(Profiler::new("x", -1).is_active());
        set_profile_level_with(0, &sink, &console);
    }
}
