use std::borrow::Cow;
use std::time::{Duration, Instant};

use crate::level::ProfilePolicy;
use crate::sink::{Console, LogSink, Stdout, TelemetrySink};

const START: &str = "start";

/// A named point in time recorded by a [`Profiler`].
#[derive(Debug, Clone)]
pub struct Checkpoint {
    name: Cow<'static, str>,
    time: Instant,
}

impl Checkpoint {
    fn now(name: Cow<'static, str>) -> Self {
        Self {
            name,
            time: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn time(&self) -> Instant {
        self.time
    }
}

/// Tracks a series of checkpoints to time how long a code path takes.
///
/// Whether the profiler is active is decided once, when it is created, by
/// comparing its level with the profiling level. A dormant profiler ignores
/// every call: `tick` and `finish` are a single branch and never read the
/// clock or allocate. Pass the label as a `&'static str` to keep a dormant
/// profiler allocation free from creation on.
///
/// `finish` does not freeze the profiler. Calling it again reports the
/// current checkpoint list, including any ticks recorded in between.
#[derive(Debug)]
pub struct Profiler {
    label: Cow<'static, str>,
    level: i64,
    active: bool,
    start: Checkpoint,
    ticks: Vec<Checkpoint>,
}

impl Profiler {
    /// Creates a profiler gated by the process-wide profiling level.
    pub fn new(label: impl Into<Cow<'static, str>>, level: i64) -> Self {
        ProfilePolicy::current().profiler(label, level)
    }

    pub(crate) fn with_active(
        label: impl Into<Cow<'static, str>>,
        level: i64,
        active: bool,
    ) -> Self {
        Self {
            label: label.into(),
            level,
            active,
            start: Checkpoint::now(Cow::Borrowed(START)),
            ticks: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn level(&self) -> i64 {
        self.level
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// All checkpoints in insertion order, beginning with "start".
    pub fn checkpoints(&self) -> impl Iterator<Item = &Checkpoint> {
        std::iter::once(&self.start).chain(self.ticks.iter())
    }

    /// Records the current time under `name`.
    #[inline]
    pub fn tick(&mut self, name: &str) {
        if self.active {
            self.ticks.push(Checkpoint::now(Cow::Owned(name.to_owned())));
        }
    }

    /// What `finish` would report right now, or `None` for a dormant profiler.
    pub fn summary(&self) -> Option<Summary> {
        if !self.active {
            return None;
        }

        let last = self.ticks.last().unwrap_or(&self.start);
        let steps = self
            .checkpoints()
            .zip(self.ticks.iter())
            .map(|(previous, checkpoint)| Step {
                name: checkpoint.name().to_owned(),
                elapsed: checkpoint.time.saturating_duration_since(previous.time),
            })
            .collect();

        Some(Summary {
            label: self.label.to_string(),
            level: self.level,
            total: last.time.saturating_duration_since(self.start.time),
            steps,
        })
    }

    /// Reports the checkpoints to the `log` facade and to stdout.
    pub fn finish(&self) {
        self.finish_with(&LogSink, &Stdout);
    }

    pub fn finish_with(&self, sink: &dyn TelemetrySink, console: &dyn Console) {
        if let Some(summary) = self.summary() {
            sink.record(&summary);
            console.line(&summary.console_line());
        }
    }
}

/// Time spent between a checkpoint and the one before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub elapsed: Duration,
}

/// The report of a finished profiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub label: String,
    pub level: i64,
    /// Last checkpoint minus the first one.
    pub total: Duration,
    pub steps: Vec<Step>,
}

impl Summary {
    pub fn total_display(&self) -> String {
        format_duration(self.total)
    }

    /// `\t<name>:<elapsed>` for every step, empty when nothing was ticked.
    pub fn message(&self) -> String {
        self.steps
            .iter()
            .map(|step| format!("\t{}:{}", step.name, format_duration(step.elapsed)))
            .collect()
    }

    pub fn console_line(&self) -> String {
        format!(
            "Total: {}\t({}) {}\t{}",
            self.total_display(),
            self.level,
            self.label,
            self.message()
        )
    }
}

pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}
