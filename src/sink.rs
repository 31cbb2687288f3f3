//! Where finished profilers report to.

use crate::profiler::Summary;

/// Tracing target used for every profiler record.
pub const TARGET: &str = "profiler";

/// Durable, structured output of profiler summaries.
pub trait TelemetrySink {
    fn record(&self, summary: &Summary);
    fn notice(&self, msg: &str);
}

/// Human readable output, one line at a time.
pub trait Console {
    fn line(&self, line: &str);
}

/// Sends records to the process-wide `tracing` subscriber, or to the `log`
/// facade when no subscriber is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn record(&self, summary: &Summary) {
        let total = summary.total_display();
        tracing::info!(
            target: TARGET,
            function = "Profiler",
            level = summary.level,
            label = %summary.label,
            total = %total,
            "{}",
            summary.message()
        );
    }

    fn notice(&self, msg: &str) {
        tracing::info!(target: TARGET, "{msg}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Console for Stdout {
    fn line(&self, line: &str) {
        println!("{line}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;

    use serde_json::Value;
    use tempdir::TempDir;
    use tracing_subscriber::filter::LevelFilter;

    use super::{Console, TelemetrySink};
    use crate::logger;
    use crate::profiler::Summary;

    pub fn read_json_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// Runs `f` with the JSON subscriber as this thread's default and
    /// returns the lines it wrote.
    pub fn capture_json(f: impl FnOnce()) -> Vec<Value> {
        let dir = TempDir::new("profiler").unwrap();
        let path = dir.path().join(logger::DEFAULT_LOG_FILE);
        let writer = logger::file_writer(&path).unwrap();
        tracing::subscriber::with_default(logger::subscriber(writer, LevelFilter::INFO), f);
        read_json_lines(&path)
    }

    #[derive(Default)]
    pub struct MemorySink {
        records: RefCell<Vec<Summary>>,
        notices: RefCell<Vec<String>>,
    }

    impl MemorySink {
        pub fn records(&self) -> Vec<Summary> {
            self.records.borrow().clone()
        }

        pub fn notices(&self) -> Vec<String> {
            self.notices.borrow().clone()
        }
    }

    impl TelemetrySink for MemorySink {
        fn record(&self, summary: &Summary) {
            self.records.borrow_mut().push(summary.clone());
        }

        fn notice(&self, msg: &str) {
            self.notices.borrow_mut().push(msg.to_owned());
        }
    }

    #[derive(Default)]
    pub struct MemoryConsole {
        lines: RefCell<Vec<String>>,
    }

    impl MemoryConsole {
        pub fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }
    }

    impl Console for MemoryConsole {
        fn line(&self, line: &str) {
            self.lines.borrow_mut().push(line.to_owned());
        }
    }
}
