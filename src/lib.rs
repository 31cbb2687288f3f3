//! Level-gated checkpoint timing.
//!
//! ```no_run
//! use checkpoint_profiler::{set_profile_level, Profiler};
//!
//! set_profile_level(2);
//! let mut profiler = Profiler::new("load", 1);
//! profiler.tick("parsed");
//! profiler.tick("validated");
//! profiler.finish();
//! ```

mod level;
pub mod logger;
mod profiler;
mod sink;

pub use level::{profile_level, set_profile_level, set_profile_level_with, ProfilePolicy};
pub use profiler::{format_duration, Checkpoint, Profiler, Step, Summary};
pub use sink::{Console, LogSink, Stdout, TelemetrySink, TARGET};
