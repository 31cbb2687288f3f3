use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use checkpoint_profiler::logger::{self, LogTarget, DEFAULT_LOG_FILE};
use checkpoint_profiler::{set_profile_level, ProfilePolicy, Profiler};

mod macros;
use macros::exit_on_error;

#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        help = "Profilers at or below this level record and report."
    )]
    profile_level: i64,

    #[arg(
        long,
        default_value = DEFAULT_LOG_FILE,
        help = "File the JSON log lines are appended to."
    )]
    log_file: PathBuf,

    #[arg(
        long,
        default_value_t = false,
        help = "Log plain text to the console instead of JSON to a file."
    )]
    plain_log: bool,
}

/// Runs a few profiled steps at levels 0 to 2.
///
/// Only the profilers at or below --profile-level print a summary.
fn main() {
    let args = Cli::parse();

    if args.plain_log {
        exit_on_error!(simple_logger::init_with_level(log::Level::Info), 1);
    } else {
        let target = exit_on_error!(logger::init(&args.log_file, LevelFilter::INFO), 1);
        if let LogTarget::File(path) = target {
            log::info!("logging to {}", path.display());
        }
    }

    set_profile_level(args.profile_level);
    let policy = ProfilePolicy::current();

    let mut outer = Profiler::new("demo", 0);
    for level in 0_u8..=2 {
        run_job(policy, level);
        outer.tick(&format!("job {level}"));
    }
    outer.finish();
}

fn run_job(policy: ProfilePolicy, level: u8) {
    let mut profiler = policy.profiler(format!("job {level}"), i64::from(level));
    for step in ["read", "parse", "write"] {
        thread::sleep(Duration::from_millis(5 * (u64::from(level) + 1)));
        profiler.tick(step);
    }
    profiler.finish();
}
