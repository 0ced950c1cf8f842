use clap::{Parser, ValueEnum};
use kspt::clock::ClockKind;
use kspt::driver::Driver;
use kspt::harness::{BenchConfig, Profile};
use kspt::report::{render_outcome, render_text};
use kspt::schema::{ProfileReport, RunMeta, SCHEMA_VERSION};
use kspt::{logging, workloads, WorkloadKind};
use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Quick,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "kspt")]
#[command(about = "Times workloads run back to back and with one thread per cycle")]
struct Args {
    /// Parameter scale; `quick` shrinks the sieve and sort inputs.
    #[arg(long, value_enum, default_value_t = ProfileArg::Full)]
    profile: ProfileArg,

    /// Which workload(s) to benchmark.
    #[arg(long, value_enum, default_value_t = WorkloadKind::All)]
    workload: WorkloadKind,

    /// Override the cycle count of every workload.
    #[arg(long)]
    cycles: Option<u32>,

    /// Seed for workloads that generate random input.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = ClockKind::Monotonic)]
    clock: ClockKind,

    /// Also measure a bounded worker pool of this size (at least 1).
    #[arg(long, value_name = "N")]
    pool_workers: Option<NonZeroUsize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Where to write the report. If omitted, prints to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log level for diagnostics on stderr (combined with RUST_LOG).
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

fn now_utc() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Best-effort: read from environment set by CI/build scripts.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

fn run(args: Args) -> kspt::Result<()> {
    let cfg = BenchConfig {
        profile: args.profile.into(),
        seed: args.seed,
        cycles: args.cycles,
        pool_workers: args.pool_workers,
    };

    let specs = workloads::catalog(&cfg, args.workload);
    let mut driver = Driver::new(args.clock.build());
    if let Some(workers) = cfg.pool_workers {
        driver = driver.with_pool(workers)?;
    }

    // Plain console mode prints each block as soon as it is measured.
    if let (OutputFormat::Text, None) = (args.format, &args.out) {
        let stdout = io::stdout();
        for spec in specs {
            let outcome = driver.run_benchmark(spec)?;
            let mut out = stdout.lock();
            out.write_all(render_outcome(&outcome).as_bytes())?;
            out.flush()?;
        }
        return Ok(());
    }

    let outcomes = driver.run_all(specs)?;
    let body = match args.format {
        OutputFormat::Text => render_text(&outcomes),
        OutputFormat::Json => {
            let report = ProfileReport::new(
                RunMeta {
                    schema_version: SCHEMA_VERSION,
                    tool_version: env!("CARGO_PKG_VERSION").to_string(),
                    profile: cfg.profile.as_str().to_string(),
                    clock: driver.clock_name().to_string(),
                    seed: cfg.seed,
                    timestamp_utc: now_utc(),
                    git_sha: git_sha_short(),
                },
                &outcomes,
            );
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    match args.out {
        Some(path) => fs::write(path, body)?,
        None => print!("{body}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kspt: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_reproduces_the_default_run() {
        let args = Args::try_parse_from(["kspt"]).unwrap();
        assert!(matches!(args.profile, ProfileArg::Full));
        assert_eq!(args.workload, WorkloadKind::All);
        assert!(args.pool_workers.is_none());
    }

    #[test]
    fn pool_workers_must_be_positive() {
        assert!(Args::try_parse_from(["kspt", "--pool-workers", "0"]).is_err());
        let args = Args::try_parse_from(["kspt", "--pool-workers", "3"]).unwrap();
        assert_eq!(args.pool_workers.map(NonZeroUsize::get), Some(3));
    }
}
