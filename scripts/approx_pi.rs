// scripts/approx_pi.rs
use clap::Parser;
use fast_pi::output;
use fast_pi::rng::{Generator, DEFAULT_SEED};
use fast_pi::{estimate_detailed, EstimateRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "approx-pi")]
#[command(about = "Estimate pi by parallel Monte Carlo sampling of the unit square")]
#[command(version)]
struct Args {
    /// Total number of samples across all workers
    #[arg(short, long, default_value_t = 100_000_000, allow_hyphen_values = true)]
    samples: i64,

    /// Number of independent batches (one random stream each)
    #[arg(short, long, default_value_t = 4, allow_hyphen_values = true)]
    workers: i64,

    /// Base seed shared by all streams
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Generator family: philox or std
    #[arg(long, default_value_t = Generator::Philox)]
    generator: Generator,

    /// Dedicated thread pool size (defaults to the global pool, one thread per CPU)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write per-batch results to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log per-batch progress
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!(
        samples = args.samples,
        workers = args.workers,
        seed = args.seed,
        generator = %args.generator,
        cpus = num_cpus::get(),
        "starting estimation"
    );

    let request = EstimateRequest {
        total_samples: args.samples,
        worker_count: args.workers,
        seed: args.seed,
        generator: args.generator,
        threads: args.threads,
    };

    let report = match estimate_detailed(&request) {
        Ok(report) => report,
        Err(e) => {
            error!(kind = ?e.kind(), "{}", e);
            return ExitCode::from(e.kind().exit_code() as u8);
        }
    };

    if let Some(path) = &args.csv {
        if let Err(e) = output::write_batches_to_csv(path, &report.results) {
            error!(path = %path.display(), "failed to write CSV: {}", e);
            return ExitCode::FAILURE;
        }
        info!(path = %path.display(), "per-batch results written");
    }

    info!(
        standard_error = report.standard_error(),
        samples_per_sec = report.samples_per_sec(),
        "done"
    );
    println!("Approx result: {}", report.value);
    ExitCode::SUCCESS
}
