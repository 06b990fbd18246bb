// scripts/benchmark.rs
use fast_pi::output;
use fast_pi::rng::Generator;
use fast_pi::{estimate_detailed, EstimateRequest, PiResult};
use std::env;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{self, Write};
use tracing::info;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rayon_threads: usize,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(not(target_os = "linux"))]
        {
            "Unknown CPU".to_string()
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    generator: Generator,
    workers: i64,
    samples: i64,
    time_ms: f64,
    throughput_samples_per_sec: f64,
    value: f64,
    abs_error: f64,
    standard_error: f64,
}

fn run_benchmarks(samples: i64) -> PiResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let max_workers = num_cpus::get().max(1) as i64;

    let mut worker_counts = vec![1, 2, 4, max_workers, 2 * max_workers];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for generator in [Generator::Philox, Generator::Std] {
        for &workers in &worker_counts {
            info!(%generator, workers, samples, "running benchmark");

            let request = EstimateRequest {
                generator,
                ..EstimateRequest::new(samples, workers)
            };

            let report = estimate_detailed(&request)?;

            results.push(BenchmarkResult {
                generator,
                workers,
                samples,
                time_ms: report.elapsed_ms,
                throughput_samples_per_sec: report.samples_per_sec(),
                value: report.value,
                abs_error: (report.value - PI).abs(),
                standard_error: report.standard_error(),
            });
        }
    }

    Ok(results)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Generator,Workers,Samples,Time_ms,Throughput_samples_per_sec,Value,Abs_Error,Std_Error"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.2},{:.0},{:.8},{:.8},{:.8}",
            result.generator,
            result.workers,
            result.samples,
            result.time_ms,
            result.throughput_samples_per_sec,
            result.value,
            result.abs_error,
            result.standard_error
        )?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let samples: i64 = env::args()
        .nth(1)
        .map(|s| s.parse::<i64>())
        .transpose()?
        .unwrap_or(20_000_000);

    println!("fast-pi Benchmark Suite");
    println!("=======================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!();

    let results = run_benchmarks(samples)?;

    println!("\n{:=<88}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<88}", "");
    println!(
        "{:<8} {:>8} {:>12} {:>12} {:>18} {:>12} {:>12}",
        "RNG", "Workers", "Samples", "Time (ms)", "Samples/sec", "Value", "Abs Error"
    );
    println!("{:-<88}", "");
    for result in &results {
        println!(
            "{:<8} {:>8} {:>12} {:>12.2} {:>18.0} {:>12.6} {:>12.2e}",
            result.generator.to_string(),
            result.workers,
            result.samples,
            result.time_ms,
            result.throughput_samples_per_sec,
            result.value,
            result.abs_error
        );
    }
    println!("{:=<88}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&results, &system_info, &filename)?;

    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.throughput_samples_per_sec.total_cmp(&b.throughput_samples_per_sec))
    {
        output::write_summary_to_csv(
            format!("benchmark_summary_{}.csv", timestamp),
            &[
                ("best_generator", best.generator.to_string()),
                ("best_workers", best.workers.to_string()),
                ("samples_per_sec", format!("{:.0}", best.throughput_samples_per_sec)),
                ("rayon_threads", system_info.rayon_threads.to_string()),
            ],
        )?;
    }

    println!("\nResults saved to: {}", filename);
    println!("Run: cargo run --bin benchmark --release [samples]");
    Ok(())
}
