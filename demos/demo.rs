// demos/demo.rs
use fast_pi::mc::kernel::run_batch_with;
use fast_pi::rng::{Generator, RngFactory};
use fast_pi::{estimate_detailed, EstimateRequest, SampleBatch};
use std::f64::consts::PI;

fn main() {
    println!("Running fast-pi Monte Carlo Demo\n");

    let samples = 40_000_000;
    let workers = 8;

    // --- Single batch ---
    let factory = RngFactory::default();
    let batch = SampleBatch::new(1_000_000, 0).expect("Valid batch");
    let result = run_batch_with(&factory, batch);
    println!("Single batch (stream 0, 1M samples):");
    println!("  Hits: {} / {}", result.hits, result.total);
    println!("  Estimate: {:.6} (error {:.2e})", result.estimate(), (result.estimate() - PI).abs());
    println!();

    // --- Parallel estimate, both generator families ---
    for generator in [Generator::Philox, Generator::Std] {
        let request = EstimateRequest {
            generator,
            ..EstimateRequest::new(samples, workers)
        };
        let report = estimate_detailed(&request).expect("Valid request");

        println!("Parallel estimate ({}, {} workers, {} samples):", generator, workers, samples);
        for (stream, estimate) in report.worker_estimates().iter().enumerate() {
            println!("  stream {:>2}: {:.6}", stream, estimate);
        }
        println!("  Mean estimate:   {:.8}", report.value);
        println!("  Pooled estimate: {:.8}", report.pooled_estimate());
        println!("  Abs error:       {:.2e}", (report.value - PI).abs());
        println!("  Std error:       {:.2e}", report.standard_error());
        if let Some(spread) = report.spread() {
            println!("  Worker spread:   {:.2e}", spread);
        }
        if let Some((lo, hi)) = report.confidence_interval(0.99) {
            println!("  99% CI:          [{:.6}, {:.6}]", lo, hi);
        }
        println!("  Throughput:      {:.0} samples/sec\n", report.samples_per_sec());
    }
}
