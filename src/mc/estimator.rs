// src/mc/estimator.rs
use crate::error::{validation::*, PiResult};
use crate::math_utils::{z_score, Timer};
use crate::mc::kernel::{run_batch_with, BatchResult, SampleBatch};
use crate::rng::{Generator, RngFactory, DEFAULT_SEED};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use statrs::statistics::Statistics;
use tracing::{debug, info, warn};

/// Parameters for one estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    pub total_samples: i64,
    pub worker_count: i64,
    pub seed: u64,
    pub generator: Generator,
    /// Size of a dedicated thread pool; `None` runs on rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for EstimateRequest {
    fn default() -> Self {
        EstimateRequest {
            total_samples: 100_000_000,
            worker_count: 4,
            seed: DEFAULT_SEED,
            generator: Generator::Philox,
            threads: None,
        }
    }
}

impl EstimateRequest {
    pub fn new(total_samples: i64, worker_count: i64) -> Self {
        EstimateRequest {
            total_samples,
            worker_count,
            ..Default::default()
        }
    }

    /// Validate the request
    pub fn validate(&self) -> PiResult<()> {
        validate_positive("total_samples", self.total_samples)?;
        validate_positive("worker_count", self.worker_count)?;
        if let Some(threads) = self.threads {
            validate_threads(threads)?;
        }
        Ok(())
    }

    pub fn factory(&self) -> RngFactory {
        RngFactory::with_generator(self.seed, self.generator)
    }

    /// Workers that receive at least one sample: `min(worker_count, total_samples)`.
    pub fn active_workers(&self) -> i64 {
        self.worker_count.min(self.total_samples).max(0)
    }

    /// Split the sample budget into one batch per worker.
    ///
    /// Batch `i` gets `total / workers` samples, plus one for the first
    /// `total % workers` batches, and stream id `i`. Only the non-empty
    /// batches are returned: when `worker_count > total_samples` the workers
    /// from `total_samples` on would sample nothing.
    pub fn partition(&self) -> PiResult<Vec<SampleBatch>> {
        self.validate()?;
        let base = self.total_samples / self.worker_count;
        let remainder = self.total_samples % self.worker_count;

        (0..self.active_workers())
            .map(|i| SampleBatch::new(base + i64::from(i < remainder), i))
            .collect()
    }
}

/// Result of an estimation run, with the per-worker detail it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateReport {
    /// Mean of the per-worker estimates over all `worker_count` workers
    pub value: f64,
    /// Results of the non-empty batches, indexed by stream id
    pub results: Vec<BatchResult>,
    /// Requested workers, including those left with zero samples
    pub worker_count: u64,
    pub seed: u64,
    pub generator: Generator,
    pub elapsed_ms: f64,
}

impl EstimateReport {
    /// Estimates of the workers that sampled something. Every other worker
    /// estimates `0.0`.
    pub fn worker_estimates(&self) -> Vec<f64> {
        self.results.iter().map(BatchResult::estimate).collect()
    }

    /// Workers that received no samples.
    pub fn idle_workers(&self) -> u64 {
        self.worker_count - self.results.len() as u64
    }

    pub fn total_hits(&self) -> u64 {
        self.results.iter().map(|r| r.hits).sum()
    }

    pub fn total_samples(&self) -> u64 {
        self.results.iter().map(|r| r.total).sum()
    }

    /// `4 * Σhits / Σtotal`. Equals `value` when all batches are the same size.
    pub fn pooled_estimate(&self) -> f64 {
        BatchResult {
            hits: self.total_hits(),
            total: self.total_samples(),
        }
        .estimate()
    }

    /// Sample standard deviation of the per-worker estimates, idle workers
    /// counted as `0.0`.
    pub fn spread(&self) -> Option<f64> {
        if self.worker_count < 2 {
            return None;
        }
        let estimates = self.worker_estimates();
        if self.idle_workers() == 0 {
            return Some(estimates.iter().std_dev());
        }

        // Idle workers only add zeros: fold them in without materialising them.
        let n = self.worker_count as f64;
        let sum: f64 = estimates.iter().sum();
        let sum_sq: f64 = estimates.iter().map(|e| e * e).sum();
        let mean = sum / n;
        Some(((sum_sq - n * mean * mean) / (n - 1.0)).max(0.0).sqrt())
    }

    /// Binomial standard error of the pooled estimate
    ///
    /// ```text
    /// SE = 4 * sqrt(p(1 - p) / N),  p = hits / N
    /// ```
    pub fn standard_error(&self) -> f64 {
        let n = self.total_samples();
        if n == 0 {
            return 0.0;
        }
        let p = self.total_hits() as f64 / n as f64;
        4.0 * (p * (1.0 - p) / n as f64).sqrt()
    }

    /// Normal-approximation interval around `value` at the given confidence level.
    pub fn confidence_interval(&self, confidence: f64) -> Option<(f64, f64)> {
        let half_width = z_score(confidence)? * self.standard_error();
        Some((self.value - half_width, self.value + half_width))
    }

    pub fn samples_per_sec(&self) -> f64 {
        if self.elapsed_ms <= 0.0 {
            return 0.0;
        }
        self.total_samples() as f64 / (self.elapsed_ms / 1000.0)
    }
}

/// Run every batch concurrently and wait for all of them.
///
/// Results come back in batch order whatever the completion order. The first
/// failing batch fails the whole gather; no partial set is returned.
fn gather<F>(batches: &[SampleBatch], worker: F) -> PiResult<Vec<BatchResult>>
where
    F: Fn(SampleBatch) -> PiResult<BatchResult> + Sync,
{
    batches
        .par_iter()
        .map(|&batch| {
            let result = worker(batch)?;
            debug!(
                stream_id = batch.stream_id(),
                samples = result.total,
                hits = result.hits,
                "batch complete"
            );
            Ok(result)
        })
        .collect()
}

/// Mean over `worker_count` workers; workers without a result contribute `0.0`.
fn mean_estimate(results: &[BatchResult], worker_count: u64) -> f64 {
    let sum: f64 = results.iter().map(BatchResult::estimate).sum();
    sum / worker_count as f64
}

/// Monte Carlo estimate of π with full per-worker detail
///
/// # Algorithm
///
/// 1. Partition `total_samples` into `worker_count` balanced batches, batch `i`
///    sampling stream `i`
/// 2. Run the non-empty batches in parallel on rayon (a dedicated pool when
///    `threads` is set)
/// 3. Average the per-batch estimates `4 * hits / total` over all workers
///
/// # Errors
///
/// - `PiError::InvalidArgument` for non-positive `total_samples` or
///   `worker_count`, or `threads == Some(0)`
/// - `PiError::WorkerPool` if the dedicated pool cannot be built
pub fn estimate_detailed(request: &EstimateRequest) -> PiResult<EstimateReport> {
    let batches = request.partition()?;
    if request.worker_count > request.total_samples {
        warn!(
            workers = request.worker_count,
            samples = request.total_samples,
            "more workers than samples; zero-sample workers pull the average toward 0"
        );
    }

    let factory = request.factory();
    let worker = |batch: SampleBatch| -> PiResult<BatchResult> {
        Ok(run_batch_with(&factory, batch))
    };

    let timer = Timer::new();
    let results = match request.threads {
        Some(threads) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("pi-worker-{}", i))
                .build()?;
            pool.install(|| gather(&batches, worker))?
        }
        None => gather(&batches, worker)?,
    };
    let elapsed_ms = timer.elapsed_ms();

    let worker_count = request.worker_count as u64;
    let value = mean_estimate(&results, worker_count);
    info!(
        workers = worker_count,
        active = results.len(),
        samples = request.total_samples,
        generator = %request.generator,
        value,
        elapsed_ms,
        "estimate complete"
    );

    Ok(EstimateReport {
        value,
        results,
        worker_count,
        seed: request.seed,
        generator: request.generator,
        elapsed_ms,
    })
}

/// Estimate π from `total_samples` points split across `worker_count` workers.
///
/// Uses the default base seed and generator.
pub fn estimate(total_samples: i64, worker_count: i64) -> PiResult<f64> {
    estimate_detailed(&EstimateRequest::new(total_samples, worker_count)).map(|r| r.value)
}
