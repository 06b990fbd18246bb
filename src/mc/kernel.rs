// src/mc/kernel.rs
use crate::error::{validation::*, PiResult};
use crate::rng::{Generator, RngFactory};
use rand::Rng;

/// One unit of sampling work: a sample count bound to a random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBatch {
    sample_count: u64,
    stream_id: i64,
}

impl SampleBatch {
    /// Fails with `InvalidArgument` when `sample_count` is negative.
    pub fn new(sample_count: i64, stream_id: i64) -> PiResult<Self> {
        validate_non_negative("sample_count", sample_count)?;
        Ok(Self {
            sample_count: sample_count as u64,
            stream_id,
        })
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn stream_id(&self) -> i64 {
        self.stream_id
    }
}

/// Outcome of one batch. `hits <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchResult {
    pub hits: u64,
    pub total: u64,
}

impl BatchResult {
    /// Local estimate `4 * hits / total`; a zero-sample batch estimates `0.0`.
    pub fn estimate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            4.0 * self.hits as f64 / self.total as f64
        }
    }
}

/// Count points of the unit square that fall strictly inside the quarter circle
///
/// # Algorithm
///
/// For each of `n` iterations draw `x, y ~ U[0, 1)` and test
/// ```text
/// x² + y² < 1
/// ```
/// Points exactly on the arc are misses. The comparison is exact, no epsilon.
///
/// Generic over the generator so each family gets its own monomorphized loop.
#[inline]
pub fn count_hits<R: Rng>(rng: &mut R, n: u64) -> u64 {
    let mut hits = 0u64;
    for _ in 0..n {
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if x * x + y * y < 1.0 {
            hits += 1;
        }
    }
    hits
}

/// Run an already validated batch against the factory's generator family.
pub fn run_batch_with(factory: &RngFactory, batch: SampleBatch) -> BatchResult {
    let n = batch.sample_count();
    let hits = match factory.generator() {
        Generator::Philox => count_hits(&mut factory.create_philox_rng(batch.stream_id()), n),
        Generator::Std => count_hits(&mut factory.create_std_rng(batch.stream_id()), n),
    };

    BatchResult { hits, total: n }
}

/// Sample `sample_count` points on stream `stream_id` with the default base seed.
///
/// # Errors
///
/// Returns `PiError::InvalidArgument` if `sample_count < 0`.
pub fn run_batch(sample_count: i64, stream_id: i64) -> PiResult<BatchResult> {
    let batch = SampleBatch::new(sample_count, stream_id)?;
    Ok(run_batch_with(&RngFactory::default(), batch))
}
