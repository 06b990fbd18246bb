// tests/kernel_test.rs
use fast_pi::mc::kernel::run_batch_with;
use fast_pi::rng::{Generator, RngFactory};
use fast_pi::{run_batch, BatchResult, ErrorKind, SampleBatch};
use std::f64::consts::PI;

#[test]
fn test_totals_match_and_hits_are_bounded() {
    for &n in &[0i64, 1, 10, 999, 25_000] {
        for &stream in &[-3i64, 0, 1, 42] {
            let result = run_batch(n, stream).expect("Valid batch");
            assert_eq!(result.total, n as u64);
            assert!(result.hits <= result.total);
        }
    }
}

#[test]
fn test_empty_batch() {
    for stream in 0..8 {
        assert_eq!(run_batch(0, stream).unwrap(), BatchResult { hits: 0, total: 0 });
    }
}

#[test]
fn test_negative_sample_count_is_invalid_argument() {
    for &n in &[-1i64, -100, i64::MIN] {
        let err = run_batch(n, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_same_stream_is_reproducible() {
    let first = run_batch(100_000, 9).unwrap();
    let second = run_batch(100_000, 9).unwrap();
    assert_eq!(first, second);

    let factory = RngFactory::with_generator(31337, Generator::Std);
    let batch = SampleBatch::new(50_000, 2).unwrap();
    assert_eq!(run_batch_with(&factory, batch), run_batch_with(&factory, batch));
}

#[test]
fn test_single_batch_converges() {
    let result = run_batch(1_000_000, 0).unwrap();
    let estimate = 4.0 * result.hits as f64 / result.total as f64;

    println!("\nSingle batch estimate: {}", estimate);
    println!("Absolute error: {}", (estimate - PI).abs());

    // Standard error is ~0.0016 at this sample size.
    assert!((estimate - PI).abs() < 0.01, "Estimate {} too far from pi", estimate);
}

#[test]
fn test_mean_over_streams_converges() {
    let trials = 10;
    let mean = (0..trials)
        .map(|stream| run_batch(200_000, stream).unwrap().estimate())
        .sum::<f64>()
        / trials as f64;

    assert!((mean - PI).abs() < 0.01, "Mean estimate {} too far from pi", mean);
}

#[test]
fn test_distinct_streams_give_distinct_results() {
    let results: Vec<BatchResult> = (0..4).map(|s| run_batch(2_000_000, s).unwrap()).collect();

    for i in 0..results.len() {
        for j in (i + 1)..results.len() {
            assert_ne!(
                results[i], results[j],
                "streams {} and {} produced identical results",
                i, j
            );
        }
    }
}

#[test]
fn test_seed_changes_results() {
    let batch = SampleBatch::new(500_000, 0).unwrap();
    let a = run_batch_with(&RngFactory::new(1), batch);
    let b = run_batch_with(&RngFactory::new(2), batch);
    assert_ne!(a, b);
}
