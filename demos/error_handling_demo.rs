// demos/error_handling_demo.rs
use fast_pi::{estimate, estimate_detailed, run_batch, EstimateRequest, ErrorKind, PiError};

fn main() {
    println!("Error Handling Demo for fast-pi");
    println!("===============================\n");

    // Test 1: Negative batch size
    println!("1. Testing negative sample count for a single batch...");
    match run_batch(-10, 0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Non-positive totals and worker counts
    println!("\n2. Testing invalid estimate requests...");
    for (samples, workers) in [(-5, 2), (5, 0), (0, 4)] {
        match estimate(samples, workers) {
            Ok(value) => println!("   Unexpected: got {} for ({}, {})", value, samples, workers),
            Err(e) => println!("   ✓ ({}, {}) rejected: {}", samples, workers, e),
        }
    }

    // Test 3: Zero-thread dedicated pool
    println!("\n3. Testing a zero-thread pool request...");
    let request = EstimateRequest {
        threads: Some(0),
        ..EstimateRequest::new(1_000, 2)
    };
    match estimate_detailed(&request) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: More workers than samples is allowed, with a warning
    println!("\n4. Testing more workers than samples...");
    match estimate(3, 8) {
        Ok(value) => println!("   ✓ Accepted, diluted estimate = {:.4}", value),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 5: Error kind matching
    println!("\n5. Testing error kind matching...");
    match estimate(10, -1) {
        Err(PiError::InvalidArgument {
            parameter,
            value,
            constraint,
        }) => {
            println!("   ✓ Caught InvalidArgument: {} = {} ({})", parameter, value, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
        Ok(_) => println!("   Unexpected: Should have failed!"),
    }

    if let Err(e) = estimate(0, 1) {
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        println!("   ✓ CLI exit code for {:?}: {}", e.kind(), e.kind().exit_code());
    }

    println!("\n✓ Error handling demo complete!");
}
