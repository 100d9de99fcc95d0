//! Integration tests for the demo.
//!
//! These run the whole report against the seeded local simulator and
//! capture it in memory.

use std::num::NonZeroU64;

use qfact_demos::DemoConfig;
use qfact_demos::problems::divisors_below;
use qfact_demos::runners::FactorizationDemo;
use qfact_demos::visual::factor_slices;

async fn run(config: DemoConfig) -> (qfact_demos::runners::DemoOutcome, String) {
    let mut out = Vec::new();
    let outcome = FactorizationDemo::run(&config, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

// ============================================================================
// Full run
// ============================================================================

#[tokio::test]
async fn test_default_number_report() {
    let (outcome, text) = run(DemoConfig::default().without_image().with_seed(1)).await;

    assert_eq!(outcome.number, 14_400);
    assert_eq!(outcome.divisors.len(), 62);
    assert_eq!(outcome.divisors.last(), Some(&7_200));
    assert!(text.contains("Possible factors of the number 14400: [1, 2, 3,"));
    assert!(text.contains("Factor distribution for the number 14400"));
}

#[tokio::test]
async fn test_expectation_shapes() {
    let (outcome, text) = run(DemoConfig::default().without_image().with_seed(2)).await;

    assert_eq!(outcome.expectation_values.len(), 2);
    assert_eq!(outcome.expectation_values[0].evs.shape(), &[2, 2]);
    assert_eq!(outcome.expectation_values[1].evs.ndim(), 0);
    assert_eq!(outcome.expectation_values[0].metadata.target_precision, 0.01);
    assert!(text.contains("expectation values : psi1 = "));
}

#[tokio::test]
async fn test_counts() {
    let (outcome, text) = run(DemoConfig::default().without_image().with_seed(3)).await;

    assert_eq!(outcome.bell_counts.total_shots(), 128);
    assert!(outcome.bell_counts.iter().all(|(k, _)| k == "00" || k == "11"));
    assert_eq!(outcome.pqc_counts.len(), 2);
    for counts in &outcome.pqc_counts {
        assert_eq!(counts.total_shots(), 1024);
        assert!(counts.iter().all(|(k, _)| k.len() == 2));
    }
    assert!(text.contains("counts for Bell circuit : {"));
}

#[tokio::test]
async fn test_seeded_runs_repeat() {
    let config = DemoConfig::default().without_image().with_seed(4);
    let (a, _) = run(config.clone()).await;
    let (b, _) = run(config).await;

    assert_eq!(a.bell_counts, b.bell_counts);
    assert_eq!(a.pqc_counts, b.pqc_counts);
    assert_eq!(a.expectation_values[0].evs, b.expectation_values[0].evs);
}

#[tokio::test]
async fn test_missing_image_is_not_fatal() {
    let config = DemoConfig::default()
        .with_image_path("/nonexistent/qfact/image.png")
        .with_number(NonZeroU64::new(13).unwrap())
        .with_seed(5);
    let (outcome, text) = run(config).await;

    assert!(!outcome.image_shown);
    assert!(text.contains("Could not load the image"));
    assert_eq!(outcome.divisors, vec![1]);
}

#[tokio::test]
async fn test_circuit_diagrams_in_report() {
    let (_, text) = run(DemoConfig::default().without_image().with_seed(6)).await;
    assert!(text.contains("bell"));
    assert_eq!(text.matches("RealAmplitudes").count(), 2);
    assert!(text.contains("meas:"));
}

// ============================================================================
// Report details
// ============================================================================

/// Every divisor appears once, so the chart weights are all 1.
#[test]
fn test_pie_weights_are_degenerate() {
    let slices = factor_slices(&divisors_below(14_400));
    assert_eq!(slices.len(), 62);
    assert!(slices.iter().all(|s| s.weight == 1));
}

#[tokio::test]
async fn test_number_one_has_no_divisors() {
    let config = DemoConfig::default()
        .without_image()
        .with_number(NonZeroU64::MIN)
        .with_seed(7);
    let (outcome, text) = run(config).await;
    assert!(outcome.divisors.is_empty());
    assert!(text.contains("(no factors)"));
}
