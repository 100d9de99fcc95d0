//! Integration tests for the estimator and sampler.

use std::sync::Arc;

use ndarray::IxDyn;
use qfact_adapter_sim::SimulatorBackend;
use qfact_hal::HalError;
use qfact_ir::library::{bell, real_amplitudes};
use qfact_primitives::{
    Estimator, EstimatorPub, ParameterValues, Sampler, SamplerPub, SparsePauliOp,
};

const EPS: f64 = 1e-9;

fn h1() -> SparsePauliOp {
    SparsePauliOp::from_list([("II", 1.0), ("IZ", 2.0), ("XI", 3.0)]).unwrap()
}

fn h3() -> SparsePauliOp {
    SparsePauliOp::from_list([("ZI", 1.0), ("ZZ", 1.0)]).unwrap()
}

// ============================================================================
// Estimator
// ============================================================================

#[test]
fn test_estimator_broadcast_shape() {
    let psi = real_amplitudes(2, 2).unwrap();
    let pub_ = EstimatorPub::new(psi, vec![h1(), h3()]).with_parameter_values(vec![
        vec![0.0, 1.0, 1.0, 2.0, 3.0, 5.0],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    ]);
    let results = Estimator::new().run(&[pub_], None).unwrap();

    assert_eq!(results[0].evs.shape(), &[2, 2]);
    assert_eq!(results[0].stds.shape(), &[2, 2]);
}

#[test]
fn test_estimator_single_observable_over_bindings() {
    let psi = real_amplitudes(2, 2).unwrap();
    let pub_ = EstimatorPub::new(psi, h3())
        .with_parameter_values(ParameterValues::List(vec![vec![0.0; 6]; 3]));
    let results = Estimator::new().run(&[pub_], None).unwrap();

    assert_eq!(results[0].evs.shape(), &[3]);
    for ev in results[0].evs.iter() {
        assert!((ev - 2.0).abs() < EPS);
    }
}

#[test]
fn test_estimator_exact_analytic_values() {
    // All-zero angles leave |00⟩: ⟨II⟩ = 1, ⟨IZ⟩ = 1, ⟨XI⟩ = 0.
    let psi = real_amplitudes(2, 2).unwrap();
    let pub_ = EstimatorPub::new(psi, vec![h1()]).with_parameter_values(vec![0.0; 6]);
    let results = Estimator::new().run(&[pub_], None).unwrap();

    assert_eq!(results[0].evs.shape(), &[1]);
    assert!((results[0].evs[IxDyn(&[0])] - 3.0).abs() < EPS);
}

#[test]
fn test_estimator_h1_at_theta1_reference_value() {
    let psi = real_amplitudes(2, 2).unwrap();
    let pub_ = EstimatorPub::new(psi, h1()).with_parameter_values(vec![0.0, 1.0, 1.0, 2.0, 3.0, 5.0]);
    let results = Estimator::new().run(&[pub_], None).unwrap();

    assert_eq!(results[0].evs.ndim(), 0);
    assert!((results[0].evs[IxDyn(&[])] - 1.5555572817900956).abs() < EPS);
}

#[test]
fn test_estimator_results_in_submission_order() {
    let psi1 = real_amplitudes(2, 2).unwrap();
    let psi2 = real_amplitudes(2, 3).unwrap();
    let h2 = SparsePauliOp::from_list([("IZ", 1.0)]).unwrap();
    let pubs = [
        EstimatorPub::new(psi1, h3()).with_parameter_values(vec![0.0; 6]),
        EstimatorPub::new(psi2, h2).with_parameter_values(vec![0.0, 1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0]),
    ];
    let results = Estimator::new().run(&pubs, None).unwrap();

    assert_eq!(results.len(), 2);
    assert!((results[0].evs[IxDyn(&[])] - 2.0).abs() < EPS);
    assert_eq!(results[1].evs.ndim(), 0);
    assert_eq!(results[1].metadata.num_bindings, 1);
}

#[test]
fn test_estimator_noise_is_seeded() {
    let run = || {
        let psi = real_amplitudes(2, 2).unwrap();
        let pub_ = EstimatorPub::new(psi, h3()).with_parameter_values(vec![0.3; 6]);
        Estimator::with_seed(5).run(&[pub_], Some(0.01)).unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a[0].evs, b[0].evs);
    assert_eq!(a[0].stds[IxDyn(&[])], 0.01);
    assert_eq!(a[0].metadata.target_precision, 0.01);
}

#[test]
fn test_estimator_binding_length_mismatch() {
    let psi = real_amplitudes(2, 2).unwrap();
    let pub_ = EstimatorPub::new(psi, h3()).with_parameter_values(vec![0.0; 5]);
    let result = Estimator::new().run(&[pub_], None);
    assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
}

#[test]
fn test_estimator_missing_binding() {
    let psi = real_amplitudes(2, 2).unwrap();
    let result = Estimator::new().run(&[EstimatorPub::new(psi, h3())], None);
    assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
}

// ============================================================================
// Sampler
// ============================================================================

#[tokio::test]
async fn test_sampler_parameterized_circuits() {
    let sampler = Sampler::new(Arc::new(SimulatorBackend::with_seed(9)));
    let mut pqc = real_amplitudes(2, 2).unwrap();
    pqc.measure_all().unwrap();
    let mut pqc2 = real_amplitudes(2, 3).unwrap();
    pqc2.measure_all().unwrap();

    let pubs = [
        SamplerPub::new(pqc).with_parameter_values(vec![0.0, 1.0, 1.0, 2.0, 3.0, 5.0]),
        SamplerPub::new(pqc2)
            .with_parameter_values(vec![0.0, 1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0]),
    ];
    let results = sampler.run(&pubs, None).await.unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        let counts = result.data("meas").unwrap();
        assert_eq!(counts.total_shots(), 1024);
        assert!(counts.iter().all(|(k, _)| k.len() == 2));
    }
}

#[tokio::test]
async fn test_sampler_run_shots_override_default() {
    let sampler = Sampler::new(Arc::new(SimulatorBackend::new())).with_default_shots(10);
    let pubs = [
        SamplerPub::new(bell().unwrap()),
        SamplerPub::new(bell().unwrap()).with_shots(7),
    ];
    let results = sampler.run(&pubs, Some(128)).await.unwrap();
    assert_eq!(results[0].shots, 128);
    assert_eq!(results[1].shots, 7);
    assert_eq!(results[1].data("meas").unwrap().total_shots(), 7);
}

#[tokio::test]
async fn test_sampler_unknown_register() {
    let sampler = Sampler::new(Arc::new(SimulatorBackend::new()));
    let results = sampler.run(&[SamplerPub::new(bell().unwrap())], Some(4)).await.unwrap();
    assert!(results[0].data("c").is_none());
    assert_eq!(results[0].register_names().collect::<Vec<_>>(), vec!["meas"]);
}
