//! Integration tests for circuit construction and parameter binding.

use proptest::prelude::*;

use qfact_ir::library::{bell, real_amplitudes};
use qfact_ir::{Circuit, IrError, ParameterExpression, QubitId, draw_text};

/// Helper: angles of every RY gate, in program order.
fn ry_angles(circuit: &Circuit) -> Vec<Option<f64>> {
    circuit
        .instructions()
        .iter()
        .filter_map(|inst| inst.as_gate())
        .filter(|gate| gate.name() == "ry")
        .map(|gate| gate.parameter().and_then(ParameterExpression::as_f64))
        .collect()
}

// ============================================================================
// Variational forms
// ============================================================================

#[test]
fn test_ansatz_parameters_are_canonical() {
    let circuit = real_amplitudes(2, 3).unwrap();
    let names = circuit.parameters();
    let expected: Vec<String> = (0..8).map(|i| format!("θ[{i}]")).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_binding_follows_placement_order() {
    let circuit = real_amplitudes(2, 2).unwrap();
    let theta = [0.0, 1.0, 1.0, 2.0, 3.0, 5.0];
    let bound = circuit.assign_parameters(&theta).unwrap();

    let angles: Vec<f64> = ry_angles(&bound).into_iter().flatten().collect();
    assert_eq!(angles, theta.to_vec());
}

#[test]
fn test_binding_leaves_original_untouched() {
    let circuit = real_amplitudes(2, 2).unwrap();
    let _ = circuit.assign_parameters(&[0.0; 6]).unwrap();
    assert!(circuit.is_parameterized());
    assert_eq!(circuit.num_parameters(), 6);
}

#[test]
fn test_short_binding_is_rejected() {
    let circuit = real_amplitudes(2, 3).unwrap();
    let err = circuit.assign_parameters(&[1.0, 2.0, 3.0]).unwrap_err();
    match err {
        IrError::ParameterCountMismatch { expected, got, .. } => {
            assert_eq!(expected, 8);
            assert_eq!(got, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_measured_copy_keeps_parameters() {
    let mut circuit = real_amplitudes(2, 2).unwrap();
    circuit.measure_all().unwrap();
    assert_eq!(circuit.num_parameters(), 6);
    assert_eq!(circuit.num_clbits(), 2);
    assert!(draw_text(&circuit).contains("meas:"));
}

// ============================================================================
// Bell circuit
// ============================================================================

#[test]
fn test_bell_layout() {
    let circuit = bell().unwrap();
    let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["h", "cx", "barrier", "measure", "measure"]);
    assert_eq!(circuit.depth(), 3);
}

#[test]
fn test_serde_roundtrip_preserves_circuit() {
    let circuit = real_amplitudes(2, 1).unwrap();
    let json = serde_json::to_string(&circuit).unwrap();
    let back: Circuit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, circuit);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_real_amplitudes_size(num_qubits in 1u32..6, reps in 0usize..5) {
        let circuit = real_amplitudes(num_qubits, reps).unwrap();
        prop_assert_eq!(circuit.num_parameters(), num_qubits as usize * (reps + 1));
        let cx = circuit.count_ops().get("cx").copied().unwrap_or(0);
        prop_assert_eq!(cx, (num_qubits as usize - 1) * reps);
    }

    #[test]
    fn prop_binding_removes_every_symbol(values in prop::collection::vec(-10.0f64..10.0, 6)) {
        let circuit = real_amplitudes(2, 2).unwrap();
        let bound = circuit.assign_parameters(&values).unwrap();
        prop_assert!(!bound.is_parameterized());
        prop_assert_eq!(bound.num_parameters(), 0);
    }

    #[test]
    fn prop_depth_bounded_by_instruction_count(n in 1u32..5) {
        let mut circuit = Circuit::with_size("chain", n, 0);
        for q in 0..n {
            circuit.h(QubitId(q)).unwrap();
        }
        prop_assert_eq!(circuit.depth(), 1);
        prop_assert!(circuit.depth() <= circuit.instructions().len());
    }
}
