//! Integration tests for `transpile` on the circuits the demo compiles.

use qfact_compile::{BasisGates, CompileError, Target, transpile};
use qfact_ir::library::{bell, real_amplitudes};
use qfact_ir::{Circuit, QubitId};

fn simulator_target() -> Target {
    Target::new("statevector", 24, BasisGates::simulator())
}

// ============================================================================
// Level 0
// ============================================================================

#[test]
fn test_level_zero_keeps_parameter_count() {
    for reps in [2, 3] {
        let ansatz = real_amplitudes(2, reps).unwrap();
        let compiled = transpile(&ansatz, &Target::new("ibm", 5, BasisGates::ibm()), 0).unwrap();
        assert_eq!(compiled.parameters(), ansatz.parameters());
    }
}

#[test]
fn test_simulator_target_is_identity() {
    let mut ansatz = real_amplitudes(2, 2).unwrap();
    ansatz.measure_all().unwrap();
    let compiled = transpile(&ansatz, &simulator_target(), 0).unwrap();
    assert_eq!(compiled, ansatz);
}

#[test]
fn test_measurements_survive() {
    let compiled = transpile(&bell().unwrap(), &Target::new("ibm", 2, BasisGates::ibm()), 0).unwrap();
    assert_eq!(compiled.count_ops().get("measure"), Some(&2));
    assert_eq!(compiled.registers()[0].name, "meas");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unsupported_gate_fails() {
    let mut circuit = Circuit::with_size("swap", 2, 0);
    circuit.swap(QubitId(0), QubitId(1)).unwrap();
    let target = Target::new("rz-only", 2, BasisGates::new(["rz", "measure"]));
    let err = transpile(&circuit, &target, 0).unwrap_err();
    assert!(matches!(err, CompileError::GateNotInBasis { .. }));
}

#[test]
fn test_oversized_circuit_fails() {
    let ansatz = real_amplitudes(4, 1).unwrap();
    let err = transpile(&ansatz, &Target::new("tiny", 2, BasisGates::simulator()), 0).unwrap_err();
    assert!(matches!(err, CompileError::CircuitTooLarge { required: 4, .. }));
}

// ============================================================================
// Level 1
// ============================================================================

#[test]
fn test_level_one_merges_translated_rotations() {
    let mut circuit = Circuit::with_size("zz", 1, 0);
    circuit.s(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    let target = Target::new("ibm", 1, BasisGates::ibm());

    let level0 = transpile(&circuit, &target, 0).unwrap();
    let level1 = transpile(&circuit, &target, 1).unwrap();
    assert_eq!(level0.instructions().len(), 2);
    assert_eq!(level1.instructions().len(), 1);
}
