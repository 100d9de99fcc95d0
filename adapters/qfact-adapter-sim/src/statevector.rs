//! Statevector simulation engine.
//!
//! Amplitude index bit `q` holds the state of qubit `q`, so qubit 0 is the
//! least significant bit.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use qfact_ir::{Circuit, Instruction, InstructionKind, IrError, IrResult, StandardGate};

/// A 2x2 complex matrix, row major.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A pure quantum state over `num_qubits` qubits.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// The all-zeros state |0…0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0…0⟩ through every gate of `circuit`.
    ///
    /// Measurements and barriers leave the state unchanged. Fails on the
    /// first gate whose angle is still symbolic.
    pub fn from_circuit(circuit: &Circuit) -> IrResult<Self> {
        let mut sv = Self::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst)?;
        }
        Ok(sv)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply one instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> IrResult<()> {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return Ok(());
        };
        let q: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        match gate {
            StandardGate::CX => self.apply_controlled(q[0], q[1], &pauli_x()),
            StandardGate::CY => self.apply_controlled(q[0], q[1], &pauli_y()),
            StandardGate::CZ => self.apply_controlled(q[0], q[1], &phase(std::f64::consts::PI)),
            StandardGate::Swap => self.apply_swap(q[0], q[1]),
            single => {
                let matrix = single_qubit_matrix(single)?;
                self.apply_single(q[0], &matrix);
            }
        }
        Ok(())
    }

    fn apply_single(&mut self, qubit: usize, m: &Matrix2) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a, b) = (self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_controlled(&mut self, control: usize, target: usize, m: &Matrix2) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & ctrl_mask != 0 && i & tgt_mask == 0 {
                let j = i | tgt_mask;
                let (a, b) = (self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let (m1, m2) = (1 << q1, 1 << q2);
        for i in 0..self.amplitudes.len() {
            if i & m1 != 0 && i & m2 == 0 {
                self.amplitudes.swap(i, (i & !m1) | m2);
            }
        }
    }

    /// Probability of each computational basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// ⟨ψ|P|ψ⟩ for a Pauli string.
    ///
    /// `label` is read little-endian: its last character acts on qubit 0.
    /// Characters other than `I`, `X`, `Y` and `Z` are treated as identity.
    pub fn expectation_pauli(&self, label: &str) -> f64 {
        let mut x_mask = 0usize;
        let mut z_mask = 0usize;
        let mut y_count = 0u32;
        for (qubit, c) in label.chars().rev().enumerate() {
            match c {
                'X' => x_mask |= 1 << qubit,
                'Y' => {
                    x_mask |= 1 << qubit;
                    z_mask |= 1 << qubit;
                    y_count += 1;
                }
                'Z' => z_mask |= 1 << qubit,
                _ => {}
            }
        }

        // P|i⟩ = i^y · (-1)^popcount(i & z) |i ^ x⟩, using Y = iXZ.
        let y_phase = I.powu(y_count);
        let total: Complex64 = (0..self.amplitudes.len())
            .map(|i| {
                let sign = if (i & z_mask).count_ones() % 2 == 0 { 1.0 } else { -1.0 };
                self.amplitudes[i ^ x_mask].conj() * self.amplitudes[i] * sign
            })
            .sum();
        (y_phase * total).re
    }

    /// Draw `shots` basis-state indices from the Born distribution.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut acc = 0.0;
        for p in self.probabilities() {
            acc += p;
            cumulative.push(acc);
        }
        let last = cumulative.len() - 1;
        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * acc;
                cumulative.partition_point(|&c| c <= r).min(last)
            })
            .collect()
    }
}

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn phase(theta: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

fn rx(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    let mis = Complex64::new(0.0, -s);
    [[c.into(), mis], [mis, c.into()]]
}

fn ry(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [[c.into(), (-s).into()], [s.into(), c.into()]]
}

fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

fn sx(sign: f64) -> Matrix2 {
    // SX = ½[[1+i, 1-i], [1-i, 1+i]]; SX† conjugates every entry.
    let p = Complex64::new(0.5, 0.5 * sign);
    let m = Complex64::new(0.5, -0.5 * sign);
    [[p, m], [m, p]]
}

fn single_qubit_matrix(gate: &StandardGate) -> IrResult<Matrix2> {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    Ok(match gate {
        StandardGate::I => [[ONE, ZERO], [ZERO, ONE]],
        StandardGate::X => pauli_x(),
        StandardGate::Y => pauli_y(),
        StandardGate::Z => phase(std::f64::consts::PI),
        StandardGate::H => [[h, h], [h, -h]],
        StandardGate::S => phase(FRAC_PI_2),
        StandardGate::Sdg => phase(-FRAC_PI_2),
        StandardGate::T => phase(FRAC_PI_4),
        StandardGate::Tdg => phase(-FRAC_PI_4),
        StandardGate::SX => sx(1.0),
        StandardGate::SXdg => sx(-1.0),
        StandardGate::Rx(theta) => rx(theta.value()?),
        StandardGate::Ry(theta) => ry(theta.value()?),
        StandardGate::Rz(theta) => rz(theta.value()?),
        StandardGate::P(theta) => phase(theta.value()?),
        StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::Swap => {
            return Err(IrError::InvalidInstruction(format!(
                "'{}' is not a single-qubit gate",
                gate.name()
            )));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfact_ir::{ParameterExpression, QubitId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
        assert!((sv.expectation_pauli("ZZ") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_bell_state_expectations() {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();

        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < EPS);
        assert!((probs[3] - 0.5).abs() < EPS);
        assert!((sv.expectation_pauli("ZZ") - 1.0).abs() < EPS);
        assert!((sv.expectation_pauli("XX") - 1.0).abs() < EPS);
        assert!((sv.expectation_pauli("YY") + 1.0).abs() < EPS);
        assert!(sv.expectation_pauli("IZ").abs() < EPS);
    }

    #[test]
    fn test_little_endian_labels() {
        let mut circuit = Circuit::with_size("x0", 2, 0);
        circuit.x(QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();

        assert!((sv.expectation_pauli("IZ") + 1.0).abs() < EPS);
        assert!((sv.expectation_pauli("ZI") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ry_expectation() {
        let theta = 0.7;
        let mut circuit = Circuit::with_size("ry", 1, 0);
        circuit.ry(theta, QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();

        assert!((sv.expectation_pauli("Z") - theta.cos()).abs() < EPS);
        assert!((sv.expectation_pauli("X") - theta.sin()).abs() < EPS);
    }

    #[test]
    fn test_sx_squared_is_x() {
        let mut circuit = Circuit::with_size("sx", 1, 0);
        circuit.sx(QubitId(0)).unwrap();
        circuit.sx(QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        assert!((sv.probabilities()[1] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_unbound_parameter_fails() {
        let mut circuit = Circuit::with_size("p", 1, 0);
        circuit.rz(ParameterExpression::indexed("θ", 0), QubitId(0)).unwrap();
        assert!(Statevector::from_circuit(&circuit).is_err());
    }

    #[test]
    fn test_sampling_follows_distribution() {
        let mut circuit = Circuit::with_size("x", 1, 0);
        circuit.x(QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let samples = sv.sample(200, &mut rng);
        assert_eq!(samples.len(), 200);
        assert!(samples.iter().all(|&s| s == 1));
    }
}
