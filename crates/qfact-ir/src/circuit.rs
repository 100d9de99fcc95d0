//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::{ParameterExpression, canonical_order};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// Name of the register created by [`Circuit::measure_all`].
pub const MEASURE_REGISTER: &str = "meas";

/// Name under which bits outside any named register are grouped.
pub const DEFAULT_REGISTER: &str = "c";

/// A named group of classical bits, in register index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Member bits; element `i` is `name[i]`.
    pub clbits: Vec<ClbitId>,
}

impl ClassicalRegister {
    /// Number of bits in the register.
    pub fn size(&self) -> usize {
        self.clbits.len()
    }
}

/// A quantum circuit.
///
/// Instructions are kept in program order. Every builder method validates
/// its operands before anything is appended, so a failed call leaves the
/// circuit unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and loose classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a classical bit that belongs to no named register.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a named classical register of `size` bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = ClbitId(self.clbits.len() as u32);
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Append an instruction after checking its operands.
    ///
    /// Gates must receive exactly as many distinct qubits as they act on.
    /// Measurements need one qubit and one classical bit. Every operand
    /// must already exist in the circuit.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.as_gate().map(|g| g.name().to_string());

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.index() >= self.clbits.len() {
                return Err(IrError::ClbitNotFound { clbit });
            }
        }

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != 1 || instruction.clbits.len() != 1 {
                    return Err(IrError::InvalidInstruction(format!(
                        "measure takes one qubit and one classical bit, got {} and {}",
                        instruction.qubits.len(),
                        instruction.clbits.len()
                    )));
                }
            }
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply a single-qubit gate.
    fn single(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, [qubit]))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Tdg, qubit)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::SX, qubit)
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::SXdg, qubit)
    }

    /// Apply RX rotation.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply RY rotation.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply RZ rotation.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rz(theta.into()), qubit)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::P(theta.into()), qubit)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CX, [control, target]))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CY, [control, target]))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CZ, [control, target]))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::Swap, [q1, q2]))
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into a fresh `meas` register.
    ///
    /// A barrier across all qubits is placed first, then qubit `i` is
    /// measured into `meas[i]`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.barrier_all()?;
        let clbits = self.add_creg(MEASURE_REGISTER, self.qubits.len() as u32);
        for (i, clbit) in clbits.into_iter().enumerate() {
            self.measure(QubitId(i as u32), clbit)?;
        }
        Ok(self)
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to every qubit.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let all: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.barrier(all)
    }

    /// Copy of the circuit without measurements or the bits they write.
    pub fn remove_final_measurements(&self) -> Self {
        let mut stripped = Self::with_size(self.name.clone(), self.qubits.len() as u32, 0);
        stripped.instructions = self
            .instructions
            .iter()
            .filter(|inst| !inst.is_measure())
            .cloned()
            .collect();
        while stripped.instructions.last().is_some_and(Instruction::is_barrier) {
            stripped.instructions.pop();
        }
        stripped
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// A circuit over the same bits with a different instruction list.
    ///
    /// Compiler passes use this to rebuild circuits. Operands are checked
    /// the same way [`Circuit::apply`] checks them.
    pub fn with_instructions(&self, instructions: Vec<Instruction>) -> IrResult<Self> {
        let mut rebuilt = Self {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions: Vec::with_capacity(instructions.len()),
        };
        for inst in instructions {
            rebuilt.apply(inst)?;
        }
        Ok(rebuilt)
    }

    /// Number of layers, counting each qubit and classical bit as a wire.
    ///
    /// Barriers do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        let mut depth = 0;

        for inst in &self.instructions {
            if inst.is_barrier() {
                continue;
            }
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0);
            let level = start + 1;
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Number of instructions per operation name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether the circuit contains at least one measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Classical registers in order of their first bit.
    ///
    /// Bits outside any named register are grouped into a register named
    /// [`DEFAULT_REGISTER`].
    pub fn registers(&self) -> Vec<ClassicalRegister> {
        let mut registers: Vec<ClassicalRegister> = Vec::new();
        for clbit in &self.clbits {
            let name = clbit.register.as_deref().unwrap_or(DEFAULT_REGISTER);
            match registers.iter_mut().find(|r| r.name == name) {
                Some(reg) => reg.clbits.push(clbit.id),
                None => registers.push(ClassicalRegister {
                    name: name.to_string(),
                    clbits: vec![clbit.id],
                }),
            }
        }
        registers
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Free parameter names in canonical order.
    ///
    /// `θ[0], θ[1], …, θ[10]` sort by index, so positional bindings line up
    /// with the order the parameters were created in.
    pub fn parameters(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for gate in self.instructions.iter().filter_map(Instruction::as_gate) {
            if let Some(param) = gate.parameter() {
                param.collect_symbols(&mut names);
            }
        }
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort_by(|a, b| canonical_order(a, b));
        names
    }

    /// Number of free parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Whether any gate angle is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .any(StandardGate::is_parameterized)
    }

    /// Bind every free parameter positionally, in [`Circuit::parameters`] order.
    ///
    /// The circuit itself is left untouched.
    pub fn assign_parameters(&self, values: &[f64]) -> IrResult<Self> {
        let names = self.parameters();
        if names.len() != values.len() {
            return Err(IrError::ParameterCountMismatch {
                circuit: self.name.clone(),
                expected: names.len(),
                got: values.len(),
            });
        }
        let map: FxHashMap<String, f64> = names.into_iter().zip(values.iter().copied()).collect();
        Ok(self.bind_parameters(&map))
    }

    /// Bind the parameters named in `values`, leaving any others symbolic.
    pub fn bind_parameters(&self, values: &FxHashMap<String, f64>) -> Self {
        let mut bound = self.clone();
        for inst in &mut bound.instructions {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if gate.parameter().is_some() {
                    inst.kind = InstructionKind::Gate(gate.map_parameter(|p| p.substitute(values)));
                }
            }
        }
        bound
    }
}
