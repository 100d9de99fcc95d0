//! qfact Circuit Intermediate Representation
//!
//! This crate provides the data structures every other qfact crate speaks:
//! qubits and classical bits, the standard gate set, symbolic parameters,
//! instructions, and the [`Circuit`] builder itself.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over a fixed set of
//! qubits and classical bits. Classical bits may be grouped into named
//! registers; [`Circuit::measure_all`] creates the `meas` register that the
//! sampler reports counts for.
//!
//! Gate angles are [`ParameterExpression`]s. A symbolic angle is a free
//! parameter; [`Circuit::parameters`] lists them in canonical order and
//! [`Circuit::assign_parameters`] binds them positionally.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qfact_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_clbits(), 2);
//! assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
//! ```
//!
//! # Example: Binding a Variational Form
//!
//! ```rust
//! use qfact_ir::library::real_amplitudes;
//!
//! let ansatz = real_amplitudes(2, 2).unwrap();
//! assert_eq!(ansatz.num_parameters(), 6);
//!
//! let bound = ansatz.assign_parameters(&[0.0, 1.0, 1.0, 2.0, 3.0, 5.0]).unwrap();
//! assert!(!bound.is_parameterized());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | Square root of X and its inverse |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Pauli gates |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod library;
pub mod parameter;
pub mod qubit;

pub use circuit::{Circuit, ClassicalRegister};
pub use draw::draw_text;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
