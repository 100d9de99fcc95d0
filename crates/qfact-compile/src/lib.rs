//! qfact Compilation Framework
//!
//! Adapts circuits to the operations a backend executes natively. Compilation
//! is a sequence of [`Pass`]es run by a [`PassManager`] over a mutable
//! circuit, with a [`PropertySet`] carrying the [`Target`] and statistics
//! between passes.
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | Target validation + basis translation |
//! | 1-3 | + single-qubit rotation merging |
//!
//! # Example
//!
//! ```rust
//! use qfact_compile::{BasisGates, Target, transpile};
//! use qfact_ir::library::bell;
//!
//! let target = Target::new("ibm-like", 5, BasisGates::ibm());
//! let compiled = transpile(&bell().unwrap(), &target, 0).unwrap();
//!
//! // H is rewritten as RZ-SX-RZ, CX is native
//! assert_eq!(compiled.count_ops().get("h"), None);
//! assert_eq!(compiled.count_ops().get("cx"), Some(&1));
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder, transpile};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, PropertySet, Target};
