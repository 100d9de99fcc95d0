//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qfact_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, Optimize1qRotations, TargetValidation};
use crate::property::{PropertySet, Target};

/// Runs a sequence of compilation passes in order.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on `circuit`.
    #[instrument(skip_all, fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!(
                    "Pass {} completed, ops: {}",
                    pass.name(),
                    circuit.instructions().len()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.instructions().len()
        );
        Ok(())
    }

    /// Names of the configured passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for pass managers with preset pipelines.
pub struct PassManagerBuilder {
    optimization_level: u8,
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: target validation and basis translation only
    /// - Level 1 and above: also merge single-qubit rotations
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Set the compilation target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.properties.target = Some(target);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.target.is_some() {
            pm.add_pass(TargetValidation);
            pm.add_pass(BasisTranslation);
        }

        if self.optimization_level >= 1 {
            pm.add_pass(Optimize1qRotations);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapt `circuit` to `target`, returning the compiled copy.
pub fn transpile(circuit: &Circuit, target: &Target, optimization_level: u8) -> CompileResult<Circuit> {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(optimization_level)
        .with_target(target.clone())
        .build();
    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut props)?;
    Ok(compiled)
}
