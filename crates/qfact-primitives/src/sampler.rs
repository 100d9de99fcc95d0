//! Shot sampling through a [`Backend`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use qfact_hal::{Backend, Counts, HalError, HalResult};
use qfact_ir::Circuit;

/// Shots used when neither the run nor the pub sets them.
pub const DEFAULT_SHOTS: u32 = 1024;

/// A primitive unified bloc for the sampler.
#[derive(Debug, Clone)]
pub struct SamplerPub {
    /// Measured circuit.
    pub circuit: Circuit,
    /// Values for the circuit's free parameters, in canonical order.
    pub parameter_values: Option<Vec<f64>>,
    /// Overrides the run-level shot count.
    pub shots: Option<u32>,
}

impl SamplerPub {
    /// Create a pub for a circuit without free parameters.
    pub fn new(circuit: Circuit) -> Self {
        Self {
            circuit,
            parameter_values: None,
            shots: None,
        }
    }

    /// Bind free parameters positionally.
    pub fn with_parameter_values(mut self, values: Vec<f64>) -> Self {
        self.parameter_values = Some(values);
        self
    }

    /// Set the shot count for this pub only.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }
}

/// Counts of one pub, split by classical register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerPubResult {
    registers: BTreeMap<String, Counts>,
    /// Shots the pub ran with.
    pub shots: u32,
}

impl SamplerPubResult {
    /// Counts of the register named `register`, e.g. `"meas"`.
    pub fn data(&self, register: &str) -> Option<&Counts> {
        self.registers.get(register)
    }

    /// Names of the measured registers.
    pub fn register_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.registers.keys().map(String::as_str)
    }
}

/// Runs measured circuits on a backend and collects their counts.
pub struct Sampler {
    backend: Arc<dyn Backend>,
    default_shots: u32,
}

impl Sampler {
    /// Create a sampler over `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            default_shots: DEFAULT_SHOTS,
        }
    }

    /// Set the shot count used when neither the run nor the pub sets one.
    pub fn with_default_shots(mut self, shots: u32) -> Self {
        self.default_shots = shots;
        self
    }

    /// Sample every pub, in order, waiting for each job before the next.
    ///
    /// # Errors
    ///
    /// - [`HalError::InvalidCircuit`] for a pub without measurements or with
    ///   a binding of the wrong length.
    /// - [`HalError::InvalidShots`] for zero shots.
    /// - Any error the backend reports for the job.
    #[instrument(skip_all, fields(backend = self.backend.name(), pubs = pubs.len()))]
    pub async fn run(
        &self,
        pubs: &[SamplerPub],
        shots: Option<u32>,
    ) -> HalResult<Vec<SamplerPubResult>> {
        let mut results = Vec::with_capacity(pubs.len());
        for pub_ in pubs {
            let shots = pub_.shots.or(shots).unwrap_or(self.default_shots);
            results.push(self.run_pub(pub_, shots).await?);
        }
        Ok(results)
    }

    async fn run_pub(&self, pub_: &SamplerPub, shots: u32) -> HalResult<SamplerPubResult> {
        let circuit = &pub_.circuit;
        if !circuit.has_measurements() {
            return Err(HalError::InvalidCircuit(format!(
                "circuit '{}' has no measurements",
                circuit.name()
            )));
        }
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }

        let values = pub_.parameter_values.as_deref().unwrap_or_default();
        let bound = circuit
            .assign_parameters(values)
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;

        let job_id = self.backend.submit(&bound, shots, None).await?;
        let result = self.backend.wait(&job_id).await?;
        debug!("Job {job_id} for '{}' returned {}", bound.name(), result.counts);

        let registers = bound
            .registers()
            .into_iter()
            .map(|reg| {
                let bits: Vec<usize> = reg.clbits.iter().map(|c| c.index()).collect();
                (reg.name, result.counts.marginal(&bits))
            })
            .collect();
        Ok(SamplerPubResult { registers, shots })
    }
}
