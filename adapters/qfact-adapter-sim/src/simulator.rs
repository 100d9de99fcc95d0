//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qfact_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus, ValidationResult,
};
use qfact_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Default qubit limit of [`SimulatorBackend::new`].
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator.
///
/// Each job evolves the state once and then draws every shot from the
/// final Born distribution, so measurements must be the last operation on
/// their qubit.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::from_entropy(), None)
    }

    /// Create a simulator whose samples are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::seed_from_u64(seed), Some(seed))
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(max_qubits, StdRng::from_entropy(), None)
    }

    fn build(max_qubits: u32, rng: StdRng, seed: Option<u64>) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(rng),
            seed,
        }
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        let max = self.capabilities.num_qubits;
        if circuit.num_qubits() > max as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                max
            )));
        }
        Ok(())
    }

    fn unsupported_gates(&self, circuit: &Circuit) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| inst.as_gate())
            .map(|gate| gate.name())
            .filter(|name| !self.capabilities.gate_set.contains(name))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Evolve the state and sample `shots` bitstrings.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let measured = measurement_map(circuit)?;
        let sv = statevector(circuit)?;
        debug!("Sampling {shots} shots from {} qubits", sv.num_qubits());

        let samples = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sv.sample(shots, &mut *rng)
        };

        let width = circuit.num_clbits();
        let mut counts = Counts::new();
        for outcome in samples {
            let mut bits = vec!['0'; width];
            for &(qubit, clbit) in &measured {
                if outcome >> qubit & 1 == 1 {
                    bits[width - 1 - clbit] = '1';
                }
            }
            counts.insert(bits.into_iter().collect::<String>(), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {elapsed:?}");

        let metadata = serde_json::json!({
            "backend": self.capabilities.name,
            "num_qubits": circuit.num_qubits(),
            "seed": self.seed,
        });
        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .with_metadata(metadata))
    }

    fn update(&self, job_id: &JobId, status: JobStatus, result: Option<ExecutionResult>) {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job.transition(status);
            if result.is_some() {
                sim_job.result = result;
            }
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Evolve |0…0⟩ through `circuit`, ignoring measurements and barriers.
///
/// # Errors
///
/// Returns [`HalError::InvalidCircuit`] if a gate angle is still symbolic.
pub fn statevector(circuit: &Circuit) -> HalResult<Statevector> {
    Statevector::from_circuit(circuit).map_err(|e| HalError::InvalidCircuit(e.to_string()))
}

/// Pairs of (qubit, clbit) written by the circuit's measurements.
///
/// Fails if a qubit is touched again after being measured.
fn measurement_map(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
    let mut measured = vec![false; circuit.num_qubits()];
    let mut map = Vec::new();
    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Measure => {
                let qubit = inst.qubits[0].index();
                measured[qubit] = true;
                map.push((qubit, inst.clbits[0].index()));
            }
            InstructionKind::Barrier => {}
            InstructionKind::Gate(_) => {
                if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                    return Err(HalError::Unsupported(format!(
                        "gate '{}' acts on {q} after it was measured",
                        inst.name()
                    )));
                }
            }
        }
    }
    Ok(map)
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        if let Err(e) = self.check_size(circuit) {
            return Ok(ValidationResult::Invalid {
                reasons: vec![e.to_string()],
            });
        }
        let missing = self.unsupported_gates(circuit);
        if !missing.is_empty() {
            return Ok(ValidationResult::RequiresTranspilation {
                details: format!("unsupported gates: {}", missing.join(", ")),
            });
        }
        Ok(ValidationResult::Valid)
    }

    #[instrument(skip(self, circuit, parameters), fields(circuit = circuit.name()))]
    async fn submit(
        &self,
        circuit: &Circuit,
        shots: u32,
        parameters: Option<&FxHashMap<String, f64>>,
    ) -> HalResult<JobId> {
        self.check_size(circuit)?;
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "shots must be between 1 and {}, got {shots}",
                self.capabilities.max_shots
            )));
        }
        let missing = self.unsupported_gates(circuit);
        if !missing.is_empty() {
            return Err(HalError::InvalidCircuit(format!(
                "unsupported gates: {}",
                missing.join(", ")
            )));
        }

        let bound = match parameters {
            Some(values) => circuit.bind_parameters(values),
            None => circuit.clone(),
        };
        if let Some(name) = bound.parameters().into_iter().next() {
            return Err(HalError::InvalidCircuit(format!(
                "parameter '{name}' is unbound"
            )));
        }
        if !bound.has_measurements() {
            return Err(HalError::InvalidCircuit(format!(
                "circuit '{}' has no measurements",
                bound.name()
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), bound.name(), shots, self.name());
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }
        debug!("Submitted job: {job_id}");

        self.update(&job_id, JobStatus::Running, None);
        match self.run_simulation(&bound, shots) {
            Ok(result) => self.update(&job_id, JobStatus::Completed, Some(result)),
            Err(e) => {
                debug!("Job {job_id} failed: {e}");
                self.update(&job_id, JobStatus::Failed(e.to_string()), None);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result yet ({status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        sim_job.job.transition(JobStatus::Cancelled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfact_ir::QubitId;

    fn bell() -> Circuit {
        qfact_ir::library::bell().unwrap()
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let sim = SimulatorBackend::new();
        let caps = sim.capabilities();
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, DEFAULT_MAX_QUBITS);
        assert!(caps.has_feature("expectation"));
        assert!(sim.availability().await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_bell_state() {
        let sim = SimulatorBackend::with_seed(1);
        let job_id = sim.submit(&bell(), 1000, None).await.unwrap();
        let result = sim.wait(&job_id).await.unwrap();

        assert_eq!(result.counts.total_shots(), 1000);
        assert!(result.counts.iter().all(|(k, _)| k == "00" || k == "11"));
        assert!(result.counts.get("00") > 300);
        assert!(result.counts.get("11") > 300);
    }

    #[tokio::test]
    async fn test_seeded_runs_repeat() {
        let a = SimulatorBackend::with_seed(42);
        let b = SimulatorBackend::with_seed(42);
        let ja = a.submit(&bell(), 128, None).await.unwrap();
        let jb = b.submit(&bell(), 128, None).await.unwrap();
        assert_eq!(
            a.wait(&ja).await.unwrap().counts,
            b.wait(&jb).await.unwrap().counts
        );
    }

    #[tokio::test]
    async fn test_too_many_qubits() {
        let sim = SimulatorBackend::with_max_qubits(2);
        let mut circuit = Circuit::with_size("big", 3, 0);
        circuit.measure_all().unwrap();

        let result = sim.submit(&circuit, 10, None).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
        assert!(matches!(
            sim.validate(&circuit).await.unwrap(),
            ValidationResult::Invalid { .. }
        ));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let sim = SimulatorBackend::new();
        let result = sim.submit(&bell(), 0, None).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_unbound_parameters_rejected() {
        let sim = SimulatorBackend::new();
        let mut circuit = qfact_ir::library::real_amplitudes(2, 1).unwrap();
        circuit.measure_all().unwrap();
        let result = sim.submit(&circuit, 10, None).await;
        assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
    }

    #[tokio::test]
    async fn test_mid_circuit_measurement_fails_job() {
        let sim = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("mid", 1, 1);
        circuit.measure(QubitId(0), qfact_ir::ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();

        let job_id = sim.submit(&circuit, 10, None).await.unwrap();
        assert!(matches!(sim.status(&job_id).await.unwrap(), JobStatus::Failed(_)));
        assert!(matches!(sim.wait(&job_id).await, Err(HalError::JobFailed(_))));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let sim = SimulatorBackend::new();
        let result = sim.status(&JobId::new("missing")).await;
        assert!(matches!(result, Err(HalError::JobNotFound(_))));
    }
}
