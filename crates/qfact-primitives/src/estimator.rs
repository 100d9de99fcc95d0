//! Expectation-value estimation.
//!
//! Each [`EstimatorPub`] pairs a circuit with observables and parameter
//! bindings. The result arrays broadcast bindings against observables:
//!
//! | bindings | observables | `evs` shape |
//! |----------|-------------|-------------|
//! | `List(m)` | `List(k)` | `[m, k]` |
//! | `List(m)` | `Single` | `[m]` |
//! | `None` / `Single` | `List(k)` | `[k]` |
//! | `None` / `Single` | `Single` | `[]` |

use ndarray::{ArrayD, IxDyn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

use qfact_adapter_sim::{DEFAULT_MAX_QUBITS, statevector};
use qfact_hal::{HalError, HalResult};
use qfact_ir::Circuit;

use crate::binding::ParameterValues;
use crate::observable::SparsePauliOp;

/// One observable or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Observables {
    /// A single observable; contributes no array axis.
    Single(SparsePauliOp),
    /// Several observables; contributes the last array axis.
    List(Vec<SparsePauliOp>),
}

impl Observables {
    fn as_slice(&self) -> &[SparsePauliOp] {
        match self {
            Self::Single(op) => std::slice::from_ref(op),
            Self::List(ops) => ops,
        }
    }
}

impl From<SparsePauliOp> for Observables {
    fn from(op: SparsePauliOp) -> Self {
        Self::Single(op)
    }
}

impl From<Vec<SparsePauliOp>> for Observables {
    fn from(ops: Vec<SparsePauliOp>) -> Self {
        Self::List(ops)
    }
}

/// A primitive unified bloc for the estimator.
#[derive(Debug, Clone)]
pub struct EstimatorPub {
    /// Circuit preparing the state. Must not contain measurements that
    /// are followed by gates.
    pub circuit: Circuit,
    /// Observables to evaluate.
    pub observables: Observables,
    /// Parameter bindings.
    pub parameter_values: ParameterValues,
    /// Overrides the run-level precision.
    pub precision: Option<f64>,
}

impl EstimatorPub {
    /// Create a pub for a circuit without free parameters.
    pub fn new(circuit: Circuit, observables: impl Into<Observables>) -> Self {
        Self {
            circuit,
            observables: observables.into(),
            parameter_values: ParameterValues::None,
            precision: None,
        }
    }

    /// Set the parameter bindings.
    pub fn with_parameter_values(mut self, values: impl Into<ParameterValues>) -> Self {
        self.parameter_values = values.into();
        self
    }

    /// Set a precision for this pub only.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Metadata attached to an [`EstimatorPubResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorMetadata {
    /// Precision the values were computed at.
    pub target_precision: f64,
    /// Number of parameter bindings evaluated.
    pub num_bindings: usize,
}

/// Expectation values of one pub.
#[derive(Debug, Clone)]
pub struct EstimatorPubResult {
    /// Expectation values.
    pub evs: ArrayD<f64>,
    /// Standard errors, equal to the target precision.
    pub stds: ArrayD<f64>,
    /// Run metadata.
    pub metadata: EstimatorMetadata,
}

/// Exact statevector estimator with optional simulated shot noise.
pub struct Estimator {
    default_precision: f64,
    max_qubits: u32,
    rng: Mutex<StdRng>,
}

impl Estimator {
    /// Create an estimator with exact results by default.
    pub fn new() -> Self {
        Self::build(StdRng::from_entropy())
    }

    /// Create an estimator whose noise is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed))
    }

    fn build(rng: StdRng) -> Self {
        Self {
            default_precision: 0.0,
            max_qubits: DEFAULT_MAX_QUBITS,
            rng: Mutex::new(rng),
        }
    }

    /// Set the precision used when neither the run nor the pub sets one.
    pub fn with_default_precision(mut self, precision: f64) -> Self {
        self.default_precision = precision;
        self
    }

    /// Evaluate every pub, in order.
    ///
    /// # Errors
    ///
    /// - [`HalError::InvalidPrecision`] for a negative or non-finite precision.
    /// - [`HalError::InvalidCircuit`] when a binding has the wrong length, an
    ///   observable's qubit count differs from the circuit's, or a parameter
    ///   is left unbound.
    /// - [`HalError::CircuitTooLarge`] when a circuit exceeds the simulator.
    #[instrument(skip_all, fields(pubs = pubs.len()))]
    pub fn run(
        &self,
        pubs: &[EstimatorPub],
        precision: Option<f64>,
    ) -> HalResult<Vec<EstimatorPubResult>> {
        pubs.iter()
            .map(|p| {
                let precision = p.precision.or(precision).unwrap_or(self.default_precision);
                self.run_pub(p, precision)
            })
            .collect()
    }

    fn run_pub(&self, pub_: &EstimatorPub, precision: f64) -> HalResult<EstimatorPubResult> {
        if !precision.is_finite() || precision < 0.0 {
            return Err(HalError::InvalidPrecision(precision));
        }
        let circuit = &pub_.circuit;
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but estimator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        let observables = pub_.observables.as_slice();
        if let Some(op) = observables
            .iter()
            .find(|op| op.num_qubits() != circuit.num_qubits())
        {
            return Err(HalError::InvalidCircuit(format!(
                "observable acts on {} qubits but circuit '{}' has {}",
                op.num_qubits(),
                circuit.name(),
                circuit.num_qubits()
            )));
        }

        let bindings = pub_.parameter_values.bindings();
        let mut evs = Vec::with_capacity(bindings.len() * observables.len());
        for values in &bindings {
            let bound = circuit
                .assign_parameters(values)
                .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
            let sv = statevector(&bound)?;
            evs.extend(
                observables
                    .iter()
                    .map(|op| op.evaluate(|label| sv.expectation_pauli(label))),
            );
        }

        if precision > 0.0 {
            let noise = Normal::new(0.0, precision)
                .map_err(|e| HalError::Backend(format!("noise model: {e}")))?;
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            for ev in &mut evs {
                *ev += noise.sample(&mut *rng);
            }
        }

        let mut shape = Vec::new();
        if let ParameterValues::List(list) = &pub_.parameter_values {
            shape.push(list.len());
        }
        if let Observables::List(ops) = &pub_.observables {
            shape.push(ops.len());
        }
        debug!(
            "Evaluated '{}' with shape {shape:?} at precision {precision}",
            circuit.name()
        );

        let stds = ArrayD::from_elem(IxDyn(&shape), precision);
        let evs = ArrayD::from_shape_vec(IxDyn(&shape), evs)
            .map_err(|e| HalError::Backend(format!("result shape: {e}")))?;
        Ok(EstimatorPubResult {
            evs,
            stds,
            metadata: EstimatorMetadata {
                target_precision: precision,
                num_bindings: bindings.len(),
            },
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfact_ir::library::real_amplitudes;

    fn zi() -> SparsePauliOp {
        SparsePauliOp::from_list([("ZI", 1.0)]).unwrap()
    }

    #[test]
    fn test_exact_single_value_is_zero_dimensional() {
        let circuit = real_amplitudes(2, 2).unwrap();
        let pub_ = EstimatorPub::new(circuit, zi()).with_parameter_values(vec![0.0; 6]);
        let results = Estimator::new().run(&[pub_], None).unwrap();

        assert_eq!(results[0].evs.ndim(), 0);
        assert!((results[0].evs[IxDyn(&[])] - 1.0).abs() < 1e-10);
        assert_eq!(results[0].stds[IxDyn(&[])], 0.0);
    }

    #[test]
    fn test_negative_precision_rejected() {
        let circuit = real_amplitudes(1, 0).unwrap();
        let pub_ = EstimatorPub::new(circuit, SparsePauliOp::from_list([("Z", 1.0)]).unwrap())
            .with_parameter_values(vec![0.0]);
        let result = Estimator::new().run(&[pub_], Some(-0.1));
        assert!(matches!(result, Err(HalError::InvalidPrecision(_))));
    }

    #[test]
    fn test_infinite_precision_rejected() {
        let circuit = real_amplitudes(2, 2).unwrap();
        let pub_ = EstimatorPub::new(circuit, zi()).with_parameter_values(vec![0.0; 6]);
        let result = Estimator::new().run(&[pub_], Some(f64::INFINITY));
        assert!(matches!(result, Err(HalError::InvalidPrecision(p)) if p.is_infinite()));
    }

    #[test]
    fn test_default_precision_used_without_overrides() {
        let circuit = real_amplitudes(2, 2).unwrap();
        let pub_ = EstimatorPub::new(circuit, zi()).with_parameter_values(vec![0.0; 6]);
        let estimator = Estimator::with_seed(3).with_default_precision(0.25);

        let results = estimator.run(&[pub_.clone()], None).unwrap();
        assert_eq!(results[0].metadata.target_precision, 0.25);
        assert_eq!(results[0].stds[IxDyn(&[])], 0.25);

        let results = estimator.run(&[pub_], Some(0.0)).unwrap();
        assert_eq!(results[0].metadata.target_precision, 0.0);
        assert!((results[0].evs[IxDyn(&[])] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pub_precision_overrides_run_precision() {
        let circuit = real_amplitudes(2, 2).unwrap();
        let pub_ = EstimatorPub::new(circuit, zi())
            .with_parameter_values(vec![0.0; 6])
            .with_precision(0.0);
        let results = Estimator::with_seed(1).run(&[pub_], Some(0.5)).unwrap();
        assert_eq!(results[0].metadata.target_precision, 0.0);
        assert!((results[0].evs[IxDyn(&[])] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_observable_width_mismatch() {
        let circuit = real_amplitudes(2, 2).unwrap();
        let op = SparsePauliOp::from_list([("Z", 1.0)]).unwrap();
        let pub_ = EstimatorPub::new(circuit, op).with_parameter_values(vec![0.0; 6]);
        let result = Estimator::new().run(&[pub_], None);
        assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
    }
}
