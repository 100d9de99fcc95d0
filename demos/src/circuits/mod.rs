//! Circuits evaluated by the demo.

use tracing::debug;

use qfact_compile::{Target, transpile};
use qfact_ir::Circuit;
use qfact_ir::library::{bell, real_amplitudes};

use crate::error::DemoResult;

/// Every circuit one run needs, already adapted to the target.
#[derive(Debug, Clone)]
pub struct DemoCircuits {
    /// 2-qubit `RealAmplitudes`, 2 reps, unmeasured.
    pub psi1: Circuit,
    /// 2-qubit `RealAmplitudes`, 3 reps, unmeasured.
    pub psi2: Circuit,
    /// Measured Bell pair.
    pub bell: Circuit,
    /// Measured copy of the reps-2 ansatz.
    pub pqc: Circuit,
    /// Measured copy of the reps-3 ansatz.
    pub pqc2: Circuit,
}

impl DemoCircuits {
    /// Build and transpile the circuits at optimization level 0.
    pub fn build(target: &Target) -> DemoResult<Self> {
        let psi1 = transpile(&real_amplitudes(2, 2)?, target, 0)?;
        let psi2 = transpile(&real_amplitudes(2, 3)?, target, 0)?;

        let mut pqc = real_amplitudes(2, 2)?;
        pqc.measure_all()?;
        let pqc = transpile(&pqc, target, 0)?;
        let mut pqc2 = real_amplitudes(2, 3)?;
        pqc2.measure_all()?;
        let pqc2 = transpile(&pqc2, target, 0)?;

        debug!(
            "Built circuits: psi1 {} params, psi2 {} params",
            psi1.num_parameters(),
            psi2.num_parameters()
        );
        Ok(Self {
            psi1,
            psi2,
            bell: bell()?,
            pqc,
            pqc2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfact_compile::BasisGates;

    #[test]
    fn test_build_for_simulator_basis() {
        let circuits = DemoCircuits::build(&Target::new("sim", 2, BasisGates::simulator())).unwrap();
        assert_eq!(circuits.psi1.num_parameters(), 6);
        assert_eq!(circuits.psi2.num_parameters(), 8);
        assert!(!circuits.psi1.has_measurements());
        assert!(circuits.pqc.has_measurements());
        assert_eq!(circuits.pqc2.registers()[0].name, "meas");
    }

    #[test]
    fn test_build_for_restricted_basis() {
        let circuits = DemoCircuits::build(&Target::new("ibm", 2, BasisGates::ibm())).unwrap();
        assert_eq!(circuits.psi1.num_parameters(), 6);
        assert!(circuits.psi1.instructions().iter().all(|i| i.name() != "ry"));
    }

    #[test]
    fn test_build_fails_for_small_target() {
        assert!(DemoCircuits::build(&Target::new("one", 1, BasisGates::simulator())).is_err());
    }
}
