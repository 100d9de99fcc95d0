//! The factorization demo: divisor enumeration reported next to estimator
//! and sampler results.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use qfact_adapter_sim::SimulatorBackend;
use qfact_compile::{BasisGates, Target};
use qfact_hal::{Backend, Counts};
use qfact_primitives::{
    Estimator, EstimatorPub, EstimatorPubResult, Sampler, SamplerPub, SamplerPubResult,
};

use crate::circuits::DemoCircuits;
use crate::config::DemoConfig;
use crate::error::{DemoError, DemoResult};
use crate::problems::{THETA1, THETA2, THETA3, divisors_below, h1, h2, h3};
use crate::visual::{factor_slices, render_circuit, render_pie, show_image};
use crate::{create_spinner, print_header, print_result, print_section, print_success};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    /// Estimator results for `psi1` and `psi2`, in that order.
    pub expectation_values: Vec<EstimatorPubResult>,
    /// Bell circuit counts.
    pub bell_counts: Counts,
    /// Counts of the measured ansätze, reps 2 then reps 3.
    pub pqc_counts: Vec<Counts>,
    /// The analyzed number.
    pub number: u64,
    /// Its divisors below itself.
    pub divisors: Vec<u64>,
    /// Whether the picture was shown.
    pub image_shown: bool,
}

/// Runs the demo end to end.
pub struct FactorizationDemo;

impl FactorizationDemo {
    /// Run the demo and write the report to `out`.
    #[instrument(skip_all, fields(number = config.number.get()))]
    pub async fn run(config: &DemoConfig, out: &mut impl Write) -> DemoResult<DemoOutcome> {
        let start = Instant::now();
        let backend = Arc::new(match config.seed {
            Some(seed) => SimulatorBackend::with_seed(seed),
            None => SimulatorBackend::new(),
        });
        let estimator = match config.seed {
            Some(seed) => Estimator::with_seed(seed),
            None => Estimator::new(),
        };

        let caps = backend.capabilities();
        let target = Target::new(
            caps.name.clone(),
            caps.num_qubits,
            BasisGates::new(caps.gate_set.basis()),
        );
        let circuits = DemoCircuits::build(&target)?;

        print_header(out, "Approximate factorization with quantum simulation")?;

        print_section(out, "Estimator")?;
        let spinner = create_spinner("Estimating expectation values...");
        let pubs = [
            EstimatorPub::new(circuits.psi1.clone(), vec![h1()?, h3()?])
                .with_parameter_values(vec![THETA1.to_vec(), THETA3.to_vec()]),
            EstimatorPub::new(circuits.psi2.clone(), h2()?).with_parameter_values(THETA2.to_vec()),
        ];
        let expectation_values = estimator.run(&pubs, Some(config.precision))?;
        spinner.finish_and_clear();
        writeln!(
            out,
            "expectation values : psi1 = {:.4}, psi2 = {:.4}",
            expectation_values[0].evs, expectation_values[1].evs
        )?;
        print_result(out, "precision", config.precision)?;

        print_section(out, "Sampler")?;
        let sampler = Sampler::new(backend.clone());
        let spinner = create_spinner("Sampling circuits...");
        let bell = sampler
            .run(&[SamplerPub::new(circuits.bell.clone())], Some(config.bell_shots))
            .await?;
        let bell_counts = meas_counts(&bell[0])?;
        writeln!(out, "counts for Bell circuit : {bell_counts}")?;

        let pqc = sampler
            .run(
                &[
                    SamplerPub::new(circuits.pqc.clone()).with_parameter_values(THETA1.to_vec()),
                    SamplerPub::new(circuits.pqc2.clone()).with_parameter_values(THETA2.to_vec()),
                ],
                None,
            )
            .await?;
        spinner.finish_and_clear();
        let pqc_counts = pqc.iter().map(meas_counts).collect::<DemoResult<Vec<_>>>()?;
        for (i, counts) in pqc_counts.iter().enumerate() {
            writeln!(out, "counts for parameterized circuit {} : {counts}", i + 1)?;
        }

        let number = config.number.get();
        print_section(out, "Divisors")?;
        writeln!(out, "Factorization simulation for the number {number}:")?;
        writeln!(out)?;
        let divisors = divisors_below(number);
        writeln!(out, "Possible factors of the number {number}: {divisors:?}")?;
        info!("Found {} divisors of {number}", divisors.len());

        print_section(out, "Picture")?;
        let image_shown = show_image(out, config.image_path.as_deref())?;

        print_section(out, "Quantum circuits")?;
        for circuit in [&circuits.bell, &circuits.pqc, &circuits.pqc2] {
            render_circuit(out, circuit)?;
        }

        print_section(out, "Factor chart")?;
        render_pie(out, number, &factor_slices(&divisors))?;

        writeln!(out)?;
        print_success(
            out,
            &format!("Demo completed in {:.2?}", start.elapsed()),
        )?;

        Ok(DemoOutcome {
            expectation_values,
            bell_counts,
            pqc_counts,
            number,
            divisors,
            image_shown,
        })
    }
}

fn meas_counts(result: &SamplerPubResult) -> DemoResult<Counts> {
    result
        .data("meas")
        .cloned()
        .ok_or_else(|| DemoError::MissingRegister("meas".into()))
}
