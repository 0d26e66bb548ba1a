use crate::core::{Algorithm, Process, Scheduler, Simulation, SimulationBuilder};

/// First come, first served.
/// Processes run to completion in arrival order.
#[derive(Clone, Debug, Default)]
pub struct FirstComeFirstServed;

impl Scheduler for FirstComeFirstServed {
    fn schedule(&self, processes: &[Process]) -> Simulation {
        let mut builder = SimulationBuilder::new(Algorithm::Fcfs, None, processes);

        for index in 0..builder.jobs().len() {
            builder.idle_until(builder.job(index).arrival);
            builder.run_to_completion(index);
        }

        builder.into()
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }
}
