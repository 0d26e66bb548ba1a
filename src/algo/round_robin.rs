use crate::core::{
    Algorithm, JobIndex, Process, Scheduler, Simulation, SimulationBuilder, SimulationError, Time,
};
use std::collections::VecDeque;

/// Preemptive round robin with a fixed quantum and a FIFO ready queue.
/// Every process is queued up front in arrival order. A process dequeued before
/// its arrival makes the CPU wait for it, even if preempted processes are queued
/// behind it.
#[derive(Clone, Debug)]
pub struct RoundRobin {
    quantum: Time,
}

impl RoundRobin {
    /// Creates a round robin scheduler.
    ///
    /// # Errors
    /// - `SimulationError::InvalidQuantum` if the quantum is not positive.
    pub const fn new(quantum: Time) -> Result<Self, SimulationError> {
        if quantum > 0 {
            Ok(Self { quantum })
        } else {
            Err(SimulationError::InvalidQuantum(Some(quantum)))
        }
    }

    #[must_use]
    pub const fn quantum(&self) -> Time {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn schedule(&self, processes: &[Process]) -> Simulation {
        let mut builder =
            SimulationBuilder::new(Algorithm::RoundRobin, Some(self.quantum), processes);
        let mut queue: VecDeque<JobIndex> = (0..builder.jobs().len()).collect();

        while let Some(index) = queue.pop_front() {
            builder.idle_until(builder.job(index).arrival);
            builder.run(index, self.quantum);

            if !builder.is_completed(index) {
                log::trace!("{} is preempted at {}", builder.job(index).id, builder.clock());
                queue.push_back(index);
            }
        }

        builder.into()
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn preemptive(&self) -> bool {
        true
    }
}
