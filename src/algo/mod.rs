mod fcfs;
mod non_preemptive;
mod priority;
mod round_robin;
mod sjf;

pub use fcfs::FirstComeFirstServed;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

use crate::core::{Algorithm, Scheduler, SimulationError, Time};

/// Creates the scheduler implementing the given algorithm.
/// The quantum is only used by round robin and ignored otherwise.
///
/// # Errors
/// - `SimulationError::InvalidQuantum` if round robin is selected without a positive quantum.
pub fn scheduler(
    algorithm: Algorithm,
    quantum: Option<Time>,
) -> Result<Box<dyn Scheduler>, SimulationError> {
    let scheduler: Box<dyn Scheduler> = match algorithm {
        Algorithm::Fcfs => Box::new(FirstComeFirstServed),
        Algorithm::Sjf => Box::new(ShortestJobFirst),
        Algorithm::Priority => Box::new(Priority),
        Algorithm::RoundRobin => {
            let quantum = quantum.ok_or(SimulationError::InvalidQuantum(None))?;
            Box::new(RoundRobin::new(quantum)?)
        }
    };
    Ok(scheduler)
}
