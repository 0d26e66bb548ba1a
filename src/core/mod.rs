mod error;
mod problem;
mod solution;
mod util;

pub use error::*;
pub use problem::*;
pub use solution::*;
pub use util::*;

/// Schedules a set of processes on a single CPU.
pub trait Scheduler: Send + Sync {
    /// Simulates the given processes.
    /// The processes must already be validated and non-empty.
    fn schedule(&self, processes: &[Process]) -> Simulation;

    /// Returns the algorithm implemented by the scheduler.
    fn algorithm(&self) -> Algorithm;

    /// Returns whether a running process can be interrupted.
    fn preemptive(&self) -> bool {
        false
    }

    /// Returns the name of the scheduler.
    fn name(&self) -> &str {
        self.algorithm().name()
    }
}
