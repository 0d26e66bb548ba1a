use super::{ProcessId, Time};

/// Reason why a process was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProcessDefect {
    #[error("arrival time {0} is negative")]
    NegativeArrival(Time),
    #[error("burst time {0} is not positive")]
    NonPositiveBurst(Time),
}

/// Errors reported by the scheduling engine.
/// All of them are detected before any simulation state is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// No processes were given.
    #[error("no processes to schedule")]
    EmptyProcessSet,
    /// A process has a negative arrival or a non-positive burst.
    #[error("invalid process {id}: {defect}")]
    InvalidProcess { id: ProcessId, defect: ProcessDefect },
    /// Two processes share the same id.
    #[error("process {0} is defined more than once")]
    DuplicateProcess(ProcessId),
    /// The latest arrival plus the total burst does not fit in `Time`.
    #[error("the processes cannot be scheduled without the clock overflowing")]
    TimeOverflow,
    /// Round Robin was selected without a positive quantum.
    #[error("round robin requires a positive quantum, got {}", display_quantum(.0))]
    InvalidQuantum(Option<Time>),
}

fn display_quantum(quantum: &Option<Time>) -> String {
    quantum.map_or_else(|| "none".into(), |quantum| quantum.to_string())
}
