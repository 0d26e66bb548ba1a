use super::{ProcessDefect, SimulationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Discrete simulation time unit.
pub type Time = i64;

/// Identifier of a process. Ids are zero based and assigned in insertion order,
/// but displayed one based (`P1`, `P2`, ...).
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct ProcessId(usize);

impl ProcessId {
    /// Creates an id from a zero based index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero based index of the id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// A process submitted for scheduling.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Time,
    pub burst: Time,
    /// Lower value means more urgent. Only used by the priority scheduler.
    #[serde(default)]
    pub priority: i64,
}

impl Process {
    /// Creates a process with the default priority 0.
    #[must_use]
    pub const fn new(id: ProcessId, arrival: Time, burst: Time) -> Self {
        Self::with_priority(id, arrival, burst, 0)
    }

    /// Creates a process with an explicit priority.
    #[must_use]
    pub const fn with_priority(id: ProcessId, arrival: Time, burst: Time, priority: i64) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority,
        }
    }

    /// Checks that the arrival is non-negative and the burst is positive.
    ///
    /// # Errors
    /// - `SimulationError::InvalidProcess` describing the first defect found.
    pub const fn validate(&self) -> Result<(), SimulationError> {
        let defect = if self.arrival < 0 {
            ProcessDefect::NegativeArrival(self.arrival)
        } else if self.burst <= 0 {
            ProcessDefect::NonPositiveBurst(self.burst)
        } else {
            return Ok(());
        };
        Err(SimulationError::InvalidProcess { id: self.id, defect })
    }
}

/// Available scheduling algorithms.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Algorithm {
    /// First come, first served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Non-preemptive shortest job first.
    #[serde(rename = "SJF")]
    Sjf,
    /// Round robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin,
    /// Non-preemptive static priority.
    Priority,
}

impl Algorithm {
    /// All algorithms in presentation order.
    pub const ALL: [Self; 4] = [Self::Fcfs, Self::Sjf, Self::RoundRobin, Self::Priority];

    /// Returns the short name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::RoundRobin => "RR",
            Self::Priority => "Priority",
        }
    }

    /// Returns whether the algorithm needs a quantum.
    #[must_use]
    pub const fn needs_quantum(self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm name is not recognized.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown scheduling algorithm `{0}`")]
pub struct UnknownAlgorithm(String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "rr" | "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            "priority" => Ok(Self::Priority),
            _ => Err(UnknownAlgorithm(name.into())),
        }
    }
}

/// A set of processes collected before a simulation.
/// Ids are assigned sequentially as processes are added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Creates an empty workload.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            processes: Vec::new(),
        }
    }

    /// Adds a process and returns its id.
    ///
    /// # Errors
    /// - If the arrival is negative or the burst is not positive.
    pub fn add(
        &mut self,
        arrival: Time,
        burst: Time,
        priority: i64,
    ) -> Result<ProcessId, SimulationError> {
        let id = ProcessId::new(self.processes.len());
        let process = Process::with_priority(id, arrival, burst, priority);
        process.validate()?;
        self.processes.push(process);
        Ok(id)
    }

    /// Removes all processes and restarts id numbering.
    pub fn reset(&mut self) {
        self.processes.clear();
    }

    /// Returns the processes in insertion order.
    #[must_use]
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Runs the given algorithm over the workload.
    ///
    /// # Errors
    /// - See [`crate::simulate`].
    pub fn simulate(
        &self,
        algorithm: Algorithm,
        quantum: Option<Time>,
    ) -> Result<super::Simulation, SimulationError> {
        crate::simulate(&self.processes, algorithm, quantum)
    }
}
