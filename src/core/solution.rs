use super::{Algorithm, Process, ProcessId, Time};
use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A contiguous execution slice of a single process on the CPU.
/// `start` is inclusive, `end` is exclusive.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Segment {
    pub process: ProcessId,
    pub start: Time,
    pub end: Time,
}

impl Segment {
    #[must_use]
    pub const fn new(process: ProcessId, start: Time, end: Time) -> Self {
        Self {
            process,
            start,
            end,
        }
    }

    #[must_use]
    pub const fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Per-process outcome of a simulation.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Metrics {
    pub arrival: Time,
    pub burst: Time,
    pub completion: Time,
    pub turnaround: Time,
    pub waiting: Time,
}

impl Metrics {
    /// Derives the metrics of a process from its completion time.
    #[must_use]
    pub const fn new(process: &Process, completion: Time) -> Self {
        let turnaround = completion - process.arrival;
        Self {
            arrival: process.arrival,
            burst: process.burst,
            completion,
            turnaround,
            waiting: turnaround - process.burst,
        }
    }
}

/// Result of running a scheduling algorithm over a set of processes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Simulation {
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantum: Option<Time>,
    pub timeline: Vec<Segment>,
    pub metrics: BTreeMap<ProcessId, Metrics>,
    pub average_waiting: f64,
    pub average_turnaround: f64,
}

impl Simulation {
    /// Builds a simulation from its timeline and per-process metrics.
    /// Averages are the unweighted means over all processes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(
        algorithm: Algorithm,
        quantum: Option<Time>,
        timeline: Vec<Segment>,
        metrics: BTreeMap<ProcessId, Metrics>,
    ) -> Self {
        let count = metrics.len().max(1) as f64;
        let waiting: f64 = metrics.values().map(|metrics| metrics.waiting as f64).sum();
        let turnaround: f64 = metrics.values().map(|metrics| metrics.turnaround as f64).sum();

        Self {
            algorithm,
            quantum,
            timeline,
            metrics,
            average_waiting: waiting / count,
            average_turnaround: turnaround / count,
        }
    }

    /// Returns the metrics of the given process.
    #[must_use]
    pub fn metrics_of(&self, process: ProcessId) -> Option<&Metrics> {
        self.metrics.get(&process)
    }

    /// Returns the segments of the given process in chronological order.
    pub fn segments_of(&self, process: ProcessId) -> impl Iterator<Item = &Segment> + '_ {
        self.timeline
            .iter()
            .filter(move |segment| segment.process == process)
    }

    /// Returns the time the last segment ends.
    #[must_use]
    pub fn makespan(&self) -> Time {
        self.timeline.last().map_or(0, |segment| segment.end)
    }

    /// Returns the total time the CPU was executing a process.
    #[must_use]
    pub fn busy_time(&self) -> Time {
        self.timeline.iter().map(Segment::duration).sum()
    }

    /// Returns the time the CPU was idle between time 0 and the makespan.
    #[must_use]
    pub fn idle_time(&self) -> Time {
        self.makespan() - self.busy_time()
    }

    /// Returns the fraction of time between 0 and the makespan the CPU was busy.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> f64 {
        match self.makespan() {
            0 => 0.0,
            makespan => self.busy_time() as f64 / makespan as f64,
        }
    }

    /// Returns how many times the CPU switched from one process to another.
    #[must_use]
    pub fn context_switches(&self) -> usize {
        self.timeline
            .windows(2)
            .filter(|pair| pair[0].process != pair[1].process)
            .count()
    }

    /// Verifies that the simulation is a valid single CPU schedule of the given processes:
    /// - segments are non-empty, chronological and do not overlap,
    /// - no process runs before its arrival,
    /// - every process receives exactly its burst and completes at the end of its last segment,
    /// - metrics and averages are consistent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn verify(&self, processes: &[Process]) -> bool {
        let by_id: HashMap<ProcessId, &Process> =
            processes.iter().map(|process| (process.id, process)).collect();
        let mut executed: HashMap<ProcessId, (Time, Time)> = HashMap::with_capacity(by_id.len());
        let mut clock = 0;

        for segment in &self.timeline {
            let Some(process) = by_id.get(&segment.process) else {
                return false;
            };
            if segment.duration() <= 0 || segment.start < clock || segment.start < process.arrival
            {
                return false;
            }
            clock = segment.end;

            let entry = executed.entry(segment.process).or_insert((0, 0));
            entry.0 += segment.duration();
            entry.1 = segment.end;
            if entry.0 > process.burst {
                return false;
            }
        }

        let complete = processes.iter().all(|process| {
            executed.get(&process.id).is_some_and(|&(time, end)| {
                time == process.burst
                    && self.metrics.get(&process.id) == Some(&Metrics::new(process, end))
            })
        });

        let count = processes.len().max(1) as f64;
        let waiting: f64 = self.metrics.values().map(|entry| entry.waiting as f64).sum();
        let turnaround: f64 = self.metrics.values().map(|entry| entry.turnaround as f64).sum();

        complete
            && self.metrics.len() == processes.len()
            && (self.average_waiting - waiting / count).abs() < 1e-9
            && (self.average_turnaround - turnaround / count).abs() < 1e-9
    }
}
