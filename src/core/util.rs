use super::{Algorithm, Metrics, Process, ProcessId, Segment, Simulation, Time};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Index of a process inside the arrival ordered working set.
pub type JobIndex = usize;

/// Returns the processes ordered by arrival.
/// The sort is stable, so simultaneous arrivals keep their insertion order.
#[must_use]
pub fn arrival_order(processes: &[Process]) -> Vec<Process> {
    let mut sorted = processes.to_vec();
    sorted.sort_by_key(|process| process.arrival);
    sorted
}

/// Compares two ready processes by the given key, then by arrival, then by id.
/// The smaller process is selected first.
#[must_use]
pub fn ready_comparator<K: Ord>(
    key: impl Fn(&Process) -> K,
) -> impl Fn(&&Process, &&Process) -> Ordering {
    move |first: &&Process, second: &&Process| {
        key(*first)
            .cmp(&key(*second))
            .then(first.arrival.cmp(&second.arrival))
            .then(first.id.cmp(&second.id))
    }
}

/// A builder for creating a simulation.
/// It owns a private arrival ordered copy of the processes, the clock and the
/// completion bookkeeping of a single run.
#[derive(Clone, Debug)]
pub struct SimulationBuilder {
    algorithm: Algorithm,
    quantum: Option<Time>,
    jobs: Vec<Process>,
    remaining: Vec<Time>,
    completions: Vec<Option<Time>>,
    timeline: Vec<Segment>,
    clock: Time,
}

impl SimulationBuilder {
    /// Creates a new builder over a working copy of the processes.
    #[must_use]
    pub fn new(algorithm: Algorithm, quantum: Option<Time>, processes: &[Process]) -> Self {
        let jobs = arrival_order(processes);
        Self {
            algorithm,
            quantum,
            remaining: jobs.iter().map(|process| process.burst).collect(),
            completions: vec![None; jobs.len()],
            timeline: Vec::with_capacity(jobs.len()),
            clock: 0,
            jobs,
        }
    }

    /// Returns the processes in arrival order.
    #[must_use]
    pub fn jobs(&self) -> &[Process] {
        &self.jobs
    }

    /// Returns the process at the given index.
    #[must_use]
    pub fn job(&self, index: JobIndex) -> &Process {
        &self.jobs[index]
    }

    /// Returns the current time.
    #[must_use]
    pub const fn clock(&self) -> Time {
        self.clock
    }

    /// Returns the CPU time the job still needs.
    #[must_use]
    pub fn remaining(&self, index: JobIndex) -> Time {
        self.remaining[index]
    }

    /// Returns whether the job has finished.
    #[must_use]
    pub fn is_completed(&self, index: JobIndex) -> bool {
        self.completions[index].is_some()
    }

    /// Leaves the CPU idle until the given time.
    /// Does nothing if the clock is already past it.
    pub fn idle_until(&mut self, time: Time) {
        if time > self.clock {
            log::debug!("CPU idle from {} to {time}", self.clock);
            self.clock = time;
        }
    }

    /// Runs the job for at most `limit` time units starting at the current clock.
    /// Records the completion if the job has no time left.
    /// Returns the time actually executed.
    pub fn run(&mut self, index: JobIndex, limit: Time) -> Time {
        let job = &self.jobs[index];
        debug_assert!(job.arrival <= self.clock, "{} runs before arrival", job.id);
        debug_assert!(!self.is_completed(index), "{} runs after completion", job.id);

        let slice = limit.min(self.remaining[index]);
        let segment = Segment::new(job.id, self.clock, self.clock + slice);
        log::debug!("{} runs from {} to {}", job.id, segment.start, segment.end);

        self.timeline.push(segment);
        self.clock = segment.end;
        self.remaining[index] -= slice;

        if self.remaining[index] == 0 {
            self.completions[index] = Some(self.clock);
        }

        slice
    }

    /// Runs the job until it completes.
    pub fn run_to_completion(&mut self, index: JobIndex) {
        self.run(index, self.remaining[index]);
    }
}

impl From<SimulationBuilder> for Simulation {
    fn from(builder: SimulationBuilder) -> Self {
        let metrics: BTreeMap<ProcessId, Metrics> = builder
            .jobs
            .iter()
            .zip(&builder.completions)
            .filter_map(|(job, completion)| completion.map(|time| (job.id, Metrics::new(job, time))))
            .collect();

        debug_assert_eq!(metrics.len(), builder.jobs.len(), "Unfinished processes");

        Self::new(builder.algorithm, builder.quantum, builder.timeline, metrics)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn processes() -> Vec<Process> {
        vec![
            Process::with_priority(ProcessId::new(0), 4, 2, 1),
            Process::with_priority(ProcessId::new(1), 0, 2, 3),
            Process::with_priority(ProcessId::new(2), 4, 1, 1),
        ]
    }

    #[test]
    fn test_arrival_order_is_stable() {
        let ids: Vec<_> = arrival_order(&processes()).iter().map(|p| p.id.index()).collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_ready_comparator() {
        let processes = processes();
        let by_priority = ready_comparator(|process: &Process| process.priority);
        let first = processes.iter().min_by(|a, b| by_priority(a, b));
        assert_eq!(first.map(|p| p.id), Some(ProcessId::new(0)));

        let by_burst = ready_comparator(|process: &Process| process.burst);
        let first = processes.iter().min_by(|a, b| by_burst(a, b));
        assert_eq!(first.map(|p| p.id), Some(ProcessId::new(2)));
    }

    #[test]
    fn test_builder() {
        let processes = processes();
        let mut builder = SimulationBuilder::new(Algorithm::Fcfs, None, &processes);

        assert_eq!(builder.run(0, 1), 1);
        assert_eq!(builder.remaining(0), 1);
        assert!(!builder.is_completed(0));
        builder.run_to_completion(0);
        assert!(builder.is_completed(0));

        builder.idle_until(1);
        assert_eq!(builder.clock(), 2);
        builder.idle_until(4);
        builder.run_to_completion(1);
        builder.run_to_completion(2);

        let simulation = Simulation::from(builder);
        assert!(simulation.verify(&processes));
        assert_eq!(simulation.makespan(), 7);
        assert_eq!(simulation.metrics_of(ProcessId::new(2)).map(|m| m.waiting), Some(2));
    }
}
