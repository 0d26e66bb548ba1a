#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use ahash::{HashSet, HashSetExt};
use crate::core::{Algorithm, Process, Simulation, SimulationError, Time};

pub mod algo;
pub mod core;
pub mod data;

/// Runs the algorithm over the processes and returns the timeline and statistics.
/// The processes are copied, the caller's records are never modified.
/// The quantum is required for round robin and ignored by the other algorithms.
///
/// # Errors
/// - `SimulationError::EmptyProcessSet` if there are no processes.
/// - `SimulationError::InvalidProcess` if a process has a negative arrival or a non-positive burst.
/// - `SimulationError::DuplicateProcess` if two processes share an id.
/// - `SimulationError::TimeOverflow` if the latest arrival plus the total burst overflows.
/// - `SimulationError::InvalidQuantum` if round robin is selected without a positive quantum.
pub fn simulate(
    processes: &[Process],
    algorithm: Algorithm,
    quantum: Option<Time>,
) -> Result<Simulation, SimulationError> {
    validate(processes)?;
    let scheduler = algo::scheduler(algorithm, quantum)?;
    let simulation = scheduler.schedule(processes);

    debug_assert!(simulation.verify(processes), "Simulation is invalid: {simulation:?}");
    debug_assert!(
        scheduler.preemptive() || simulation.timeline.len() == processes.len(),
        "{} split a process into several segments",
        scheduler.name()
    );

    log::info!(
        "{algorithm} scheduled {} processes: average waiting {:.2}, average turnaround {:.2}",
        processes.len(),
        simulation.average_waiting,
        simulation.average_turnaround
    );

    Ok(simulation)
}

fn validate(processes: &[Process]) -> Result<(), SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyProcessSet);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        process.validate()?;
        if !seen.insert(process.id) {
            return Err(SimulationError::DuplicateProcess(process.id));
        }
    }

    // Bounds every clock value reached by any algorithm.
    let latest = processes.iter().map(|process| process.arrival).max().unwrap_or_default();
    processes
        .iter()
        .try_fold(latest, |clock, process| clock.checked_add(process.burst))
        .map(|_| ())
        .ok_or(SimulationError::TimeOverflow)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{ProcessDefect, ProcessId, Segment};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn process(id: usize, arrival: Time, burst: Time, priority: i64) -> Process {
        Process::with_priority(ProcessId::new(id), arrival, burst, priority)
    }

    fn random_processes(rng: &mut StdRng) -> Vec<Process> {
        let count = rng.gen_range(1..16);
        (0..count)
            .map(|id| {
                let arrival = rng.gen_range(0..30);
                process(id, arrival, rng.gen_range(1..10), rng.gen_range(-2..5))
            })
            .collect()
    }

    #[test]
    fn test_schedule_properties() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..300 {
            let processes = random_processes(&mut rng);
            let quantum = rng.gen_range(1..6);

            for algorithm in Algorithm::ALL {
                let simulation = simulate(&processes, algorithm, Some(quantum))?;
                assert!(simulation.verify(&processes), "{algorithm}: {simulation:?}");

                for process in &processes {
                    let executed: Time = simulation
                        .segments_of(process.id)
                        .map(Segment::duration)
                        .sum();
                    assert_eq!(executed, process.burst);

                    let metrics = simulation.metrics_of(process.id).ok_or_else(|| {
                        anyhow::anyhow!("missing metrics for {}", process.id)
                    })?;
                    assert!(metrics.waiting >= 0);
                    assert!(metrics.turnaround >= process.burst);
                }

                let count = processes.len() as f64;
                let waiting: Time = simulation.metrics.values().map(|m| m.waiting).sum();
                let turnaround: Time = simulation.metrics.values().map(|m| m.turnaround).sum();
                assert!((simulation.average_waiting - waiting as f64 / count).abs() < 1e-9);
                assert!((simulation.average_turnaround - turnaround as f64 / count).abs() < 1e-9);
            }
        }

        Ok(())
    }

    #[test]
    fn test_non_preemptive_algorithms_run_in_one_segment() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let processes = random_processes(&mut rng);
            for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Priority] {
                let simulation = simulate(&processes, algorithm, None)?;
                assert_eq!(simulation.timeline.len(), processes.len());
            }
        }

        Ok(())
    }

    #[test]
    fn test_fcfs_example() -> anyhow::Result<()> {
        let processes = [process(0, 0, 5, 0), process(1, 1, 3, 0)];
        let simulation = simulate(&processes, Algorithm::Fcfs, None)?;

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(0), 0, 5),
                Segment::new(ProcessId::new(1), 5, 8)
            ]
        );
        assert!((simulation.average_waiting - 2.0).abs() < 1e-9);
        assert!((simulation.average_turnaround - 6.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_repeated_runs_are_independent() -> anyhow::Result<()> {
        let processes = vec![process(0, 0, 5, 1), process(1, 1, 3, 0), process(2, 2, 4, 2)];
        let copy = processes.clone();

        let first = simulate(&processes, Algorithm::RoundRobin, Some(2))?;
        let second = simulate(&processes, Algorithm::RoundRobin, Some(2))?;

        assert_eq!(first, second);
        assert_eq!(processes, copy);
        Ok(())
    }

    #[test]
    fn test_parallel_runs() -> anyhow::Result<()> {
        let processes = vec![process(0, 0, 7, 2), process(1, 2, 4, 1), process(2, 3, 1, 0)];
        let expected = simulate(&processes, Algorithm::RoundRobin, Some(3))?;

        let results = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| simulate(&processes, Algorithm::RoundRobin, Some(3))))
                .collect();
            handles.into_iter().map(|handle| handle.join()).collect::<Vec<_>>()
        });

        for result in results {
            match result {
                Ok(simulation) => assert_eq!(simulation?, expected),
                Err(_) => anyhow::bail!("simulation thread panicked"),
            }
        }
        Ok(())
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            simulate(&[], Algorithm::Fcfs, None),
            Err(SimulationError::EmptyProcessSet)
        );
        assert_eq!(
            simulate(&[process(0, 0, 0, 0)], Algorithm::Sjf, None),
            Err(SimulationError::InvalidProcess {
                id: ProcessId::new(0),
                defect: ProcessDefect::NonPositiveBurst(0)
            })
        );
        assert_eq!(
            simulate(&[process(0, -2, 3, 0)], Algorithm::Priority, None),
            Err(SimulationError::InvalidProcess {
                id: ProcessId::new(0),
                defect: ProcessDefect::NegativeArrival(-2)
            })
        );
        assert_eq!(
            simulate(&[process(0, 0, 3, 0)], Algorithm::RoundRobin, Some(0)),
            Err(SimulationError::InvalidQuantum(Some(0)))
        );
        assert_eq!(
            simulate(&[process(0, 0, 3, 0)], Algorithm::RoundRobin, None),
            Err(SimulationError::InvalidQuantum(None))
        );
        assert_eq!(
            simulate(&[process(1, 0, 3, 0), process(1, 2, 1, 0)], Algorithm::Fcfs, None),
            Err(SimulationError::DuplicateProcess(ProcessId::new(1)))
        );
    }

    #[test]
    fn test_time_overflow() {
        for algorithm in Algorithm::ALL {
            assert_eq!(
                simulate(&[process(0, Time::MAX - 1, 5, 0)], algorithm, Some(2)),
                Err(SimulationError::TimeOverflow)
            );
            assert_eq!(
                simulate(
                    &[process(0, 0, Time::MAX / 2, 0), process(1, 3, Time::MAX / 2, 0)],
                    algorithm,
                    Some(2)
                ),
                Err(SimulationError::TimeOverflow)
            );
        }
    }

    #[test]
    fn test_large_times_fit() -> anyhow::Result<()> {
        let processes = [process(0, Time::MAX - 10, 4, 0), process(1, Time::MAX - 10, 6, 0)];
        for algorithm in Algorithm::ALL {
            let simulation = simulate(&processes, algorithm, Some(Time::MAX))?;
            assert_eq!(simulation.makespan(), Time::MAX);
            assert!((simulation.average_waiting - 2.0).abs() < 1e-9);
        }
        Ok(())
    }
}
