use crate::core::{Algorithm, Process, Scheduler, Simulation};

/// Non-preemptive static priority scheduling.
/// Among the ready processes the one with the lowest priority value runs to completion.
/// A running process is never interrupted, even by a more urgent arrival.
#[derive(Clone, Debug, Default)]
pub struct Priority;

impl Scheduler for Priority {
    fn schedule(&self, processes: &[Process]) -> Simulation {
        super::non_preemptive::schedule(Algorithm::Priority, processes, |process| {
            process.priority
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{ProcessId, Segment};
    use crate::data::samples;

    fn process(id: usize, arrival: i64, burst: i64, priority: i64) -> Process {
        Process::with_priority(ProcessId::new(id), arrival, burst, priority)
    }

    #[test]
    fn test_priority() {
        assert!(samples(Algorithm::Priority, None).is_ok());
    }

    #[test]
    fn test_lowest_value_first() {
        let processes = [process(0, 0, 1, 0), process(1, 1, 3, 3), process(2, 1, 2, 1)];
        let simulation = Priority.schedule(&processes);

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(0), 0, 1),
                Segment::new(ProcessId::new(2), 1, 3),
                Segment::new(ProcessId::new(1), 3, 6),
            ]
        );
    }

    #[test]
    fn test_running_process_is_not_interrupted() {
        let processes = [process(0, 0, 6, 5), process(1, 2, 2, 1)];
        let simulation = Priority.schedule(&processes);

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(0), 0, 6),
                Segment::new(ProcessId::new(1), 6, 8),
            ]
        );
        assert_eq!(simulation.segments_of(ProcessId::new(0)).count(), 1);
        assert_eq!(simulation.metrics_of(ProcessId::new(1)).map(|m| m.waiting), Some(4));
    }

    #[test]
    fn test_tie_broken_by_arrival_then_id() {
        let processes = [
            process(0, 0, 4, 0),
            process(1, 3, 1, 2),
            process(2, 2, 1, 2),
            process(3, 2, 1, 2),
        ];
        let simulation = Priority.schedule(&processes);
        let order: Vec<_> = simulation.timeline.iter().map(|s| s.process.index()).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }
}
