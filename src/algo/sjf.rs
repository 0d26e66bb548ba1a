use crate::core::{Algorithm, Process, Scheduler, Simulation};

/// Non-preemptive shortest job first.
/// Among the ready processes the one with the shortest burst runs to completion.
#[derive(Clone, Debug, Default)]
pub struct ShortestJobFirst;

impl Scheduler for ShortestJobFirst {
    fn schedule(&self, processes: &[Process]) -> Simulation {
        super::non_preemptive::schedule(Algorithm::Sjf, processes, |process| process.burst)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{ProcessId, Segment};
    use crate::data::samples;

    fn process(id: usize, arrival: i64, burst: i64) -> Process {
        Process::new(ProcessId::new(id), arrival, burst)
    }

    #[test]
    fn test_sjf() {
        assert!(samples(Algorithm::Sjf, None).is_ok());
    }

    #[test]
    fn test_tie_broken_by_id() {
        let processes = [process(0, 0, 4), process(1, 0, 2), process(2, 0, 2)];
        let simulation = ShortestJobFirst.schedule(&processes);

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(1), 0, 2),
                Segment::new(ProcessId::new(2), 2, 4),
                Segment::new(ProcessId::new(0), 4, 8),
            ]
        );
    }

    #[test]
    fn test_tie_broken_by_arrival() {
        // P1 occupies the CPU until 5, both others are ready by then.
        let processes = [process(0, 0, 5), process(1, 3, 2), process(2, 1, 2)];
        let simulation = ShortestJobFirst.schedule(&processes);
        let order: Vec<_> = simulation.timeline.iter().map(|s| s.process.index()).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_only_ready_processes_are_selected() {
        let processes = [process(0, 0, 6), process(1, 7, 1), process(2, 2, 4)];
        let simulation = ShortestJobFirst.schedule(&processes);

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(0), 0, 6),
                Segment::new(ProcessId::new(2), 6, 10),
                Segment::new(ProcessId::new(1), 10, 11),
            ]
        );
        assert_eq!(simulation.metrics_of(ProcessId::new(1)).map(|m| m.waiting), Some(3));
    }

    #[test]
    fn test_idle_jump() {
        let processes = [process(0, 10, 3), process(1, 4, 5)];
        let simulation = ShortestJobFirst.schedule(&processes);

        assert_eq!(
            simulation.timeline,
            vec![
                Segment::new(ProcessId::new(1), 4, 9),
                Segment::new(ProcessId::new(0), 10, 13),
            ]
        );
        assert_eq!(simulation.idle_time(), 5);
    }
}
