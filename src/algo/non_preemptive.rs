use crate::core::{ready_comparator, Algorithm, JobIndex, Process, Simulation, SimulationBuilder};

/// Non-preemptive selection loop shared by SJF and Priority.
/// At each decision point the ready process with the smallest `key` runs to completion;
/// ties are broken by arrival and then by id. If nothing is ready the clock jumps to
/// the next arrival.
pub(super) fn schedule<K: Ord>(
    algorithm: Algorithm,
    processes: &[Process],
    key: impl Fn(&Process) -> K,
) -> Simulation {
    let mut builder = SimulationBuilder::new(algorithm, None, processes);
    let comparator = ready_comparator(key);

    // Arrival ordered, removal keeps it that way.
    let mut waiting: Vec<JobIndex> = (0..builder.jobs().len()).collect();

    while let Some(&next) = waiting.first() {
        let clock = builder.clock();
        let selected = waiting
            .iter()
            .enumerate()
            .filter(|(_, &index)| builder.job(index).arrival <= clock)
            .min_by(|(_, &first), (_, &second)| {
                comparator(&builder.job(first), &builder.job(second))
            })
            .map(|(position, _)| position);

        match selected {
            Some(position) => {
                let index = waiting.remove(position);
                builder.run_to_completion(index);
            }
            None => builder.idle_until(builder.job(next).arrival),
        }
    }

    builder.into()
}
