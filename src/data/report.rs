use crate::core::{Algorithm, Simulation, SimulationError, Time, Workload};
use std::fmt::{Display, Formatter, Result};

/// Text report of a single simulation: metrics table, Gantt chart and averages.
#[derive(Clone, Copy, Debug)]
pub struct SimulationReport<'a> {
    workload: &'a Workload,
    simulation: &'a Simulation,
}

/// Creates a text report of the simulation of the workload.
#[must_use]
pub const fn report<'a>(workload: &'a Workload, simulation: &'a Simulation) -> SimulationReport<'a> {
    SimulationReport {
        workload,
        simulation,
    }
}

impl Display for SimulationReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.simulation.quantum {
            Some(quantum) => {
                writeln!(f, "Algorithm: {} (quantum {quantum})", self.simulation.algorithm)?;
            }
            None => writeln!(f, "Algorithm: {}", self.simulation.algorithm)?,
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<8}{:>8}{:>8}{:>10}{:>12}{:>12}{:>9}",
            "Process", "Arrival", "Burst", "Priority", "Completion", "Turnaround", "Waiting"
        )?;
        for process in self.workload.processes() {
            if let Some(metrics) = self.simulation.metrics_of(process.id) {
                writeln!(
                    f,
                    "{:<8}{:>8}{:>8}{:>10}{:>12}{:>12}{:>9}",
                    process.id.to_string(),
                    process.arrival,
                    process.burst,
                    process.priority,
                    metrics.completion,
                    metrics.turnaround,
                    metrics.waiting
                )?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Gantt Chart")?;
        write!(f, "{}", Gantt(self.simulation))?;
        writeln!(f)?;

        writeln!(f, "Average Waiting Time: {:.2}", self.simulation.average_waiting)?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.simulation.average_turnaround)
    }
}

/// Widest cell of the Gantt chart. Longer slices are truncated, the time axis stays exact.
const MAX_CELL_WIDTH: usize = 40;

/// ASCII Gantt chart of a timeline. Idle gaps are drawn but are not segments.
/// A cell is one character per time unit, at most [`MAX_CELL_WIDTH`] wide.
#[derive(Clone, Copy, Debug)]
pub struct Gantt<'a>(pub &'a Simulation);

impl Gantt<'_> {
    fn cells(&self) -> Vec<(String, Time, Time)> {
        let mut cells = Vec::with_capacity(self.0.timeline.len());
        let mut clock = 0;

        for segment in &self.0.timeline {
            if segment.start > clock {
                cells.push(("idle".into(), clock, segment.start));
            }
            cells.push((segment.process.to_string(), segment.start, segment.end));
            clock = segment.end;
        }

        cells
    }
}

impl Display for Gantt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let cells = self.cells();
        let width = |label: &str, start: Time, end: Time| {
            usize::try_from(end - start)
                .unwrap_or(MAX_CELL_WIDTH)
                .min(MAX_CELL_WIDTH)
                .max(label.len() + 2)
        };

        write!(f, "|")?;
        for (label, start, end) in &cells {
            let width = width(label.as_str(), *start, *end);
            write!(f, "{label:^width$}|")?;
        }
        writeln!(f)?;

        for (label, start, end) in &cells {
            let width = width(label.as_str(), *start, *end) + 1;
            write!(f, "{start:<width$}")?;
        }
        writeln!(f, "{}", self.0.makespan())
    }
}

/// Simulations of the same workload under every algorithm.
#[derive(Clone, Debug)]
pub struct Comparison(Vec<Simulation>);

impl Comparison {
    /// Returns the simulations in `Algorithm::ALL` order.
    #[must_use]
    pub fn simulations(&self) -> &[Simulation] {
        &self.0
    }

    /// Returns the algorithm with the lowest average waiting time.
    /// Earlier algorithms win ties.
    #[must_use]
    pub fn best(&self) -> Option<Algorithm> {
        self.0
            .iter()
            .min_by(|first, second| first.average_waiting.total_cmp(&second.average_waiting))
            .map(|simulation| simulation.algorithm)
    }
}

/// Runs every algorithm over the workload.
///
/// # Errors
/// - If the workload is empty or invalid, or the quantum is not positive.
pub fn compare(workload: &Workload, quantum: Time) -> std::result::Result<Comparison, SimulationError> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| workload.simulate(algorithm, Some(quantum)))
        .collect::<std::result::Result<_, _>>()
        .map(Comparison)
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(
            f,
            "{:<10}{:>14}{:>17}{:>10}{:>10}",
            "Algorithm", "Avg waiting", "Avg turnaround", "Makespan", "Switches"
        )?;
        for simulation in &self.0 {
            writeln!(
                f,
                "{:<10}{:>14.2}{:>17.2}{:>10}{:>10}",
                simulation.algorithm.name(),
                simulation.average_waiting,
                simulation.average_turnaround,
                simulation.makespan(),
                simulation.context_switches()
            )?;
        }
        Ok(())
    }
}
