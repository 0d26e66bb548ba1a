use crate::core::{Algorithm, Time};
use crate::data::deserialize;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extension of workload files.
pub const WORKLOAD_EXTENSION: &str = "in";

/// Report of running a directory of workloads.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    algorithm: Algorithm,
    quantum: Option<Time>,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    const fn new(algorithm: Algorithm, quantum: Option<Time>) -> Self {
        let entries = Vec::new();
        Self {
            algorithm,
            quantum,
            entries,
        }
    }

    /// Get the algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.quantum.filter(|_| self.algorithm.needs_quantum()) {
            Some(quantum) => writeln!(f, "Algorithm: {} (quantum {quantum})", self.algorithm)?,
            None => writeln!(f, "Algorithm: {}", self.algorithm)?,
        }
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single workload.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub processes: usize,
    pub average_waiting: f64,
    pub average_turnaround: f64,
    pub makespan: Time,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: {} processes, waiting {:.2}, turnaround {:.2}, makespan {} in {:.6} sec",
            self.name,
            self.processes,
            self.average_waiting,
            self.average_turnaround,
            self.makespan,
            self.time
        )
    }
}

/// Run all workloads in the `samples` directory.
/// Print the report to stdout.
///
/// # Errors
/// - If a file cannot be read or simulated.
/// - If no samples are found.
///
/// # Panics
/// - If a simulation is invalid.
pub fn samples(algorithm: Algorithm, quantum: Option<Time>) -> anyhow::Result<()> {
    run("samples", algorithm, quantum).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run all workloads in the `dir` directory, in file name order.
///
/// # Errors
/// - If a file cannot be read.
/// - If a workload is rejected by the simulation.
///
/// # Panics
/// - If a simulation is invalid.
pub fn run(
    dir: impl AsRef<Path>,
    algorithm: Algorithm,
    quantum: Option<Time>,
) -> anyhow::Result<Report> {
    let mut report = Report::new(algorithm, quantum);

    let mut files = Vec::new();
    for file in std::fs::read_dir(dir)? {
        let path = file?.path();
        if is_workload(&path) {
            files.push(path);
        }
    }
    files.sort_unstable();

    for path in files {
        let name = workload_name(&path)?;
        let workload = deserialize(&mut BufReader::new(File::open(&path)?))
            .with_context(|| format!("Cannot read {name}"))?;

        let time = std::time::Instant::now();
        let simulation = workload.simulate(algorithm, quantum)?;
        let time = time.elapsed().as_secs_f64();

        assert!(
            simulation.verify(workload.processes()),
            "Invalid simulation created for {name}"
        );

        report.entries.push(ReportEntry {
            name,
            processes: workload.len(),
            average_waiting: simulation.average_waiting,
            average_turnaround: simulation.average_turnaround,
            makespan: simulation.makespan(),
            time,
        });
    }

    Ok(report)
}

fn is_workload(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|extension| extension == WORKLOAD_EXTENSION)
}

fn workload_name(path: &Path) -> anyhow::Result<String> {
    static NAME_ERR: &str = "Cannot read filename";

    let name = path.file_name().ok_or_else(|| anyhow!(NAME_ERR))?;
    let name = name.to_str().ok_or_else(|| anyhow!(NAME_ERR))?;
    Ok(name.into())
}
