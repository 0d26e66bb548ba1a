//! Reading and writing workloads, and presenting simulation results.
//!
//! Workloads use a line oriented text format, one process per line:
//!
//! ```text
//! # arrival burst [priority]
//! 0 5
//! 1 3 2
//! ```
//!
//! `#` starts a comment and blank lines are ignored. Process ids are assigned in line
//! order. A JSON array of `{"arrival", "burst", "priority"}` objects is accepted too.

mod report;
mod run;

pub use report::*;
pub use run::*;

use crate::core::{SimulationError, Time, Workload};
use serde::Deserialize;
use std::io::{BufRead, Read};
use std::num::ParseIntError;

/// Errors reported while reading a workload.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("cannot read workload")]
    Io(#[from] std::io::Error),
    #[error("line {line}: missing burst time")]
    MissingBurst { line: usize },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: unexpected value `{value}`")]
    UnexpectedValue { line: usize, value: String },
    #[error("line {line}: rejected process")]
    InvalidProcess {
        line: usize,
        #[source]
        source: SimulationError,
    },
    #[error("invalid JSON workload")]
    Json(#[from] serde_json::Error),
}

/// Process as written in a JSON workload, without an id.
#[derive(Clone, Copy, Debug, Deserialize)]
struct ProcessEntry {
    arrival: Time,
    burst: Time,
    #[serde(default)]
    priority: i64,
}

fn parse_field(line: usize, field: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|source| ParseError::InvalidNumber {
        line,
        field,
        value: value.into(),
        source,
    })
}

/// Reads a workload in the text format.
///
/// # Errors
/// - If the reader fails.
/// - If a line is malformed or describes an invalid process.
pub fn deserialize(reader: &mut impl BufRead) -> Result<Workload, ParseError> {
    let mut workload = Workload::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let number = number + 1;
        let content = line.split('#').next().unwrap_or_default();
        let mut fields = content.split_whitespace();

        let Some(arrival) = fields.next() else {
            continue;
        };
        let arrival = parse_field(number, "arrival time", arrival)?;
        let burst = fields.next().ok_or(ParseError::MissingBurst { line: number })?;
        let burst = parse_field(number, "burst time", burst)?;
        let priority = fields
            .next()
            .map_or(Ok(0), |value| parse_field(number, "priority", value))?;

        if let Some(value) = fields.next() {
            return Err(ParseError::UnexpectedValue {
                line: number,
                value: value.into(),
            });
        }

        workload
            .add(arrival, burst, priority)
            .map_err(|source| ParseError::InvalidProcess {
                line: number,
                source,
            })?;
    }

    Ok(workload)
}

/// Reads a workload from a JSON array of processes.
///
/// # Errors
/// - If the input is not valid JSON or describes an invalid process.
pub fn from_json(reader: impl Read) -> Result<Workload, ParseError> {
    let entries: Vec<ProcessEntry> = serde_json::from_reader(reader)?;
    let mut workload = Workload::new();

    for (index, entry) in entries.into_iter().enumerate() {
        workload
            .add(entry.arrival, entry.burst, entry.priority)
            .map_err(|source| ParseError::InvalidProcess {
                line: index + 1,
                source,
            })?;
    }

    Ok(workload)
}

/// Writes a workload in the text format.
#[must_use]
pub fn to_string(workload: &Workload) -> String {
    let mut output = String::from("# arrival burst priority\n");
    for process in workload.processes() {
        output += &format!("{} {} {}\n", process.arrival, process.burst, process.priority);
    }
    output
}
