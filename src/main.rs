use clap::{Parser, ValueEnum};
use cpu_scheduling_simulator::core::{Algorithm, Time, Workload};
use cpu_scheduling_simulator::data;
use rand::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::num::NonZero;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug)]
struct AlgorithmArg(Algorithm);

impl ValueEnum for AlgorithmArg {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<AlgorithmArg>> =
            std::sync::LazyLock::new(|| Algorithm::ALL.into_iter().map(AlgorithmArg).collect());

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.0.name());
        Some(match self.0 {
            Algorithm::RoundRobin => value.alias("round-robin"),
            _ => value,
        })
    }
}

/// Output format of a simulation.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Format {
    /// Metrics table, Gantt chart and averages.
    #[default]
    Text,
    /// The full simulation as JSON.
    Json,
}

/// Where a workload is read from.
#[derive(Debug, clap::Args)]
struct Input {
    /// Workload file. Reads from stdin if omitted.
    input: Option<PathBuf>,
    /// Read the workload as a JSON array instead of the text format.
    #[clap(long)]
    json_input: bool,
}

/// Simulator of classical uniprocessor CPU scheduling algorithms.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Application {
    /// Increase logging verbosity, can be repeated. `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Run one scheduling algorithm over a workload.
    Run {
        algorithm: AlgorithmArg,
        #[command(flatten)]
        input: Input,
        /// Time quantum for round robin.
        #[clap(short, long, default_value = "2")]
        quantum: Time,
        /// Output format.
        #[clap(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Run every algorithm over a workload and compare the averages.
    Compare {
        #[command(flatten)]
        input: Input,
        /// Time quantum for round robin.
        #[clap(short, long, default_value = "2")]
        quantum: Time,
    },
    /// Run an algorithm over every workload in a directory.
    Bench {
        /// The input directory.
        input: PathBuf,
        /// Exclude scheduling algorithms.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<AlgorithmArg>,
        /// Time quantum for round robin.
        #[clap(short, long, default_value = "2")]
        quantum: Time,
    },
    /// Generate random workloads.
    Gen {
        /// The number of processes.
        processes: NonZero<usize>,
        /// The latest arrival time.
        #[clap(long, default_value = "20")]
        max_arrival: Time,
        /// The longest burst time.
        #[clap(long, default_value = "10")]
        max_burst: NonZero<u32>,
        /// The largest priority value.
        #[clap(long, default_value = "5")]
        max_priority: i64,
        /// Seed of the random generator. Uses entropy if omitted.
        #[clap(short, long)]
        seed: Option<u64>,
        /// Number of workloads to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated workloads. If the directory does not exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_workload(input: &Input) -> anyhow::Result<Workload> {
    let reader: Box<dyn Read> = match &input.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(std::io::stdin().lock()),
    };

    let workload = if input.json_input {
        data::from_json(reader)?
    } else {
        data::deserialize(&mut BufReader::new(reader))?
    };
    log::debug!("Read {} processes", workload.len());
    Ok(workload)
}

fn gen_workload(
    rng: &mut impl Rng,
    processes: usize,
    (max_arrival, max_burst, max_priority): (Time, u32, i64),
) -> anyhow::Result<Workload> {
    let mut workload = Workload::new();
    for _ in 0..processes {
        let arrival = rng.gen_range(0..=max_arrival.max(0));
        let burst = Time::from(rng.gen_range(1..=max_burst));
        let priority = rng.gen_range(0..=max_priority.max(0));
        workload.add(arrival, burst, priority)?;
    }
    Ok(workload)
}

fn gen(
    processes: usize,
    limits: (Time, u32, i64),
    seed: Option<u64>,
    amount: u64,
    output: &Path,
) -> anyhow::Result<()> {
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    if !output.try_exists()? {
        std::fs::create_dir_all(output)?;
    }

    for i in 0..amount {
        let workload = gen_workload(&mut rng, processes, limits)?;
        let filename = format!("{processes}_{i}.{}", data::WORKLOAD_EXTENSION);
        File::create(output.join(&filename))?.write_all(data::to_string(&workload).as_bytes())?;
        log::info!("Generated {filename}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let application = Application::parse();
    init_logger(application.verbose);

    match application.command {
        Command::Run {
            algorithm,
            input,
            quantum,
            format,
        } => {
            let workload = read_workload(&input)?;
            let simulation = workload.simulate(algorithm.0, Some(quantum))?;
            match format {
                Format::Text => print!("{}", data::report(&workload, &simulation)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&simulation)?),
            }
            Ok(())
        }
        Command::Compare { input, quantum } => {
            let workload = read_workload(&input)?;
            let comparison = data::compare(&workload, quantum)?;
            print!("{comparison}");
            if let Some(best) = comparison.best() {
                println!("Lowest average waiting time: {best}");
            }
            Ok(())
        }
        Command::Bench {
            input,
            exclude,
            quantum,
        } => {
            let algorithms = Algorithm::ALL
                .into_iter()
                .filter(|algorithm| !exclude.iter().any(|excluded| excluded.0 == *algorithm));
            for algorithm in algorithms {
                println!("{}", data::run(&input, algorithm, Some(quantum))?);
            }
            Ok(())
        }
        Command::Gen {
            processes,
            max_arrival,
            max_burst,
            max_priority,
            seed,
            amount,
            output,
        } => gen(
            processes.get(),
            (max_arrival, max_burst.get(), max_priority),
            seed,
            amount.get(),
            &output,
        ),
    }
}
