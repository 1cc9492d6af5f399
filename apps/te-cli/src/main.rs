use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use te_project::{ProjectError, RunConfig};
use te_sim::{
    INPUT_NAMES, MEASUREMENT_NAMES, OutputSample, PlantModel, SimError, TennesseeEastman, run_sim,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "te-cli")]
#[command(about = "Tennessee Eastman process simulator", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run file
    Validate {
        /// Path to the run file (YAML, or JSON by extension)
        run_path: PathBuf,
    },
    /// Print the measurement and manipulated variable names
    Names,
    /// Run an open-loop simulation with constant valve commands
    Run {
        /// Path to the run file; the base case when omitted
        run_path: Option<PathBuf>,
        /// End time in hours
        #[arg(long)]
        t_end: Option<f64>,
        /// Time step in hours
        #[arg(long)]
        dt: Option<f64>,
        /// Additional disturbances to switch on (IDV numbers)
        #[arg(long = "idv", value_delimiter = ',')]
        idv: Vec<usize>,
        /// Random seed
        #[arg(long)]
        seed: Option<u32>,
        /// Measurement CSV output (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Optional CSV of the recorded states
        #[arg(long)]
        states: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate { run_path } => cmd_validate(&run_path),
        Commands::Names => cmd_names(),
        Commands::Run {
            run_path,
            t_end,
            dt,
            idv,
            seed,
            output,
            states,
        } => load_or_default(run_path.as_deref()).and_then(|mut run| {
            apply_overrides(&mut run, t_end, dt, &idv, seed)?;
            cmd_run(&run, output.as_deref(), states.as_deref())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_or_default(path: Option<&Path>) -> CliResult<RunConfig> {
    match path {
        Some(p) => Ok(te_project::load_run(p)?),
        None => Ok(RunConfig::default()),
    }
}

fn apply_overrides(
    run: &mut RunConfig,
    t_end: Option<f64>,
    dt: Option<f64>,
    idv: &[usize],
    seed: Option<u32>,
) -> CliResult<()> {
    if let Some(t_end) = t_end {
        run.t_end_hours = t_end;
    }
    if let Some(dt) = dt {
        run.dt_hours = dt;
    }
    if seed.is_some() {
        run.seed = seed;
    }
    if !idv.is_empty() {
        run.add_disturbances(idv);
    }
    te_project::validate_run(run).map_err(ProjectError::from)?;
    Ok(())
}

fn cmd_validate(run_path: &Path) -> CliResult<()> {
    println!("Validating run file: {}", run_path.display());
    let run = te_project::load_run(run_path)?;
    run.disturbance_codes()?;
    println!("✓ Run file is valid");
    Ok(())
}

fn cmd_names() -> CliResult<()> {
    for (i, name) in MEASUREMENT_NAMES.iter().enumerate() {
        println!("XMEAS({:>2})  {}", i + 1, name);
    }
    for (i, name) in INPUT_NAMES.iter().enumerate() {
        println!("XMV({:>2})    {}", i + 1, name);
    }
    Ok(())
}

fn cmd_run(run: &RunConfig, output: Option<&Path>, states: Option<&Path>) -> CliResult<()> {
    let codes = run.disturbance_codes()?;
    let opts = run.sim_options();
    let plant =
        TennesseeEastman::initialize(run.plant_config(), run.initial_state.as_deref(), &codes)?;
    let mut model =
        PlantModel::new(plant, run.inputs.as_deref())?.with_record_every(opts.record_every);

    info!(
        name = run.name.as_deref().unwrap_or("unnamed"),
        disturbances = ?model.plant().disturbances().active(),
        "running plant"
    );
    let started = Instant::now();
    let record = run_sim(&mut model, &opts)?;
    let elapsed = started.elapsed().as_secs_f64();
    let trip = model.plant().is_tripped();
    let samples = model.into_outputs();

    match output {
        Some(path) => write_measurements(BufWriter::new(File::create(path)?), &samples)?,
        None => write_measurements(io::stdout().lock(), &samples)?,
    }
    if let Some(path) = states {
        write_states(BufWriter::new(File::create(path)?), &record.t, &record.x)?;
    }

    let final_t = record.t.last().copied().unwrap_or(0.0);
    eprintln!("✓ Simulated {final_t:.3} h in {elapsed:.2} s");
    if let Some(trip) = trip {
        eprintln!("  {trip}");
    }
    if let Some(path) = output {
        eprintln!("  Wrote {} samples to {}", samples.len(), path.display());
    }
    Ok(())
}

fn write_measurements(mut w: impl Write, samples: &[OutputSample]) -> io::Result<()> {
    write!(w, "t_hours")?;
    for name in MEASUREMENT_NAMES {
        write!(w, ",\"{name}\"")?;
    }
    writeln!(w)?;
    for sample in samples {
        write!(w, "{}", sample.t)?;
        for v in sample.measurements {
            write!(w, ",{v}")?;
        }
        writeln!(w)?;
    }
    w.flush()
}

fn write_states(mut w: impl Write, t: &[f64], x: &[Vec<f64>]) -> io::Result<()> {
    write!(w, "t_hours")?;
    let n = x.first().map_or(0, Vec::len);
    for i in 1..=n {
        write!(w, ",y{i}")?;
    }
    writeln!(w)?;
    for (ti, xi) in t.iter().zip(x) {
        write!(w, "{ti}")?;
        for v in xi {
            write!(w, ",{v}")?;
        }
        writeln!(w)?;
    }
    w.flush()
}
