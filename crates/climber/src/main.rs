//! `climb`: solve a bundled problem from a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use climber::console;
use climber::{
    solve_and_report, ClimbError, ClimberConfig, Cohort, ConfigError, CsvLoader, DataLoader,
    DataUnavailable, DefenseSchedule, GradeBook, LabRoute, MentorAvailability, ProblemAdapter,
    ProjectPortfolio, QuestionBank,
};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Problem {
    /// Curve a grade book to maximize the pass rate
    Grades,
    /// Two-slot mentor blocks without double booking
    Mentors,
    /// Shortest closed tour through a distance matrix
    Routes,
    /// Benefit-maximizing projects within a budget
    Projects,
    /// Thesis defenses to rooms and slots
    Thesis,
    /// Exam questions within time and difficulty limits
    Exams,
    /// Balanced teams by GPA and skill
    Teams,
}

#[derive(Debug, Parser)]
#[command(name = "climb")]
#[command(about = "Hill-climbing local search over CSV problem data")]
#[command(version)]
struct Cli {
    /// Problem to solve
    problem: Problem,

    /// Input data file
    #[arg(short, long)]
    data: PathBuf,

    /// Config file (TOML, or YAML by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed; falls back to the config file, then 42
    #[arg(long)]
    seed: Option<u64>,

    /// Number of restarts (overrides the config file)
    #[arg(short, long)]
    restarts: Option<usize>,

    /// Run restarts in parallel
    #[arg(long)]
    parallel: bool,

    /// Field delimiter of the data file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Write the result table to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the outcome as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataUnavailable),

    #[error(transparent)]
    Search(#[from] ClimbError),

    #[error("failed to write result table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize outcome: {0}")]
    Json(#[from] serde_json::Error),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.json {
        console::init_with_level(match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        });
    }

    let result = match cli.problem {
        Problem::Grades => run::<GradeBook>(&cli),
        Problem::Mentors => run::<MentorAvailability>(&cli),
        Problem::Routes => run::<LabRoute>(&cli),
        Problem::Projects => run::<ProjectPortfolio>(&cli),
        Problem::Thesis => run::<DefenseSchedule>(&cli),
        Problem::Exams => run::<QuestionBank>(&cli),
        Problem::Teams => run::<Cohort>(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClimberConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ClimberConfig::load(path)?,
        None => ClimberConfig::default(),
    };
    if let Some(restarts) = cli.restarts {
        config = config.with_restarts(restarts);
    }
    if cli.parallel {
        config = config.with_parallel(true);
    }
    config.validate()?;
    Ok(config)
}

fn run<P: ProblemAdapter>(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let seed = cli.seed.or(config.random_seed).unwrap_or(DEFAULT_SEED);

    let delimiter = u8::try_from(cli.delimiter).map_err(|_| CliError::Delimiter(cli.delimiter))?;
    let dataset = CsvLoader::new().with_delimiter(delimiter).load(&cli.data)?;
    let problem = P::from_dataset(&dataset)?;

    let outcome = solve_and_report(&problem, &config, seed)?;

    if let Some(path) = &cli.output {
        outcome.report.write_csv(path)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!();
        print!("{}", console::render_report(&outcome.report));
        println!();
        println!(
            "score {} │ {:?} after {} iterations │ best of {} run(s)",
            outcome.score, outcome.termination, outcome.iterations_run, outcome.restarts
        );
    }
    Ok(())
}
