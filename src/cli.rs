use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::generator::ExpressionDynamicProgramming;
use crate::solver::constants::{DEFAULT_GOAL, DEFAULT_MAX_ATTEMPTS};
use crate::solver::Solver;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Tetraktys - solve 24-style puzzles and generate practice questions
#[derive(Parser, Debug)]
#[command(name = "tetraktys")]
#[command(about = "Find every distinct way to combine operands into a target value")]
#[command(version)]
pub struct CliArgs {
    /// Comma-separated operand values, e.g. "4,1,8,7"
    #[arg(required_unless_present = "puzzles")]
    pub values: Option<String>,

    /// Target value to reach
    #[arg(default_value_t = DEFAULT_GOAL)]
    pub goal: f64,

    /// Generate this many practice puzzles instead of solving
    #[arg(long)]
    pub puzzles: Option<usize>,

    /// Operand count for puzzle generation (defaults to the number of
    /// supplied values, or 4)
    #[arg(long)]
    pub num_values: Option<usize>,

    /// Inclusive operand range for puzzle generation, as "lo,hi"
    #[arg(long, default_value = "1,15")]
    pub value_range: String,

    /// Accepted solution-count range for puzzles, as "lo,hi"
    #[arg(long, default_value = "1,1")]
    pub solution_range: String,

    /// Rejection-sampling attempt cap per puzzle
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Seed for reproducible catalogues and puzzles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

fn parse_values(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid operand value '{}'", part.trim()))
        })
        .collect()
}

fn parse_pair<T: std::str::FromStr>(raw: &str, what: &str) -> Result<(T, T)> {
    let (lo, hi) = match raw.split_once(',') {
        Some(parts) => parts,
        None => bail!("{} must be given as \"lo,hi\", got '{}'", what, raw),
    };
    let parse = |part: &str| {
        part.trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("invalid {} bound '{}'", what, part.trim()))
    };
    Ok((parse(lo)?, parse(hi)?))
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(&args.log_level)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let values = match &args.values {
        Some(raw) => Some(parse_values(raw).context("invalid operand list")?),
        None => None,
    };
    let num_values = args
        .num_values
        .or_else(|| values.as_ref().map(Vec::len))
        .unwrap_or(4);
    if let Some(values) = &values {
        if values.len() != num_values {
            bail!(
                "got {} operand values but --num-values {}",
                values.len(),
                num_values
            );
        }
    }

    info!("building the {}-operand catalogue", num_values);
    let strategy = ExpressionDynamicProgramming::new(EngineConfig::new(num_values));
    let solver =
        Solver::new(&strategy, &mut rng).context("failed to build the expression catalogue")?;

    if let Some(num_questions) = args.puzzles {
        let (lo, hi) = parse_pair::<i64>(&args.value_range, "value range")?;
        let (min_solutions, max_solutions) =
            parse_pair::<usize>(&args.solution_range, "solution range")?;
        let mut produced = 0;
        for question in solver.generate_set_of_valid_questions(
            &mut rng,
            num_questions,
            args.goal,
            lo..=hi,
            min_solutions..=max_solutions,
            args.max_attempts,
        ) {
            let question = question?;
            let operands: Vec<String> =
                question.values().iter().map(|v| format!("{}", v)).collect();
            println!(
                "{} -> {} ({} solutions)",
                operands.join(","),
                question.goal(),
                question.num_solutions()
            );
            produced += 1;
        }
        if produced < num_questions {
            warn!(
                "only {} of {} puzzles found within the attempt cap",
                produced, num_questions
            );
        }
        Ok(())
    } else if let Some(values) = values {
        let question = solver.solve(&values, args.goal)?;
        if question.num_solutions() == 0 {
            warn!("no expression reaches {}", args.goal);
            println!("No solutions.");
        } else {
            for line in question.render_solutions() {
                println!("{}", line);
            }
        }
        Ok(())
    } else {
        bail!("either operand values or --puzzles must be given");
    }
}
