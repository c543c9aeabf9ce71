// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `satchel`: solve an unbounded knapsack instance from a file.
//!
//! ```text
//! satchel [--verbose] [--describe] [--statistics] [--progress] <INSTANCE_PATH>
//! ```
//!
//! The optimal solution is printed to stdout. Diagnostics go through the
//! `log` facade, which is configured here with `env_logger`.

use clap::Parser;
use log::{error, info, LevelFilter};
use satchel_bnb::{
    bnb::BnbSolver,
    monitor::{log::LogTreeSearchMonitor, no_op::NoOperationMonitor},
    options::SolverOptions,
};
use satchel_model::loading::{ProblemLoader, ProblemLoaderError};
use std::{io::Write, path::PathBuf};

/// Exact branch-and-bound solver for the unbounded knapsack problem.
#[derive(Debug, Parser)]
#[command(name = "satchel", version, about)]
struct Args {
    /// The instance to solve, in the text format of `satchel_model::loading`.
    instance_path: PathBuf,

    /// Trace every node of the search.
    #[arg(short, long)]
    verbose: bool,

    /// Print the model and its density heuristics before solving.
    #[arg(long)]
    describe: bool,

    /// Print the solver statistics after solving.
    #[arg(long)]
    statistics: bool,

    /// Log a progress line every second during long searches.
    #[arg(long)]
    progress: bool,
}

#[derive(Debug)]
enum SatchelCliError {
    Load(ProblemLoaderError),
    Io(std::io::Error),
}

impl std::fmt::Display for SatchelCliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(e) => write!(f, "failed to load instance: {}", e),
            Self::Io(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

impl std::error::Error for SatchelCliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ProblemLoaderError> for SatchelCliError {
    fn from(e: ProblemLoaderError) -> Self {
        Self::Load(e)
    }
}

impl From<std::io::Error> for SatchelCliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), SatchelCliError> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let model = ProblemLoader::<i64>::new().from_path(&args.instance_path)?;
    info!("Loaded {} from {}", model, args.instance_path.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.describe {
        writeln!(out, "{}", satchel_bnb::describe(&model))?;
    }

    let mut solver = BnbSolver::with_options(SolverOptions::new().with_verbose(args.verbose));
    let outcome = if args.progress {
        solver.solve_with_monitor(&model, LogTreeSearchMonitor::default())
    } else {
        solver.solve_with_monitor(&model, NoOperationMonitor::new())
    };
    info!("Search terminated: {}", outcome.termination_reason());

    write!(out, "{}", outcome.solution())?;
    if args.statistics {
        writeln!(out)?;
        write!(out, "{}", outcome.statistics())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["satchel", "--verbose", "--statistics", "sack.txt"]);
        assert!(args.verbose);
        assert!(args.statistics);
        assert!(!args.describe);
        assert!(!args.progress);
        assert_eq!(args.instance_path, PathBuf::from("sack.txt"));
    }

    #[test]
    fn test_error_display() {
        let err = SatchelCliError::from(ProblemLoaderError::MultiConstraint(2));
        assert!(format!("{}", err).starts_with("failed to load instance: "));
    }
}
