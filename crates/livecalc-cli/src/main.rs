//! livecalc CLI - evaluate simulator formulas from the command line

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use livecalc::prelude::*;
use livecalc::{DEFAULT_COLS, DEFAULT_ROWS};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
const LOG_ENV: &str = "LIVECALC_LOG";

#[derive(Parser)]
#[command(name = "livecalc")]
#[command(author, version, about = "Live formula simulator: a small grid and its formulas")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one formula against a grid
    Eval {
        /// Formula text, starting with '='
        #[arg(allow_hyphen_values = true)]
        formula: String,

        /// Set a cell before evaluating (repeatable)
        #[arg(short, long = "set", value_name = "LABEL=TEXT")]
        set: Vec<String>,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Print the grid as a table
    Show {
        #[command(flatten)]
        grid: GridArgs,
    },

    /// Edit cells and evaluate formulas interactively
    Repl {
        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    /// CSV file to load cell text from
    #[arg(short, long)]
    grid: Option<PathBuf>,

    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u32,

    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u16,
}

impl GridArgs {
    fn load(&self) -> Result<Grid> {
        let dimensions = GridDimensions::new(self.rows, self.cols);
        match &self.grid {
            Some(path) => {
                let grid = Grid::open_with_dimensions(path, dimensions)
                    .with_context(|| format!("Failed to open '{}'", path.display()))?;
                info!(path = %path.display(), cells = grid.non_empty_count(), "loaded grid");
                Ok(grid)
            }
            None => Grid::with_dimensions(dimensions).context("Invalid grid size"),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval { formula, set, grid } => eval(&formula, &set, &grid),
        Commands::Show { grid } => {
            let grid = grid.load()?;
            print_grid(&grid, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Repl { grid } => {
            let mut grid = grid.load()?;
            repl(&mut grid, io::stdin().lock(), &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn eval(formula: &str, assignments: &[String], args: &GridArgs) -> Result<ExitCode> {
    let mut grid = args.load()?;

    for assignment in assignments {
        let (label, text) = assignment
            .split_once('=')
            .with_context(|| format!("Expected LABEL=TEXT, got '{}'", assignment))?;
        grid.set_value_at_label(label.trim(), text)
            .with_context(|| format!("Failed to set '{}'", label.trim()))?;
    }

    match grid.evaluate(formula) {
        Ok(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", err.display_marker());
            eprintln!("{:?}: {}", err.kind(), err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Write the grid with column letters across the top and row numbers down the side
fn print_grid<W: Write>(grid: &Grid, out: &mut W) -> Result<()> {
    let range = grid.dimensions().full_range();
    let columns: Vec<u16> = (range.start.col..=range.end.col).collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|&col| {
            (range.start.row..=range.end.row)
                .filter_map(|row| grid.value(row, col).ok())
                .map(|text| text.chars().count())
                .chain(std::iter::once(CellAddress::column_to_letters(col).len()))
                .max()
                .unwrap_or(1)
        })
        .collect();
    let gutter = (range.end.row + 1).to_string().len();

    write!(out, "{:>gutter$}", "")?;
    for (col, &width) in columns.iter().zip(&widths) {
        write!(out, " | {:<width$}", CellAddress::column_to_letters(*col))?;
    }
    writeln!(out)?;

    for row in range.start.row..=range.end.row {
        write!(out, "{:>gutter$}", row + 1)?;
        for (col, &width) in columns.iter().zip(&widths) {
            write!(out, " | {:<width$}", grid.value(row, *col)?)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// One line of REPL input
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Evaluate(&'a str),
    Set { label: &'a str, text: &'a str },
    Clear,
    Show,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<Command<'_>> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if line.starts_with('=') {
        return Ok(Command::Evaluate(line));
    }

    match line.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(Command::Quit),
        "clear" => return Ok(Command::Clear),
        "show" => return Ok(Command::Show),
        _ => {}
    }

    if line.get(..4).map_or(false, |keyword| keyword.eq_ignore_ascii_case("set ")) {
        let rest = line[4..].trim_start();
        let (label, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return Ok(Command::Set {
            label,
            text: text.trim(),
        });
    }

    if let Some((label, text)) = line.split_once('=') {
        return Ok(Command::Set {
            label: label.trim(),
            text: text.trim(),
        });
    }

    bail!("Unrecognized input '{}'", line)
}

fn repl<R: BufRead, W: Write>(grid: &mut Grid, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };
        debug!(?command, "repl");

        match command {
            Command::Empty => {}
            Command::Quit => break,
            Command::Clear => grid.clear_all(),
            Command::Show => print_grid(grid, out)?,
            Command::Set { label, text } => {
                if let Err(err) = grid.set_value_at_label(label, text) {
                    eprintln!("{}", err);
                }
            }
            Command::Evaluate(formula) => match grid.evaluate(formula) {
                Ok(value) => writeln!(out, "{}", value)?,
                Err(err) => {
                    writeln!(out, "{}", err.display_marker())?;
                    eprintln!("{:?}: {}", err.kind(), err);
                }
            },
        }
    }

    Ok(())
}
