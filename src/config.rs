use std::{
    fmt::Display,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{row::MIN_SIZE, view};

const DEFAULT_SIZE: usize = 40;
const DEFAULT_RULE: i64 = 30;
const DEFAULT_ITERATIONS: usize = 20;
const INTERACTIVE_ITERATIONS: usize = 100;

/// Print the generations of an elementary cellular automaton.
#[derive(Debug, Parser)]
#[command(name = "ecars", version, about)]
pub struct Args {
    /// Number of cells in a row.
    #[arg(long)]
    pub size: Option<usize>,

    /// Wolfram rule number, between 0 and 255.
    #[arg(long, allow_negative_numbers = true)]
    pub rule: Option<i64>,

    /// Generations computed after the seeded one.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Display width in columns (default: terminal width).
    #[arg(long)]
    pub width: Option<usize>,

    /// Smallest accepted row size.
    #[arg(long, default_value_t = MIN_SIZE)]
    pub min_size: usize,

    /// Ask for the size and rule on stdin.
    #[arg(long, short)]
    pub interactive: bool,
}

/// Parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub size: usize,
    pub rule: i64,
    pub iterations: usize,
    pub display_width: usize,
    pub min_size: usize,
}

impl Config {
    /// Resolves the arguments, prompting through `input`/`output` for whatever
    /// interactive mode leaves open.
    pub fn resolve<R, W>(args: Args, input: &mut R, output: &mut W) -> Result<Self>
    where
        R: BufRead,
        W: Write,
    {
        let size = match (args.size, args.interactive) {
            (Some(size), _) => size,
            (None, true) => prompt(input, output, "Please write the size of the grid to display")?,
            (None, false) => DEFAULT_SIZE,
        };
        let rule = match (args.rule, args.interactive) {
            (Some(rule), _) => rule,
            (None, true) => prompt(input, output, "Please write the rule you want to display")?,
            (None, false) => DEFAULT_RULE,
        };
        let iterations = args.iterations.unwrap_or(if args.interactive {
            INTERACTIVE_ITERATIONS
        } else {
            DEFAULT_ITERATIONS
        });
        let display_width = args.width.unwrap_or_else(view::terminal_width);

        Ok(Self {
            size,
            rule,
            iterations,
            display_width,
            min_size: args.min_size,
        })
    }
}

fn prompt<R, W, T>(input: &mut R, output: &mut W, question: &str) -> Result<T>
where
    R: BufRead,
    W: Write,
    T: FromStr,
    T::Err: Display,
{
    writeln!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("no answer given to \"{question}\"");
    }
    let answer = line.trim();
    answer
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid answer {answer:?}: {e}"))
}
