use std::io::{stdin, stdout};

use anyhow::Result;
use clap::Parser;

pub use error::Error;
mod error;

mod utils;

pub use row::{Cell, Row};
pub mod row;

pub use rule::{Neighborhood, RuleTable};
pub mod rule;

pub use sim::AutomatonEngine;
pub mod sim;

pub use view::View;
mod view;

pub use config::{Args, Config};
mod config;

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = Config::resolve(args, &mut stdin().lock(), &mut stdout())?;

    println!(
        "Running automaton with size = {}, rule = {}, iterations = {}",
        config.size, config.rule, config.iterations
    );

    let mut view = View::new(stdout().lock(), config.display_width);
    let summary = sim::run(&config, |_, row| view.display(row))?;
    log::info!(
        "{} generations displayed, {} cells alive at the end",
        summary.generations,
        summary.alive_cells
    );
    Ok(())
}
