//! Entry point wiring for the glowlay overlay: parse the CLI, initialise
//! tracing, and hand off to the supervisor in `run.rs`.

mod cli;
mod defaults;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();
    run::run(cli)
}
