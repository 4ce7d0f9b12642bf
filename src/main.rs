//! `sqlmask` binary entrypoint.

use clap::Parser;

use sql_query_mask::cli_app::{Cli, run};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("sqlmask: {err}");
        std::process::exit(1);
    }
}
