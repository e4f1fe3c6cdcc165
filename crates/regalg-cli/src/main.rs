//! regalg CLI - finite automata for regular languages

mod cli;
mod languages;
mod logging;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();
    cli::init(&cli_args);

    let stdout = std::io::stdout();
    if let Err(e) = cli::run(cli_args, &mut stdout.lock()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
