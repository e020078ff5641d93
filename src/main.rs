// CLI binary entry point for tagsplice

mod cli;

use clap::Parser;
use std::process;

fn main() {
    let config = cli::Config::parse();
    cli::init_logging(config.verbose);

    if let Err(e) = cli::run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
