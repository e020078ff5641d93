// CLI module for tagsplice
//
// Argument parsing, command implementations and report formatting for the
// `tagsplice` binary. The library does not depend on any of this.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings, or debug output for
/// this crate with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,tagsplice=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Run the parsed command
pub fn run(config: Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match config.command {
        Commands::Embed {
            file,
            output,
            as_format,
            metadata,
            art,
        } => commands::command_embed(file, output, as_format, &metadata, &art, &formatter),
        Commands::Batch {
            directory,
            pattern,
            metadata,
            art,
        } => commands::command_batch(directory, pattern, &metadata, &art, &formatter),
        Commands::Detect { files } => commands::command_detect(files, &formatter),
        Commands::Inspect { file, with_data } => {
            commands::command_inspect(file, with_data, &formatter)
        }
    }
}
