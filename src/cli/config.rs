// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tagsplice::AudioFormat;

/// tagsplice - embed metadata and cover art into FLAC/MP3 files
#[derive(Parser, Debug)]
#[command(name = "tagsplice")]
#[command(about = "Embed track metadata and cover art without touching the audio", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging; RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
}

/// Where the metadata record comes from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MetadataArgs {
    /// Metadata JSON string (`{"musicName": ..., "artist": [["Name", 1]], "album": ...}`)
    #[arg(short, long, conflicts_with = "metadata_file")]
    pub metadata: Option<String>,

    /// Read metadata JSON from a file
    #[arg(long, value_name = "PATH")]
    pub metadata_file: Option<PathBuf>,
}

/// Where the cover art comes from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ArtArgs {
    /// Cover image file (defaults to the metadata's albumPic, then the placeholder)
    #[arg(short, long, value_name = "PATH", conflicts_with = "no_art")]
    pub art: Option<String>,

    /// Do not embed anything when no art is given
    #[arg(long)]
    pub no_art: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed metadata and cover art into one file
    Embed {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write here instead of overwriting the input
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Treat the input as this format instead of sniffing it
        #[arg(long = "as", value_name = "FORMAT")]
        as_format: Option<AudioFormat>,

        #[command(flatten)]
        metadata: MetadataArgs,

        #[command(flatten)]
        art: ArtArgs,
    },

    /// Embed the same metadata and art into every matching file, in place
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g., "*.mp3", "*.flac")
        #[arg(short, long)]
        pattern: String,

        #[command(flatten)]
        metadata: MetadataArgs,

        #[command(flatten)]
        art: ArtArgs,
    },

    /// Detect container format
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the tags embedded in a file
    Inspect {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include picture data as base64
        #[arg(long)]
        with_data: bool,
    },
}
