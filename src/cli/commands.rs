// CLI command implementations
use anyhow::{bail, Context, Result};
use base64::Engine;
use serde_json::{json, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use ::id3::TagLike;
use tagsplice::flac::{self, FlacReport};
use tagsplice::{
    AlbumArt, ArtCache, AudioFormat, Embedder, FileArtSource, Outcome, TrackMetadata,
};

use super::config::{ArtArgs, MetadataArgs};
use super::output::OutputFormatter;

/// Load the metadata record from inline JSON or a file
pub fn load_metadata(args: &MetadataArgs) -> Result<Option<TrackMetadata>> {
    let json = match (&args.metadata, &args.metadata_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading metadata from {}", path.display()))?,
        (None, None) => return Ok(None),
    };
    let meta = serde_json::from_str(&json).context("invalid metadata JSON")?;
    Ok(Some(meta))
}

/// Resolve cover art: explicit file, else the metadata's albumPic, else the
/// placeholder. `None` only with `--no-art` and nothing given.
fn resolve_art(
    args: &ArtArgs,
    meta: Option<&TrackMetadata>,
    cache: &ArtCache,
) -> Option<std::sync::Arc<AlbumArt>> {
    let source = args
        .art
        .as_deref()
        .or_else(|| meta.and_then(|m| m.album_pic.as_deref()));
    if args.no_art && source.is_none() {
        return None;
    }
    Some(cache.resolve(source, &FileArtSource))
}

fn tag_file(
    embedder: &Embedder,
    input: &Path,
    output: &Path,
    format: Option<AudioFormat>,
    meta: Option<&TrackMetadata>,
    art: Option<&AlbumArt>,
) -> Result<Outcome> {
    let buffer =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let outcome = embedder
        .try_embed(&buffer, format, meta, art)
        .with_context(|| format!("tagging {}", input.display()))?;

    if let Outcome::Tagged { buffer, .. } = &outcome {
        std::fs::write(output, buffer)
            .with_context(|| format!("writing {}", output.display()))?;
    }
    Ok(outcome)
}

/// Embed metadata and art into one file
pub fn command_embed(
    file: PathBuf,
    output: Option<PathBuf>,
    as_format: Option<AudioFormat>,
    metadata: &MetadataArgs,
    art_args: &ArtArgs,
    formatter: &OutputFormatter,
) -> Result<()> {
    let meta = load_metadata(metadata)?;
    let cache = ArtCache::new();
    let art = resolve_art(art_args, meta.as_ref(), &cache);
    let output = output.unwrap_or_else(|| file.clone());
    let format = as_format.or_else(|| meta.as_ref().and_then(|m| m.format));

    let embedder = Embedder::new();
    match tag_file(&embedder, &file, &output, format, meta.as_ref(), art.as_deref())? {
        Outcome::Tagged { format, .. } => {
            formatter.print_success(&format!(
                "Tagged {} ({}) -> {}",
                file.display(),
                format,
                output.display()
            ));
        }
        Outcome::NoArt => {
            formatter.print_info(&format!("No art given, {} left untouched", file.display()));
        }
    }
    Ok(())
}

/// Embed the same metadata and art into every file matching a pattern
pub fn command_batch(
    directory: PathBuf,
    pattern: String,
    metadata: &MetadataArgs,
    art_args: &ArtArgs,
    formatter: &OutputFormatter,
) -> Result<()> {
    let meta = load_metadata(metadata)?;
    let cache = ArtCache::new();
    let embedder = Embedder::new();

    // Build glob pattern
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", directory.display(), pattern)
    } else {
        format!("{}/**/{}", directory.display(), pattern)
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in glob::glob(&glob_pattern).context("invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }

    if files.is_empty() {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Processing {} files...", files.len()));

    let mut success_count = 0;
    let mut error_count = 0;
    for path in &files {
        // Same source every time, so the cache fetches it once
        let art = resolve_art(art_args, meta.as_ref(), &cache);
        // Globs mix containers, so every file is sniffed and the metadata's
        // format is ignored
        match tag_file(&embedder, path, path, None, meta.as_ref(), art.as_deref()) {
            Ok(_) => {
                formatter.print_success(&path.display().to_string());
                success_count += 1;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {:#}", path.display(), e));
                error_count += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        success_count, error_count
    ));
    if error_count > 0 {
        bail!("{} of {} files could not be tagged", error_count, files.len());
    }
    Ok(())
}

/// Detect container format
pub fn command_detect(files: Vec<PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let mut report = serde_json::Map::new();
    for path in files {
        let mut head = [0u8; 4];
        let read = read_head(&path, &mut head)
            .with_context(|| format!("reading {}", path.display()))?;
        let format = AudioFormat::sniff(&head[..read]);
        report.insert(path.display().to_string(), json!(format.as_str()));
    }
    formatter.output_report(&Value::Object(report), &mut std::io::stdout())
}

fn read_head(path: &Path, head: &mut [u8]) -> std::io::Result<usize> {
    use std::io::Read;
    let mut file = std::fs::File::open(path)?;
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Show what is embedded in a file
pub fn command_inspect(file: PathBuf, with_data: bool, formatter: &OutputFormatter) -> Result<()> {
    let buffer = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let report = match AudioFormat::sniff(&buffer) {
        AudioFormat::Flac => {
            let report = flac::inspect(&buffer)
                .with_context(|| format!("parsing {}", file.display()))?;
            flac_report_json(&report, with_data)?
        }
        AudioFormat::Mp3 => mp3_report_json(&buffer, with_data),
    };
    formatter.output_report(&report, &mut std::io::stdout())
}

fn flac_report_json(report: &FlacReport, with_data: bool) -> Result<Value> {
    let mut value = serde_json::to_value(report)?;
    if with_data {
        if let Some(pictures) = value.get_mut("pictures").and_then(Value::as_array_mut) {
            for (picture, summary) in pictures.iter_mut().zip(&report.pictures) {
                picture["data"] = json!(base64::engine::general_purpose::STANDARD.encode(&summary.data));
            }
        }
    }
    Ok(json!({ "format": "flac", "flac": value }))
}

fn mp3_report_json(buffer: &[u8], with_data: bool) -> Value {
    let tag = match ::id3::Tag::read_from2(Cursor::new(buffer)) {
        Ok(tag) => tag,
        Err(_) => return json!({ "format": "mp3", "id3": null }),
    };

    let pictures: Vec<Value> = tag
        .pictures()
        .map(|p| {
            let mut picture = json!({
                "picture_type": format!("{:?}", p.picture_type),
                "mime_type": p.mime_type.clone(),
                "description": p.description.clone(),
                "data_length": p.data.len(),
            });
            if with_data {
                picture["data"] = json!(base64::engine::general_purpose::STANDARD.encode(&p.data));
            }
            picture
        })
        .collect();

    json!({
        "format": "mp3",
        "id3": {
            "version": format!("{:?}", tag.version()),
            "title": tag.title(),
            "artists": tag.artist().map(|a| a.split('\0').collect::<Vec<_>>()),
            "album": tag.album(),
            "pictures": pictures,
        }
    })
}
