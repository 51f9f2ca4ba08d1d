//! pngrw CLI - rewrite JSON metadata embedded in PNG text chunks
//!
//! This binary provides command-line interfaces for:
//! - rewrite: apply a replacement map to every JSON payload found in the
//!   text chunks of PNG files (or to bare JSON documents)
//! - inspect: list the chunks of a PNG and classify its text payloads

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pngrw_codec::{detect, rewrite_json, rewrite_png, text, PayloadClass, RewriteReport, TextKind};
use pngrw_format::{strip_signature, ChunkStream};
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pngrw")]
#[command(about = "Rewrite JSON metadata embedded in PNG text chunks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite text-chunk JSON in PNG (or bare JSON) files
    ///
    /// Examples:
    ///   pngrw rewrite card.png --map s2t.json
    ///   pngrw rewrite *.png --map s2t.json --output-dir converted --progress
    Rewrite {
        /// Input files (.png or .json; other extensions are skipped)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// JSON object of from/to string replacements
        #[arg(long)]
        map: PathBuf,
        /// Directory for converted files (default: beside each input)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Show a progress bar across input files
        #[arg(long)]
        progress: bool,
    },
    /// List the chunks of a PNG and classify its text payloads
    Inspect {
        /// Input file (.png)
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rewrite {
            inputs,
            map,
            output_dir,
            progress,
        } => {
            handle_rewrite(inputs, map, output_dir, progress)?;
        }
        Commands::Inspect { input } => {
            handle_inspect(input)?;
        }
    }

    Ok(())
}

fn handle_rewrite(
    inputs: Vec<PathBuf>,
    map: PathBuf,
    output_dir: Option<PathBuf>,
    show_progress: bool,
) -> Result<(), Box<dyn Error>> {
    let replacements = load_replacements(&map)?;
    let transform = |s: &str| apply_replacements(&replacements, s);

    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)?;
    }

    let progress_bar = show_progress.then(|| create_file_bar(inputs.len()));
    let mut converted = 0usize;
    let mut skipped = 0usize;

    for input in &inputs {
        match rewrite_one(input, output_dir.as_deref(), &transform) {
            Ok(Some(output_path)) => {
                converted += 1;
                println!("converted {} -> {}", input.display(), output_path.display());
            }
            Ok(None) => {
                skipped += 1;
            }
            Err(err) => {
                // A failing file never aborts the remaining files.
                skipped += 1;
                eprintln!("error: {}: {}", input.display(), err);
            }
        }
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    println!("done: {converted} converted, {skipped} skipped");
    Ok(())
}

/// Rewrite a single input file. `Ok(None)` means the file was skipped for an
/// unsupported extension.
fn rewrite_one<F>(
    input: &Path,
    output_dir: Option<&Path>,
    transform: &F,
) -> Result<Option<PathBuf>, Box<dyn Error>>
where
    F: Fn(&str) -> String,
{
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let output_bytes = match extension.as_deref() {
        Some("png") => {
            let bytes = fs::read(input)?;
            let (out, report) = rewrite_png(&bytes, transform)?;
            report_chunk_problems(input, &report);
            out
        }
        Some("json") => {
            let document = fs::read_to_string(input)?;
            rewrite_json(&document, transform)?.into_bytes()
        }
        _ => {
            println!("skipping unsupported file type: {}", input.display());
            return Ok(None);
        }
    };

    let output_path = converted_path(input, output_dir);
    fs::write(&output_path, output_bytes)?;
    Ok(Some(output_path))
}

/// One human-readable line per problem chunk, plus a truncation warning.
fn report_chunk_problems(input: &Path, report: &RewriteReport) {
    for note in &report.fallbacks {
        eprintln!(
            "warning: {}: chunk {} ({}) left unchanged: {}",
            input.display(),
            note.index,
            note.tag,
            note.reason
        );
    }
    if let Some(offset) = report.truncated_at {
        eprintln!(
            "warning: {}: malformed chunk boundary at byte {offset}; trailing bytes dropped",
            input.display()
        );
    }
}

fn converted_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let converted_name = format!("converted-{file_name}");
    match output_dir {
        Some(dir) => dir.join(converted_name),
        None => input.with_file_name(converted_name),
    }
}

/// Load a replacement map: a JSON object of from/to strings.
fn load_replacements(path: &Path) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("cannot read map file {}: {e}", path.display()))?;
    let map: serde_json::Map<String, Value> = serde_json::from_str(&contents)
        .map_err(|e| format!("map file {} is not a JSON object: {e}", path.display()))?;

    let mut pairs = Vec::with_capacity(map.len());
    for (from, to) in map {
        let Value::String(to) = to else {
            return Err(format!("replacement for {from:?} must be a string").into());
        };
        if from.is_empty() {
            return Err("replacement map keys must be non-empty".into());
        }
        pairs.push((from, to));
    }
    // Longest keys first so overlapping replacements favor the longest match.
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    Ok(pairs)
}

fn apply_replacements(pairs: &[(String, String)], input: &str) -> String {
    let mut out = input.to_string();
    for (from, to) in pairs {
        out = out.replace(from.as_str(), to);
    }
    out
}

fn handle_inspect(input: PathBuf) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&input)?;
    let stream_bytes = strip_signature(&bytes)?;

    println!("{}:", input.display());
    let mut chunks = ChunkStream::new(stream_bytes);
    let mut index = 0usize;
    while let Some(chunk) = chunks.next() {
        let crc_state = if chunk.crc_is_valid() { "ok" } else { "BAD" };
        match TextKind::from_tag(chunk.tag) {
            Some(kind) => match text::decode(kind, chunk.data) {
                Ok(decoded) => {
                    let class = detect(&decoded.text)
                        .map(|(_, class)| class)
                        .unwrap_or(PayloadClass::Opaque);
                    println!(
                        "  #{index} {} {:>6} bytes crc {crc_state} keyword {:?} payload {}",
                        chunk.tag_str(),
                        chunk.data.len(),
                        String::from_utf8_lossy(&decoded.keyword),
                        class.label()
                    );
                }
                Err(err) => {
                    println!(
                        "  #{index} {} {:>6} bytes crc {crc_state} unparsable text payload: {err}",
                        chunk.tag_str(),
                        chunk.data.len()
                    );
                }
            },
            None => {
                println!(
                    "  #{index} {} {:>6} bytes crc {crc_state}",
                    chunk.tag_str(),
                    chunk.data.len()
                );
            }
        }
        index += 1;
    }
    if let Some(offset) = chunks.truncated_at() {
        println!(
            "  ! malformed chunk boundary at stream offset {offset}; remaining bytes unparsed"
        );
    }
    Ok(())
}

fn create_file_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} files")
            .unwrap(),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replacements_longest_first() {
        let mut pairs = vec![
            ("ab".to_string(), "X".to_string()),
            ("abc".to_string(), "Y".to_string()),
        ];
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        assert_eq!(apply_replacements(&pairs, "abcab"), "YX");
    }

    #[test]
    fn test_converted_path_beside_input() {
        let path = converted_path(Path::new("/tmp/card.png"), None);
        assert_eq!(path, Path::new("/tmp/converted-card.png"));
    }

    #[test]
    fn test_converted_path_into_dir() {
        let path = converted_path(Path::new("/tmp/card.png"), Some(Path::new("/out")));
        assert_eq!(path, Path::new("/out/converted-card.png"));
    }
}
