// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{crate_version, Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tacpack::audio::{wav, AudioBuffer, WavFormat};
use tacpack::config::Settings;
use tacpack::tac::TacContainer;
use tacpack::util::{clip_name, duration_minutes_seconds};

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A WAV codec and TAC sample archiver."
)]
struct Cli {
    /// The path to a YAML settings file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the format of a WAV file.
    Info {
        /// The WAV file to inspect.
        path: PathBuf,
    },
    /// Re-encodes a WAV file.
    Convert {
        /// The WAV file to read.
        input: PathBuf,
        /// Where to write the converted file. ".wav" is added if missing.
        output: PathBuf,
        /// The output encoding: int8, int16, int24, int32 or float32.
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Adds WAV files to an archive, creating it if needed. Each clip is named
    /// after its file name without the extension.
    Pack {
        /// The archive to write.
        archive: PathBuf,
        /// The WAV files to add.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Lists the clips in an archive.
    List {
        /// The archive to read.
        archive: PathBuf,
    },
    /// Writes one clip from an archive to a WAV file.
    Extract {
        /// The archive to read.
        archive: PathBuf,
        /// The clip to extract.
        name: String,
        /// Where to write the clip. ".wav" is added if missing.
        output: PathBuf,
        /// The output encoding: int8, int16, int24, int32 or float32.
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Removes a clip from an archive.
    Remove {
        /// The archive to modify.
        archive: PathBuf,
        /// The clip to remove.
        name: String,
    },
    /// Checks an archive and rewrites it if it is corrupt or anything had to be
    /// repaired.
    Validate {
        /// The archive to check.
        archive: PathBuf,
    },
    /// Prints the effective settings.
    Config {},
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Info { path } => {
            let info = wav::probe(&fs::read(&path)?)?;
            let descriptor = info.descriptor;
            println!("{}:", path.display());
            println!("- Format code: {}", info.format_code);
            println!(
                "- Encoding: {}{}",
                descriptor.wav_format(),
                if info.supported {
                    ""
                } else {
                    " (unsupported bit depth, read as int8)"
                }
            );
            println!("- Channels: {}", descriptor.channel_count);
            println!("- Sample rate: {}", descriptor.sample_rate);
            println!("- Frames: {}", info.frame_count);
            if descriptor.sample_rate > 0 {
                let seconds = info.frame_count as f64 / f64::from(descriptor.sample_rate);
                println!(
                    "- Duration: {}",
                    duration_minutes_seconds(std::time::Duration::from_secs_f64(seconds))
                );
            }
        }
        Commands::Convert {
            input,
            output,
            format,
        } => {
            let format = output_format(format.as_deref(), &settings)?;
            let buffer = wav::read_file(&input)?;
            let written = wav::write_file(&output, &buffer, format)?;
            println!("Wrote {} as {}.", written.display(), format);
        }
        Commands::Pack { archive, inputs } => {
            let mut container = open_or_create(&archive);

            // Decoding is independent per file; insertion has to stay sequential.
            let decoded = inputs
                .par_iter()
                .map(|path| {
                    wav::read_file(path)
                        .map(|buffer| (clip_name(path).to_string(), buffer))
                        .map_err(|e| format!("error reading {}: {}", path.display(), e))
                })
                .collect::<Result<Vec<(String, AudioBuffer)>, String>>()?;

            for (name, buffer) in decoded.iter() {
                container.write_entry(name, buffer)?;
                info!(name = %name, archive = ?archive, "Packed clip");
            }
            persist(&mut container, &archive)?;
            println!(
                "Packed {} clip(s) into {} ({} total).",
                decoded.len(),
                archive.display(),
                container.len()
            );
        }
        Commands::List { archive } => {
            let container = TacContainer::open(&archive);
            if container.is_empty() {
                println!("No clips found in {}.", archive.display());
                return Ok(());
            }

            println!("Clips (count: {}):", container.len());
            for entry in container.entries() {
                println!(
                    "- {} (Channels: {}, Sample rate: {}, Duration: {})",
                    entry.name(),
                    entry.channel_count(),
                    entry.sample_rate(),
                    duration_minutes_seconds(entry.duration())
                );
            }
        }
        Commands::Extract {
            archive,
            name,
            output,
            format,
        } => {
            let format = output_format(format.as_deref(), &settings)?;
            let container = TacContainer::open(&archive);
            if !container.contains(&name) {
                return Err(format!("no clip named {} in {}", name, archive.display()).into());
            }
            let written = wav::write_file(&output, &container.read_entry_owned(&name), format)?;
            println!("Wrote {} to {}.", name, written.display());
        }
        Commands::Remove { archive, name } => {
            let mut container = TacContainer::open(&archive);
            if container.remove_entry(&name).is_none() {
                return Err(format!("no clip named {} in {}", name, archive.display()).into());
            }
            persist(&mut container, &archive)?;
            println!("Removed {} from {}.", name, archive.display());
        }
        Commands::Validate { archive } => {
            let (mut container, decoded) = TacContainer::open_with_report(&archive)?;
            let report = container.validate();
            let reclaimed = container.compact();
            if decoded.is_clean() && report.is_clean() && reclaimed == 0 {
                println!("{} is valid.", archive.display());
                return Ok(());
            }

            if let Some(corruption) = decoded.corruption.as_ref() {
                println!(
                    "- Dictionary is corrupt after {} entries: {}",
                    decoded.entries_parsed, corruption
                );
            }
            if decoded.trailing_bytes > 0 {
                println!(
                    "- Dropped {} trailing bytes from the arena",
                    decoded.trailing_bytes
                );
            }
            for renamed in report.truncated.iter() {
                println!("- Renamed {} to {}", renamed.from, renamed.to);
            }
            for removed in report.removed.iter() {
                println!(
                    "- Removed {} ({}, pass {})",
                    removed.name, removed.reason, removed.pass
                );
            }
            if reclaimed > 0 {
                println!("- Reclaimed {} unused samples", reclaimed);
            }
            persist(&mut container, &archive)?;
            println!("Repaired {}.", archive.display());
        }
        Commands::Config {} => {
            print!("{}", settings.to_yaml()?);
        }
    }

    Ok(())
}

/// Resolves the encoding for a written WAV file, falling back to the configured default.
fn output_format(format: Option<&str>, settings: &Settings) -> Result<WavFormat, Box<dyn Error>> {
    match format {
        Some(format) => format.parse::<WavFormat>(),
        None => Ok(settings.default_format()),
    }
}

/// Opens an existing archive, or starts a new one if the path doesn't exist yet.
fn open_or_create(archive: &Path) -> TacContainer {
    if archive.exists() {
        TacContainer::open(archive)
    } else {
        TacContainer::new()
    }
}

fn persist(container: &mut TacContainer, archive: &Path) -> Result<(), Box<dyn Error>> {
    if container.persist(archive) {
        Ok(())
    } else {
        Err(format!("unable to write {}", archive.display()).into())
    }
}
