//! Command-line interface for the geoparser.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::{DataFormat, ParseOptions};
use crate::error::Result;
use crate::format::parse_reader;
use crate::model::GeoDocument;

/// Marble GeoParser - parse KML, GPX and DGML documents.
#[derive(Parser)]
#[command(name = "marble-geoparser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a document and print a summary or the full node tree.
    Parse {
        /// Input file
        file: PathBuf,

        /// Data format (default: detected from the file extension)
        #[arg(short, long, value_enum)]
        format: Option<DataFormat>,

        /// What to print
        #[arg(short, long, value_enum, default_value_t = Emit::Summary)]
        emit: Emit,

        /// Split coordinate tuples exactly as written
        #[arg(long)]
        strict_coordinates: bool,
    },

    /// List the qualified names a format has handlers for.
    Tags {
        /// Data format
        #[arg(short, long, value_enum, default_value_t = DataFormat::Kml)]
        format: DataFormat,
    },
}

/// Output of the `parse` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Node counts per kind
    Summary,
    /// The document as YAML
    Yaml,
    /// The document as JSON
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            format,
            emit,
            strict_coordinates,
        } => parse_command(&file, format, emit, strict_coordinates),
        Commands::Tags { format } => {
            tags_command(format);
            Ok(())
        }
    }
}

/// Execute the parse command.
fn parse_command(
    file: &Path,
    format: Option<DataFormat>,
    emit: Emit,
    strict_coordinates: bool,
) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => DataFormat::from_path(file)?,
    };
    let options = ParseOptions::new().with_strict_coordinates(strict_coordinates);

    let reader = File::open(file)?;
    let document = parse_reader(format, reader, options)?;

    match emit {
        Emit::Summary => print_summary(file, format, &document),
        Emit::Yaml => print!("{}", serde_yaml_ng::to_string(&document)?),
        Emit::Json => println!("{}", serde_json::to_string_pretty(&document)?),
    }
    Ok(())
}

fn print_summary(file: &Path, format: DataFormat, document: &GeoDocument) {
    println!(
        "{} {} as {}",
        style("Parsed").bold(),
        style(file.display()).cyan(),
        style(format.descriptor().name).green()
    );
    println!();

    let summary = document.summary();
    if summary.is_empty() {
        println!("  {}", style("No content").yellow());
        return;
    }
    let width = summary.keys().map(|kind| kind.len()).max().unwrap_or(0);
    for (kind, count) in &summary {
        println!("  {kind:<width$}  {count}");
    }
    if !document.placemarks().is_empty() {
        println!();
        println!(
            "  Placemarks: {}",
            style(document.placemarks().len()).green().bold()
        );
    }
}

/// Execute the tags command.
fn tags_command(format: DataFormat) {
    let registry = format.registry();
    println!(
        "{} {} handlers",
        style(registry.len()).bold(),
        style(format.descriptor().name).green()
    );
    for name in registry.registered_names() {
        println!("  {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["marble-geoparser", "parse", "track.gpx"]);

        let Commands::Parse {
            file,
            format,
            emit,
            strict_coordinates,
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(file, PathBuf::from("track.gpx"));
        assert!(format.is_none());
        assert_eq!(emit, Emit::Summary);
        assert!(!strict_coordinates);
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::parse_from([
            "marble-geoparser",
            "parse",
            "data.xml",
            "--format",
            "kml",
            "--emit",
            "json",
            "--strict-coordinates",
        ]);

        let Commands::Parse {
            format,
            emit,
            strict_coordinates,
            ..
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(format, Some(DataFormat::Kml));
        assert_eq!(emit, Emit::Json);
        assert!(strict_coordinates);
    }

    #[test]
    fn test_cli_tags_format() {
        let cli = Cli::parse_from(["marble-geoparser", "tags", "--format", "dgml"]);
        let Commands::Tags { format } = cli.command else {
            panic!("expected tags command");
        };
        assert_eq!(format, DataFormat::Dgml);
    }
}
