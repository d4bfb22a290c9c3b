use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use pathquill::config::{Config, OutputFormat};
use pathquill::file::loader::{load_file, load_from_stdin};
use pathquill::file::saver::{render, save_file};
use pathquill::file::DocumentFormat;
use pathquill::{Accessor, Mutator, Value, WriteMode};

/// PathQuill - read and write JSON/YAML documents through dot-paths
#[derive(Parser)]
#[command(name = "pathquill")]
#[command(version)]
#[command(about = "Read and write nested JSON/YAML data through dot-paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format (default: from config, else same as input)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Write JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at PATH
    Get {
        /// Document to read (`-` for stdin)
        file: String,
        /// Dot-path, `*` matches every key
        path: String,
        /// Printed when PATH does not resolve (parsed as JSON, else a string)
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Write VALUE at PATH
    Set {
        file: String,
        path: String,
        /// Parsed as JSON, else taken as a string
        value: String,
        /// Merge containers instead of replacing them
        #[arg(short, long)]
        merge: bool,
        /// Rewrite FILE instead of printing the result
        #[arg(short, long)]
        in_place: bool,
    },
    /// Merge VALUE into PATH
    Merge {
        file: String,
        path: String,
        value: String,
        #[arg(short, long)]
        in_place: bool,
    },
    /// Remove every PATH
    Unset {
        file: String,
        #[arg(required = true)]
        paths: Vec<String>,
        #[arg(short, long)]
        in_place: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PATHQUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// JSON literal if it parses, otherwise the raw text as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}

fn load(file: &str) -> Result<(Value, DocumentFormat)> {
    if file == "-" {
        load_from_stdin()
    } else {
        load_file(file)
    }
}

fn output_format(requested: OutputFormat, input: DocumentFormat) -> DocumentFormat {
    match requested {
        OutputFormat::Auto => input,
        OutputFormat::Json => DocumentFormat::Json,
        OutputFormat::Yaml => DocumentFormat::Yaml,
    }
}

fn emit(value: &Value, format: DocumentFormat, config: &Config) -> Result<()> {
    let text = render(value, format, config)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Prints the document or writes it back to `file`.
fn finish(
    file: &str,
    value: &Value,
    format: DocumentFormat,
    in_place: bool,
    config: &Config,
) -> Result<()> {
    if !in_place {
        return emit(value, format, config);
    }
    if file == "-" {
        bail!("--in-place cannot be used with stdin");
    }
    save_file(file, value, format, config)
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.compact {
        config.compact = true;
    }

    match cli.command {
        Command::Get {
            file,
            path,
            default,
        } => {
            let (document, input_format) = load(&file)?;
            let default = default.as_deref().map(parse_value).unwrap_or_default();
            let value = Accessor::new(&document).get(&path, default)?;
            emit(&value, output_format(config.output_format, input_format), &config)
        }
        Command::Set {
            file,
            path,
            value,
            merge,
            in_place,
        } => {
            let (mut document, input_format) = load(&file)?;
            let mode = if merge {
                WriteMode::Merge
            } else {
                WriteMode::Overwrite
            };
            Mutator::new(&mut document).set_with(&path, parse_value(&value), mode)?;
            let format = output_format(config.output_format, input_format);
            finish(&file, &document, format, in_place, &config)
        }
        Command::Merge {
            file,
            path,
            value,
            in_place,
        } => {
            let (mut document, input_format) = load(&file)?;
            Mutator::new(&mut document).merge(&path, parse_value(&value))?;
            let format = output_format(config.output_format, input_format);
            finish(&file, &document, format, in_place, &config)
        }
        Command::Unset {
            file,
            paths,
            in_place,
        } => {
            let (mut document, input_format) = load(&file)?;
            Mutator::new(&mut document).unset_many(&paths)?;
            let format = output_format(config.output_format, input_format);
            finish(&file, &document, format, in_place, &config)
        }
    }
}
