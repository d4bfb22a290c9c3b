//! Document saving.
//!
//! Serializes a [`Value`] as JSON or YAML and writes it with an atomic
//! temp-file-then-rename strategy, optional gzip compression and optional
//! backups.

use super::DocumentFormat;
use crate::config::Config;
use crate::target::Value;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Renders a value as document text.
///
/// JSON honours `config.indent_size` and `config.compact`; YAML always uses
/// the block style produced by serde_yaml. The result ends with a newline.
pub fn render(value: &Value, format: DocumentFormat, config: &Config) -> Result<String> {
    let mut out = match format {
        DocumentFormat::Json if config.compact => {
            serde_json::to_string(value).context("Failed to serialize JSON")?
        }
        DocumentFormat::Json => render_json_pretty(value, config.indent_size)?,
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML")?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn render_json_pretty(value: &Value, indent_size: usize) -> Result<String> {
    let indent = " ".repeat(indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")
}

/// Saves a value to a file.
///
/// # Examples
///
/// ```no_run
/// use pathquill::config::Config;
/// use pathquill::file::saver::save_file;
/// use pathquill::file::DocumentFormat;
/// use pathquill::target::Value;
///
/// let value = Value::mapping([("name", Value::from("Alice"))]);
/// save_file("output.json", &value, DocumentFormat::Json, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing to the temp file fails
/// - Renaming the temp file to the target fails
pub fn save_file<P: AsRef<Path>>(
    path: P,
    value: &Value,
    format: DocumentFormat,
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let text = render(value, format, config)?;
    write_file_atomic(path, text.as_bytes(), should_compress)?;
    tracing::debug!(path = %path.display(), ?format, compressed = should_compress, "saved document");

    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, &backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a temp file next to `path`, then renames it into place.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
