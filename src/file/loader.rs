//! Document loading.
//!
//! Reads JSON or YAML from a file or stdin, decompressing gzip input, and
//! converts it into a [`Value`].

use super::DocumentFormat;
use crate::target::Value;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads and parses a JSON or YAML file.
///
/// The format comes from the extension; a `.gz` suffix means the file is
/// gzip-compressed.
///
/// # Examples
///
/// ```no_run
/// use pathquill::file::loader::load_file;
///
/// let (value, format) = load_file("config.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read
/// - The file is not valid gzip (for `.gz` paths)
/// - The contents do not parse in the detected format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<(Value, DocumentFormat)> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = DocumentFormat::from_path(path_ref);
    let value = parse_content(&content, format)?;
    tracing::debug!(path = %path_ref.display(), ?format, "loaded document");
    Ok((value, format))
}

/// Parses document text in the given format.
pub fn parse_content(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            let json: serde_json::Value =
                serde_json::from_str(content).context("Failed to parse JSON")?;
            Ok(Value::from(json))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).context("Failed to parse YAML")?;
            Ok(Value::from(yaml))
        }
    }
}

/// Loads a document from standard input.
///
/// Gzip input is detected by its magic bytes. JSON is tried first, then YAML.
pub fn load_from_stdin() -> Result<(Value, DocumentFormat)> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    parse_any(&content)
}

/// Decompresses gzip bytes (by magic number) or takes them as UTF-8.
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

/// Parses as JSON, falling back to YAML.
pub fn parse_any(content: &str) -> Result<(Value, DocumentFormat)> {
    if let Ok(value) = parse_content(content, DocumentFormat::Json) {
        return Ok((value, DocumentFormat::Json));
    }
    parse_content(content, DocumentFormat::Yaml)
        .map(|value| (value, DocumentFormat::Yaml))
        .context("Input is neither valid JSON nor valid YAML")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
