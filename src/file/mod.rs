//! File I/O for the CLI.
//!
//! This module loads JSON and YAML documents (optionally gzip-compressed) from
//! disk or stdin into a [`Value`](crate::target::Value), and writes values back
//! with atomic write operations and optional backups.

pub mod loader;
pub mod saver;

use std::path::Path;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Determines the format from a filename, ignoring a trailing `.gz`.
    ///
    /// - `data.yaml`, `data.yml.gz` → Yaml
    /// - anything else → Json
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".yaml") || base.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }
}
