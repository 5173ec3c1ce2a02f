pub mod json;
pub mod text;

use crate::scan::SourceType;
use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Which operation produced the report.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Rewrite,
    Check,
}

#[derive(Debug, Serialize)]
pub struct RewriteReport {
    pub metadata: Metadata,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub mode: RunMode,
    pub root: PathBuf,
    pub language: Option<String>,
    pub source_type: SourceTypeLabel,
    pub from: String,
    pub to: String,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_skipped: usize,
    pub literals_rewritten: usize,
    pub elapsed_ms: u64,
}

/// Serialized as its lowercase name.
#[derive(Debug, Clone, Copy)]
pub struct SourceTypeLabel(pub SourceType);

impl Serialize for SourceTypeLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// One file that the scan planned substitutions for.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub rewrites: Vec<RewriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct RewriteEntry {
    pub line: usize,
    pub column: usize,
    pub from: String,
    pub to: String,
}
