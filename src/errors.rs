use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RespecError {
    #[error("No rewritable files found in {path}")]
    #[diagnostic(code(respec::no_files))]
    NoFiles { path: PathBuf },

    #[error("Parse error in {file} at {line}:{column}: {message}")]
    #[diagnostic(code(respec::parse_error))]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(respec::config))]
    Config(String),

    #[error("{operation} called before scan()")]
    #[diagnostic(code(respec::not_initialized))]
    NotInitialized { operation: &'static str },

    #[error("scan() called twice on {path}")]
    #[diagnostic(code(respec::already_scanned))]
    AlreadyScanned { path: PathBuf },

    #[error("write_to_file() called twice on {path}")]
    #[diagnostic(code(respec::already_written))]
    AlreadyWritten { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(code(respec::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(respec::glob))]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    #[diagnostic(code(respec::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RespecError>;
