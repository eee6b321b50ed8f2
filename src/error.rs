//! Error types for rust-metacenter

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting metadata or generating artifacts
#[derive(Error, Debug)]
pub enum MetaCenterError {
    #[error("Malformed DDL statement: {reason}")]
    MalformedStatement { reason: String },

    #[error("DDL parse error: {message}")]
    DdlParse { message: String },

    #[error("Failed to read DDL file: {path}")]
    DdlFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract table from {path}: {message}")]
    DdlFileInvalid { path: PathBuf, message: String },

    #[error("Failed to load metadata store from {path}: {message}")]
    StoreLoad { path: PathBuf, message: String },

    #[error("Invalid generate parameter: {message}")]
    InvalidGenerateParam { message: String },

    #[error("Unknown artifact '{name}' (expected 'const', 'model' or a template path)")]
    UnknownArtifact { name: String },

    #[error("Failed to render template for artifact '{name}': {message}")]
    TemplateRender { name: String, message: String },

    #[error("Failed to write artifact to {path}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatter '{command}' failed on {path}: {message}")]
    Formatter {
        command: String,
        path: PathBuf,
        message: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for MetaCenterError {
    fn from(err: serde_json::Error) -> Self {
        MetaCenterError::Serialization {
            message: err.to_string(),
        }
    }
}
