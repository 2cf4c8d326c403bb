use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading table metadata and writing mapper documents.
///
/// Building a result map never fails; only the surrounding I/O and
/// configuration handling does.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid YAML for the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// A document could not be serialized as JSON.
    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration is well-formed but inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A column references a table that is not part of the configuration.
    #[error("column '{table}.{column}' references unknown table '{target}'")]
    UnknownTable {
        table: String,
        column: String,
        target: String,
    },
    /// A column references a column missing from the referenced table.
    #[error("column '{table}.{column}' references unknown column '{target_table}.{target_column}'")]
    UnknownColumn {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results returned by rowmap.
pub type Result<T> = std::result::Result<T, Error>;
