//! Upstream providers of destination records.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Destination;

/// Failures raised while fetching destinations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read destinations from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse destinations from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("destination source unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the complete, materialized set of destinations.
pub trait DestinationSource: Send + Sync {
    fn find_all(&self) -> Result<Vec<Destination>, SourceError>;
}

/// A fixed list of destinations held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDestinations {
    destinations: Vec<Destination>,
}

impl InMemoryDestinations {
    pub fn new(destinations: impl Into<Vec<Destination>>) -> Self {
        Self {
            destinations: destinations.into(),
        }
    }
}

impl DestinationSource for InMemoryDestinations {
    fn find_all(&self) -> Result<Vec<Destination>, SourceError> {
        Ok(self.destinations.clone())
    }
}

/// Destinations stored as a JSON array in a file.
///
/// The file is read again on every call so edits show up in the next report.
#[derive(Clone, Debug)]
pub struct JsonFileDestinations {
    path: PathBuf,
}

impl JsonFileDestinations {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DestinationSource for JsonFileDestinations {
    fn find_all(&self) -> Result<Vec<Destination>, SourceError> {
        let contents = fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_slice(&contents).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
