//! The unit of diagnostic work.
//!
//! A [`CollectionTask`] pairs an archive path with a [`Producer`]. Producers
//! write their output into whatever sink the runner hands them and report
//! unavailable data as [`CollectError::Skip`] rather than as a failure.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::config::RunConfig;

/// Why a producer did not complete
#[derive(Debug, Error)]
pub enum CollectError {
    /// The data legitimately does not exist here: missing tool, missing file, no data
    #[error("{0}")]
    Skip(String),
    /// Anything else
    #[error(transparent)]
    Failure(#[from] anyhow::Error),
}

impl CollectError {
    pub fn skip(reason: impl Into<String>) -> Self {
        CollectError::Skip(reason.into())
    }

    pub fn failure(message: impl fmt::Display) -> Self {
        CollectError::Failure(anyhow::anyhow!("{}", message))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, CollectError::Skip(_))
    }
}

/// Render an error with its causes, dropping causes already spelled out by
/// the message before them.
///
/// Driver errors repeat their source's text, which `{:#}` would print twice.
pub fn describe_error(err: &anyhow::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if parts.last().map_or(true, |last| !last.contains(&text)) {
            parts.push(text);
        }
    }
    parts.join(": ")
}

impl From<io::Error> for CollectError {
    fn from(err: io::Error) -> Self {
        CollectError::Failure(err.into())
    }
}

/// Something that writes one artifact into a sink
pub trait Producer {
    fn produce(&self, cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError>;
}

impl<F> Producer for F
where
    F: Fn(&RunConfig, &mut dyn Write) -> Result<(), CollectError>,
{
    fn produce(&self, cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        self(cfg, out)
    }
}

/// A named producer bound to its destination in the archive
pub struct CollectionTask {
    pub category: String,
    pub name: String,
    pub archive_path: String,
    pub producer: Box<dyn Producer>,
}

impl CollectionTask {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        archive_path: impl Into<String>,
        producer: impl Producer + 'static,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            archive_path: archive_path.into(),
            producer: Box::new(producer),
        }
    }
}

impl fmt::Debug for CollectionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionTask")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("archive_path", &self.archive_path)
            .finish_non_exhaustive()
    }
}
