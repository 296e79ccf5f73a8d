use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::trace;

use crate::collectors::task::{CollectError, Producer};
use crate::config::RunConfig;
use crate::constants::STREAMING_BUFFER_SIZE;

/// Stream a file into `out` without loading it whole.
///
/// A missing file is a skip; every other error is a failure.
pub fn stream_file(path: &Path, out: &mut dyn Write) -> Result<u64, CollectError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CollectError::skip(format!("file not found: {}", path.display())));
        }
        Err(err) => {
            return Err(CollectError::Failure(
                anyhow::Error::new(err).context(format!("Failed to open {}", path.display())),
            ));
        }
    };

    let mut reader = BufReader::with_capacity(STREAMING_BUFFER_SIZE, file);
    let copied = io::copy(&mut reader, out)
        .context(format!("Failed to read {}", path.display()))?;

    trace!("Streamed {} bytes from {}", copied, path.display());
    Ok(copied)
}

/// Copies a file from the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProducer {
    pub path: PathBuf,
}

impl FileProducer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Producer for FileProducer {
    fn produce(&self, _cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        stream_file(&self.path, out).map(|_| ())
    }
}
