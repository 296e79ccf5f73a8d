//! Test utilities for radar
//!
//! Archive readers and canned producers shared by the unit tests.

#![cfg(test)]

use std::io::{Cursor, Read, Write};

use crate::collectors::task::{CollectError, Producer};
use crate::config::RunConfig;

/// Read every entry of an in-memory archive, in archive order
pub fn read_archive(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

enum Ending {
    Success,
    Skip(String),
    Fail(String),
}

/// Producer that writes fixed bytes and then ends a fixed way
pub struct StaticProducer {
    output: Vec<u8>,
    ending: Ending,
}

impl StaticProducer {
    pub fn output(bytes: &[u8]) -> Self {
        Self {
            output: bytes.to_vec(),
            ending: Ending::Success,
        }
    }

    pub fn skip(reason: &str) -> Self {
        Self {
            output: Vec::new(),
            ending: Ending::Skip(reason.to_string()),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            output: Vec::new(),
            ending: Ending::Fail(message.to_string()),
        }
    }

    /// Write `bytes`, then fail
    pub fn partial(bytes: &[u8], message: &str) -> Self {
        Self {
            output: bytes.to_vec(),
            ending: Ending::Fail(message.to_string()),
        }
    }
}

impl Producer for StaticProducer {
    fn produce(&self, _cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        out.write_all(&self.output)?;
        match &self.ending {
            Ending::Success => Ok(()),
            Ending::Skip(reason) => Err(CollectError::skip(reason.as_str())),
            Ending::Fail(message) => Err(CollectError::failure(message)),
        }
    }
}
