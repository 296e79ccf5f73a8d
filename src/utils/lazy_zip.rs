//! Deferred zip entry creation.
//!
//! A [`LazyZipEntry`] is handed to a producer as its byte sink. The archive
//! entry is only started when the first non-empty buffer arrives, so tasks
//! that produce nothing never leave an empty file behind.

use std::io::{self, Seek, Write};

use chrono::{Datelike, Local, Timelike};
use log::trace;
use sha2::{Digest, Sha256};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::constants::DEFAULT_COMPRESSION_METHOD;

/// Size and checksum of what a task wrote into its entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDigest {
    pub bytes_written: u64,
    pub sha256: String,
}

/// Byte sink bound to one archive path, opened on first write.
///
/// There is no explicit close: the underlying [`ZipWriter`] finalizes the
/// entry when the next one is started or the archive is finished.
pub struct LazyZipEntry<'a, W: Write + Seek> {
    zip: &'a mut ZipWriter<W>,
    name: &'a str,
    opened: bool,
    bytes_written: u64,
    hasher: Sha256,
}

impl<'a, W: Write + Seek> LazyZipEntry<'a, W> {
    pub fn new(zip: &'a mut ZipWriter<W>, name: &'a str) -> Self {
        Self {
            zip,
            name,
            opened: false,
            bytes_written: 0,
            hasher: Sha256::new(),
        }
    }

    /// Whether the archive entry was created
    pub fn wrote_any(&self) -> bool {
        self.opened
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Consume the sink, returning the digest of the entry if one was created
    pub fn finish(self) -> Option<EntryDigest> {
        if !self.opened {
            return None;
        }

        Some(EntryDigest {
            bytes_written: self.bytes_written,
            sha256: format!("{:x}", self.hasher.finalize()),
        })
    }

    fn open(&mut self) -> io::Result<()> {
        self.zip.start_file(self.name, entry_options())?;
        self.opened = true;
        trace!("Opened archive entry {}", self.name);
        Ok(())
    }
}

impl<W: Write + Seek> Write for LazyZipEntry<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if !self.opened {
            self.open()?;
        }

        let written = self.zip.write(buf)?;
        self.hasher.update(&buf[..written]);
        self.bytes_written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.opened {
            self.zip.flush()
        } else {
            Ok(())
        }
    }
}

/// Options for a new archive entry, stamped with the current local time
pub fn entry_options() -> FileOptions {
    FileOptions::default()
        .compression_method(DEFAULT_COMPRESSION_METHOD)
        .last_modified_time(zip_timestamp(Local::now()))
        .unix_permissions(0o644)
}

/// Convert a local time into the zip (DOS) timestamp representation.
///
/// Times outside the DOS range (before 1980) fall back to the zip default.
fn zip_timestamp(now: chrono::DateTime<Local>) -> zip::DateTime {
    let year = u16::try_from(now.year()).unwrap_or_default();
    zip::DateTime::from_date_and_time(
        year,
        now.month() as u8,
        now.day() as u8,
        now.hour() as u8,
        now.minute() as u8,
        now.second() as u8,
    )
    .unwrap_or_default()
}
