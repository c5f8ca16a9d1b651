// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of committed write sets
//!
//! One newline-delimited JSON entry per committed batch, each carrying a
//! CRC32 checksum of its serialized writes. Replay keeps the valid prefix:
//! it stops at the first torn, unparsable, out-of-sequence or checksum-failing
//! line.

use crate::store::WriteSet;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("checksum mismatch at sequence {0}")]
    Corrupt(u64),
    #[error("sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
    #[error("torn entry at sequence {0}")]
    Torn(u64),
    #[error("log rewound: held {held} entries, found {found}")]
    Rewound { held: u64, found: u64 },
}

/// A single committed batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub writes: WriteSet,
    pub checksum: u32,
}

impl WalEntry {
    pub fn new(seq: u64, writes: WriteSet) -> Self {
        let checksum = Self::checksum(&writes);
        Self {
            seq,
            writes,
            checksum,
        }
    }

    fn checksum(writes: &WriteSet) -> u32 {
        // String keys and byte values always serialize
        let json = serde_json::to_vec(writes).unwrap_or_default();
        crc32fast::hash(&json)
    }

    pub fn verify(&self) -> bool {
        self.checksum == Self::checksum(&self.writes)
    }

    /// Parse one complete line expected to hold sequence `expected`
    fn parse(line: &[u8], expected: u64) -> Result<Self, WalError> {
        let entry: WalEntry = serde_json::from_slice(line)?;
        if entry.seq != expected {
            return Err(WalError::SequenceGap {
                expected,
                found: entry.seq,
            });
        }
        if !entry.verify() {
            return Err(WalError::Corrupt(entry.seq));
        }
        Ok(entry)
    }
}

/// Valid prefix of a log file
struct Scan {
    /// Entries with a sequence above the requested floor
    entries: Vec<WalEntry>,
    /// Sequence of the last valid entry
    sequence: u64,
    /// Byte length of the valid prefix
    valid_len: u64,
    /// Byte length of the whole file
    file_len: u64,
}

fn scan(file: File, after: u64) -> Result<Scan, WalError> {
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    let mut entries = Vec::new();
    let mut sequence = 0;
    let mut valid_len = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }
        let expected = sequence + 1;
        // append() writes each entry with its newline; without one the
        // write never completed
        let Some(body) = line.strip_suffix(b"\n") else {
            tracing::warn!(seq = expected, "stopping WAL replay at torn entry");
            break;
        };
        if body.iter().all(u8::is_ascii_whitespace) {
            valid_len += read as u64;
            continue;
        }
        match WalEntry::parse(body, expected) {
            Ok(entry) => {
                sequence = entry.seq;
                valid_len += read as u64;
                if entry.seq > after {
                    entries.push(entry);
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    seq = expected,
                    "stopping WAL replay due to read error"
                );
                break;
            }
        }
    }

    Ok(Scan {
        entries,
        sequence,
        valid_len,
        file_len,
    })
}

/// Write-ahead log for durable batch storage
pub struct Wal {
    path: PathBuf,
    file: File,
    sequence: u64,
}

impl Wal {
    /// Open or create a WAL at the given path, cutting any torn tail
    pub fn open(path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let mut wal = Self {
            path: path.to_path_buf(),
            file,
            sequence: 0,
        };
        wal.catch_up()?;
        Ok(wal)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries appended by other writers since this handle last read or
    /// wrote the log. A torn tail is truncated so the next append starts on
    /// a clean line; call only while holding the [`WalLock`].
    pub fn catch_up(&mut self) -> Result<Vec<WalEntry>, WalError> {
        let scan = scan(File::open(&self.path)?, self.sequence)?;
        if scan.sequence < self.sequence {
            return Err(WalError::Rewound {
                held: self.sequence,
                found: scan.sequence,
            });
        }
        if scan.valid_len < scan.file_len {
            tracing::warn!(
                valid_len = scan.valid_len,
                file_len = scan.file_len,
                "truncating WAL to last valid entry"
            );
            self.file.set_len(scan.valid_len)?;
            self.file.sync_all()?;
        }
        self.sequence = scan.sequence;
        Ok(scan.entries)
    }

    /// Append a write set to the log
    pub fn append(&mut self, writes: &WriteSet) -> Result<u64, WalError> {
        let entry = WalEntry::new(self.sequence + 1, writes.clone());
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay the valid prefix of the log; a missing file is empty
    pub fn replay(path: &Path) -> Result<Vec<WalEntry>, WalError> {
        match File::open(path) {
            Ok(file) => Ok(scan(file, 0)?.entries),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Exclusive advisory lock on `<wal>.lock`, shared by every process using
/// the log. Released when dropped.
pub struct WalLock {
    _file: File,
}

impl WalLock {
    /// Block until the lock for the log at `wal_path` is held
    pub fn acquire(wal_path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = wal_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut lock_path = wal_path.as_os_str().to_owned();
        lock_path.push(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(PathBuf::from(lock_path))?;
        file.lock_exclusive()?;
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
