//! Storage layer for quietspot.
//!
//! This module provides file-backed persistent storage for noise readings.
//! The store is strictly append-only: readings are never mutated or deleted,
//! and every successful append is durable before the caller sees success.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::reading::Reading;

/// Append-only store of noise readings.
///
/// The backing file holds the full collection as a JSON array and is rewritten
/// on every append (write a temporary sibling, then rename into place). The
/// in-memory collection and the durable file are updated inside a single
/// critical section, so concurrent appends cannot interleave their
/// read-modify-write cycles and `all()` never observes a half-appended state.
#[derive(Debug)]
pub struct ReadingStore {
    /// Path to the JSON data file.
    path: PathBuf,
    /// All readings, in insertion order.
    readings: Mutex<Vec<Reading>>,
}

impl ReadingStore {
    /// Open a store backed by the given file, loading any existing readings.
    ///
    /// A missing, corrupt, or unreadable data file is treated as an empty
    /// store rather than an error: a warning is logged and the process
    /// continues. Parent directories are created so the first append can
    /// persist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let readings = Self::load(&path);
        info!(
            "Store opened at {} with {} reading(s)",
            path.display(),
            readings.len()
        );

        Ok(Self {
            path,
            readings: Mutex::new(readings),
        })
    }

    /// Read the data file, falling back to an empty collection on any failure.
    fn load(path: &Path) -> Vec<Reading> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No data file at {}, starting fresh", path.display());
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "Could not read data file {}, starting fresh: {}",
                    path.display(),
                    err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(readings) => readings,
            Err(err) => {
                warn!(
                    "Data file {} is corrupt, starting fresh: {}",
                    path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and append a reading, persisting the collection before
    /// returning.
    ///
    /// The reading's timestamp is assigned here, at ingestion time. If the
    /// durable write fails, the in-memory append is rolled back so callers
    /// never observe a reading as saved that would not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for non-finite or out-of-range fields,
    /// or [`Error::Persist`] if the data file could not be written.
    pub fn append(&self, lat: f64, lng: f64, dba: f64) -> Result<Reading> {
        let reading = Reading::new(lat, lng, dba)?;

        // Memory update and durable write form one critical section.
        let mut readings = self.lock();
        readings.push(reading.clone());

        if let Err(err) = self.persist(&readings) {
            readings.pop();
            return Err(err);
        }

        debug!(
            "Appended reading at ({}, {}) = {} dBA, {} total",
            reading.lat,
            reading.lng,
            reading.dba,
            readings.len()
        );
        Ok(reading)
    }

    /// Return a snapshot of every stored reading, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Reading> {
        self.lock().clone()
    }

    /// Count stored readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the store holds no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Rewrite the whole data file from the given collection.
    ///
    /// Writes a temporary sibling first and renames it into place, so an
    /// interrupted write never leaves a truncated data file behind.
    fn persist(&self, readings: &[Reading]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(readings)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|source| Error::Persist {
            path: self.path.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            Error::Persist {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Path of the temporary sibling used for atomic rewrites.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Acquire the collection lock, recovering from a poisoned mutex.
    ///
    /// A panic while holding the lock can at worst leave a fully-written
    /// previous state, never a torn one, so continuing with the inner value
    /// is sound.
    fn lock(&self) -> MutexGuard<'_, Vec<Reading>> {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
