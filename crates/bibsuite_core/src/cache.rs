/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Modification-time gated store for parsed BibTeX files.
//!
//! Each source file maps to one snapshot named by the SHA-256 of its
//! path. A snapshot is served as long as it is at least as new as the
//! source; otherwise the loader runs and the snapshot is replaced.
//! There is no locking between processes. Writes go through a
//! temporary file and a rename, so readers never see a partial snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hex SHA-256 digest of the source path string.
    pub fn fingerprint(source: &Path) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.to_string_lossy().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn cache_path(&self, source: &Path) -> PathBuf {
        self.dir.join(Self::fingerprint(source))
    }

    /// Return the cached snapshot for `source`, or run `loader` and cache
    /// its result.
    ///
    /// Failing to write the snapshot only logs a warning. Errors from the
    /// loader are returned as they are.
    pub fn retrieve<T, E, F>(&self, source: &Path, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&Path) -> Result<T, E>,
    {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("cannot create cache directory {:?}: {}", self.dir, e);
        }

        let cache_file = self.cache_path(source);
        if let Some(hit) = read_fresh(&cache_file, source) {
            debug!("cache hit for {:?}", source);
            return Ok(hit);
        }

        let value = loader(source)?;
        if let Err(e) = store(&cache_file, &value) {
            warn!("failed to write cache file {:?}: {}", cache_file, e);
        }
        Ok(value)
    }
}

fn modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

fn read_fresh<T: DeserializeOwned>(cache_file: &Path, source: &Path) -> Option<T> {
    let (cached_at, source_at) = match (modified(cache_file), modified(source)) {
        (Ok(c), Ok(s)) => (c, s),
        _ => return None,
    };
    if cached_at < source_at {
        debug!("cache for {:?} is stale", source);
        return None;
    }

    let bytes = fs::read(cache_file).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("discarding unreadable cache file {:?}: {}", cache_file, e);
            None
        }
    }
}

fn store<T: Serialize>(cache_file: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = cache_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec(value).map_err(io::Error::other)?;

    let tmp = cache_file.with_extension(format!("tmp{}", std::process::id()));
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, cache_file).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
