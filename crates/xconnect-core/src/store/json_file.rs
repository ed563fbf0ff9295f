// JSON file store: one document holding an array of datacenter records.
//
// Every write serializes the full list into a temp file in the target
// directory, syncs it, then renames it over the original.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{RecordStore, SyncUpdate};
use crate::error::CoreError;
use crate::model::Datacenter;

/// Datacenter inventory persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, reason: impl ToString) -> CoreError {
        CoreError::Store {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    // ── Whole-file operations ────────────────────────────────────────

    /// Read every record. A missing or blank file is an empty inventory.
    pub fn load_all(&self) -> Result<Vec<Datacenter>, CoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| self.error(format!("invalid JSON: {e}")))
    }

    /// Atomically replace the file with `datacenters`.
    pub fn save_all(&self, datacenters: &[Datacenter]) -> Result<(), CoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.error(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, datacenters)
                .map_err(|e| self.error(e))?;
            writer.write_all(b"\n").map_err(|e| self.error(e))?;
            writer.flush().map_err(|e| self.error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.error(e))?;
        tmp.persist(&self.path).map_err(|e| self.error(e.error))?;

        debug!(
            path = %self.path.display(),
            count = datacenters.len(),
            "store written"
        );
        Ok(())
    }

    /// Load, let `f` edit the list, and write it back if `f` succeeds.
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut Vec<Datacenter>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut all = self.load_all()?;
        let out = f(&mut all)?;
        self.save_all(&all)?;
        Ok(out)
    }

    // ── Record operations ────────────────────────────────────────────

    /// Records whose name, site code or address contains `query`.
    pub fn search(&self, query: &str) -> Result<Vec<Datacenter>, CoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|dc| dc.matches_query(query))
            .collect())
    }

    /// Add a new record; its id must not exist yet.
    pub fn insert(&self, datacenter: Datacenter) -> Result<(), CoreError> {
        self.modify(|all| {
            if all.iter().any(|dc| dc.id == datacenter.id) {
                return Err(CoreError::DatacenterExists { id: datacenter.id });
            }
            info!(id = %datacenter.id, "adding datacenter");
            all.push(datacenter);
            Ok(())
        })
    }

    /// Delete a record, returning it.
    pub fn remove(&self, id: &str) -> Result<Datacenter, CoreError> {
        self.modify(|all| {
            let idx = all
                .iter()
                .position(|dc| dc.id == id)
                .ok_or_else(|| CoreError::DatacenterNotFound { id: id.to_owned() })?;
            info!(id, "removing datacenter");
            Ok(all.remove(idx))
        })
    }

    /// Edit one record in place and persist the result.
    pub fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Datacenter) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        self.modify(|all| {
            let dc = all
                .iter_mut()
                .find(|dc| dc.id == id)
                .ok_or_else(|| CoreError::DatacenterNotFound { id: id.to_owned() })?;
            f(dc)
        })
    }
}

impl RecordStore for JsonFileStore {
    fn datacenter(&self, id: &str) -> Result<Datacenter, CoreError> {
        self.load_all()?
            .into_iter()
            .find(|dc| dc.id == id)
            .ok_or_else(|| CoreError::DatacenterNotFound { id: id.to_owned() })
    }

    fn commit_sync(&self, id: &str, update: SyncUpdate) -> Result<Datacenter, CoreError> {
        self.update(id, |dc| {
            update.apply_to(dc);
            Ok(dc.clone())
        })
    }
}
