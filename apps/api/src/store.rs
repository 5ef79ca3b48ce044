//! Append-only candidate record store.
//!
//! All completed interviews live in one JSON array file. Appending is a
//! read-modify-write of the whole array; a mutex serializes that cycle so
//! concurrently completing sessions cannot lose each other's records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::interview::models::CandidateInfo;

pub struct CandidateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CandidateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Appends one completed record. Existing records are never modified or
    /// truncated; a missing, empty, or corrupt file starts a fresh array.
    pub async fn append(&self, record: &CandidateInfo) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all_records = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if !contents.trim().is_empty() => {
                match serde_json::from_str::<Vec<serde_json::Value>>(&contents) {
                    Ok(records) => records,
                    Err(e) => {
                        warn!("Candidate data file is corrupt, starting fresh array: {e}");
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };

        all_records.push(serde_json::to_value(record).context("serializing candidate record")?);

        let serialized = serde_json::to_string_pretty(&all_records)
            .context("serializing candidate record array")?;
        tokio::fs::write(&self.path, serialized)
            .await
            .with_context(|| format!("writing candidate data file {}", self.path.display()))?;

        info!(
            "Candidate record saved ({} total in {})",
            all_records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads back all persisted records.
    #[allow(dead_code)] // recruiter-facing listing endpoint candidate; exercised by tests
    pub async fn all(&self) -> Result<Vec<serde_json::Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).context("parsing candidate data file")
            }
            _ => Ok(Vec::new()),
        }
    }
}
