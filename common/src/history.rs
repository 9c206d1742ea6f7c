//! Scan history
//!
//! Newest-first list of completed scans, capped at `MAX_HISTORY`, stored
//! as one JSON array under `HISTORY_KEY`. Every mutation rewrites the
//! whole list; the read-modify-write cycle is serialized by a mutex.

use crate::error::{Error, Result};
use crate::store::KeyValueStore;
use crate::types::{Answers, BaggageVerdict, Verdict, VerdictStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const HISTORY_KEY: &str = "zrh_scan_history";
pub const MAX_HISTORY: usize = 50;

/// Completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub answers: Answers,
    pub hand_baggage_status: VerdictStatus,
    pub checked_baggage_status: VerdictStatus,
    pub hand_baggage_text: String,
    pub checked_baggage_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_baggage_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_baggage_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl ScanRecord {
    pub fn verdict(&self) -> Verdict {
        Verdict::new(
            BaggageVerdict {
                status: self.hand_baggage_status,
                text: self.hand_baggage_text.clone(),
                tip: self.hand_baggage_tip.clone(),
            },
            BaggageVerdict {
                status: self.checked_baggage_status,
                text: self.checked_baggage_text.clone(),
                tip: self.checked_baggage_tip.clone(),
            },
        )
    }

    pub fn overall_status(&self) -> VerdictStatus {
        self.hand_baggage_status.max(self.checked_baggage_status)
    }
}

/// History over a key-value store
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Read the stored list
    ///
    /// Store failures are errors; undecodable contents are logged and
    /// treated as an empty list.
    fn load(&self) -> Result<Vec<ScanRecord>> {
        let data = match self.store.get(HISTORY_KEY)? {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Ok(Vec::new()),
        };
        match serde_json::from_str(&data) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(error = %e, "scan history is corrupt, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, records: &[ScanRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(HISTORY_KEY, &json)
    }

    /// Insert at the front, dropping the oldest entries beyond the cap
    pub fn append(&self, record: ScanRecord) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut records = self.load()?;
        let id = record.id.clone();
        records.insert(0, record);
        records.truncate(MAX_HISTORY);
        self.write(&records)?;
        info!(record_id = %id, total = records.len(), "scan record saved");
        Ok(())
    }

    /// Most recent first; empty when storage is unavailable
    pub fn list(&self) -> Vec<ScanRecord> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "scan history unavailable");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<ScanRecord> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Like `get`, but a store failure is an error instead of a miss
    pub fn find(&self, id: &str) -> Result<Option<ScanRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Remove one record; unknown ids are ignored
    pub fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(());
        }
        self.write(&records)
    }

    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.store.remove(HISTORY_KEY)
    }
}

/// Sink for persisted scans
///
/// Implemented by `HistoryStore`; the session only needs `append`.
pub trait RecordSink {
    fn append_record(&self, record: ScanRecord) -> Result<()>;
}

impl<S: KeyValueStore> RecordSink for HistoryStore<S> {
    fn append_record(&self, record: ScanRecord) -> Result<()> {
        self.append(record).map_err(|e| match e {
            Error::Json(e) => Error::StorageUnavailable(format!("history encoding failed: {}", e)),
            other => other,
        })
    }
}
