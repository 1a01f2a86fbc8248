//! Scan record store contract

use crate::error::{ServiceError, ServiceResult};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// One completed scan, as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub id: u64,
    pub user_id: UserId,
    /// Blob key of the uploaded original image.
    pub original_key: String,
    /// Raw-predictions artifact, stored inline with the record.
    pub raw_predictions: String,
    /// Blob key of the region-report CSV.
    pub report_key: String,
    pub created_at: DateTime<Utc>,
}

/// A scan record before the store assigns it an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewScanRecord {
    pub user_id: UserId,
    pub original_key: String,
    pub raw_predictions: String,
    pub report_key: String,
}

/// Persistence for scan records.
pub trait RecordStore {
    /// Insert a record, assigning id and creation time.
    fn insert(&self, record: NewScanRecord) -> ServiceResult<ScanRecord>;

    /// All records for one user, newest first.
    fn list(&self, user: UserId) -> ServiceResult<Vec<ScanRecord>>;
}

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Vec<ScanRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&self, record: NewScanRecord) -> ServiceResult<ScanRecord> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ServiceError::Record("store lock poisoned".into()))?;
        let stored = ScanRecord {
            id: inner.len() as u64 + 1,
            user_id: record.user_id,
            original_key: record.original_key,
            raw_predictions: record.raw_predictions,
            report_key: record.report_key,
            created_at: Utc::now(),
        };
        inner.push(stored.clone());
        Ok(stored)
    }

    fn list(&self, user: UserId) -> ServiceResult<Vec<ScanRecord>> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| ServiceError::Record("store lock poisoned".into()))?;
        // insertion order is creation order, so reversing gives newest first
        Ok(inner
            .iter()
            .rev()
            .filter(|r| r.user_id == user)
            .cloned()
            .collect())
    }
}
