//! weldscan-service - Scan submission orchestration
//!
//! This crate holds the contracts a web frontend needs around the
//! detection pipeline:
//!
//! - [`IdentityProvider`] - credential to user id
//! - [`RecordStore`] - persisted scan records, newest first per user
//! - [`BlobStore`] - originals and reports as presignable blobs
//! - [`ScanService`] - submit / history orchestration over the three
//!
//! HTTP routing, password hashing, and token issuance are deployment
//! concerns and stay outside this crate. In-memory implementations of
//! all three contracts are provided for tests and local use.

mod blob;
mod error;
mod identity;
mod record;
mod service;

pub use blob::{BlobStore, MemoryBlobStore};
pub use error::{ServiceError, ServiceResult};
pub use identity::{IdentityProvider, MemoryIdentity, UserId};
pub use record::{MemoryRecordStore, NewScanRecord, RecordStore, ScanRecord};
pub use service::{HistoryEntry, ScanOutcome, ScanService};
