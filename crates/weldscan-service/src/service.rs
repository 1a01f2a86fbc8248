//! Scan submission orchestration
//!
//! `ScanService` wires the pipeline to its three external collaborators:
//! identity, record store, and blob store. All collaborators are injected
//! at construction; the service owns no I/O of its own.
//!
//! A submission stores the original image first, so a pipeline failure
//! leaves the upload retrievable for diagnosis, but inserts the scan
//! record only after the report blob is stored. There is no cross-store
//! transaction; an orphaned blob after a mid-flight failure is accepted.

use crate::blob::BlobStore;
use crate::error::ServiceResult;
use crate::identity::{IdentityProvider, UserId};
use crate::record::{NewScanRecord, RecordStore, ScanRecord};
use rand::RngExt;
use tracing::info;
use weldscan_detect::{DetectionBackend, Pipeline};
use weldscan_io::content_type_for;

/// What a submission returns to the caller.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub record: ScanRecord,
    /// Presigned URL of the uploaded original.
    pub original_url: String,
    /// Presigned URL of the region-report CSV.
    pub report_url: String,
}

/// One history entry: a stored record plus fresh presigned URLs.
pub type HistoryEntry = ScanOutcome;

/// Pipeline plus its persistence collaborators.
pub struct ScanService<B: DetectionBackend, I, R, S> {
    pipeline: Pipeline<B>,
    identity: I,
    records: R,
    blobs: S,
}

impl<B, I, R, S> ScanService<B, I, R, S>
where
    B: DetectionBackend,
    I: IdentityProvider,
    R: RecordStore,
    S: BlobStore,
{
    pub fn new(pipeline: Pipeline<B>, identity: I, records: R, blobs: S) -> Self {
        Self {
            pipeline,
            identity,
            records,
            blobs,
        }
    }

    /// Authenticate a credential against the injected identity provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ServiceError::Auth`] for an unknown or rejected
    /// credential.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<UserId> {
        self.identity.authenticate(username, password)
    }

    /// Run one scan: store the original, run the pipeline, store the
    /// report, insert the record.
    ///
    /// # Errors
    ///
    /// Undecodable bytes or a backend failure abort the submission; no
    /// record is inserted and no report is stored. The original blob may
    /// already have been stored at that point.
    pub fn submit(&self, user: UserId, filename: &str, bytes: &[u8]) -> ServiceResult<ScanOutcome> {
        let object_id = random_object_id();
        let original_key = format!("{}/{}.{}", user, object_id, extension_of(filename));
        let report_key = format!("{}/{}_report.csv", user, object_id);
        info!(user, filename, original_key, "scan submitted");

        self.blobs
            .put(&original_key, bytes, content_type_for(filename))?;

        let output = self.pipeline.run_bytes(bytes)?;

        self.blobs
            .put(&report_key, output.region_report.as_bytes(), "text/csv")?;
        let record = self.records.insert(NewScanRecord {
            user_id: user,
            original_key: original_key.clone(),
            raw_predictions: output.raw_predictions,
            report_key: report_key.clone(),
        })?;
        info!(user, record_id = record.id, "scan stored");

        Ok(ScanOutcome {
            original_url: self.blobs.presign(&original_key)?,
            report_url: self.blobs.presign(&report_key)?,
            record,
        })
    }

    /// Prior scans for one user, newest first, with fresh presigned URLs.
    pub fn history(&self, user: UserId) -> ServiceResult<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        for record in self.records.list(user)? {
            let original_url = self.blobs.presign(&record.original_key)?;
            let report_url = self.blobs.presign(&record.report_key)?;
            entries.push(HistoryEntry {
                record,
                original_url,
                report_url,
            });
        }
        Ok(entries)
    }
}

/// 128-bit random object id as 32 lowercase hex digits.
fn random_object_id() -> String {
    format!("{:032x}", rand::rng().random::<u128>())
}

fn extension_of(filename: &str) -> &str {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::identity::MemoryIdentity;
    use crate::record::MemoryRecordStore;
    use weldscan_core::RgbImage;
    use weldscan_detect::{
        BackendError, Detection, InferenceMode, PipelineConfig, TilePrediction,
    };
    use weldscan_core::BBox;

    struct OneBoxBackend;

    impl DetectionBackend for OneBoxBackend {
        fn predict(
            &self,
            _tile: &RgbImage,
            _mode: InferenceMode,
        ) -> Result<TilePrediction, BackendError> {
            Ok(TilePrediction {
                detections: vec![Detection {
                    class_id: 0,
                    confidence: 0.8,
                    bbox: BBox::new(1.0, 1.0, 3.0, 3.0),
                }],
                masks: Vec::new(),
            })
        }
    }

    struct FailingBackend;

    impl DetectionBackend for FailingBackend {
        fn predict(
            &self,
            _tile: &RgbImage,
            _mode: InferenceMode,
        ) -> Result<TilePrediction, BackendError> {
            Err(BackendError::new("model unavailable"))
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn small_pipeline<B: DetectionBackend>(backend: B) -> Pipeline<B> {
        let config = PipelineConfig {
            tile: 8,
            stride: 8,
            regions: 4,
            mode: InferenceMode::Boxes,
            ..PipelineConfig::default()
        };
        Pipeline::new(config, backend).unwrap()
    }

    fn service_with<B: DetectionBackend>(
        backend: B,
    ) -> ScanService<B, MemoryIdentity, MemoryRecordStore, MemoryBlobStore> {
        let mut idp = MemoryIdentity::new();
        idp.register("inspector", "s3cret", 1);
        ScanService::new(
            small_pipeline(backend),
            idp,
            MemoryRecordStore::new(),
            MemoryBlobStore::new(),
        )
    }

    #[test]
    fn test_submit_stores_record_and_blobs() {
        let svc = service_with(OneBoxBackend);
        let user = svc.login("inspector", "s3cret").unwrap();
        let outcome = svc.submit(user, "weld.png", &png_bytes(16, 8)).unwrap();

        assert_eq!(outcome.record.user_id, user);
        assert!(outcome.record.original_key.ends_with(".png"));
        assert!(outcome.record.report_key.ends_with("_report.csv"));
        // two tiles, one box each
        assert_eq!(outcome.record.raw_predictions.lines().count(), 2);
        assert!(outcome.original_url.starts_with("memory://"));
        assert!(outcome.report_url.starts_with("memory://"));
    }

    #[test]
    fn test_submit_undecodable_bytes_inserts_nothing() {
        let svc = service_with(OneBoxBackend);
        assert!(svc.submit(1, "junk.png", b"not an image").is_err());
        assert!(svc.history(1).unwrap().is_empty());
    }

    #[test]
    fn test_backend_failure_is_fatal() {
        let svc = service_with(FailingBackend);
        assert!(svc.submit(1, "weld.png", &png_bytes(16, 8)).is_err());
        assert!(svc.history(1).unwrap().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let svc = service_with(OneBoxBackend);
        let first = svc.submit(1, "a.png", &png_bytes(16, 8)).unwrap();
        let second = svc.submit(1, "b.png", &png_bytes(16, 8)).unwrap();

        let history = svc.history(1).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].record.id, second.record.id);
        assert_eq!(history[1].record.id, first.record.id);
    }
}
