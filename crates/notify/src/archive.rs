use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use frontdesk_core::IntakeRecord;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("could not serialize intake record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write archive file `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistence seam for completed intake records.
#[async_trait]
pub trait Archive: Send + Sync {
    async fn store(&self, record: &IntakeRecord) -> Result<(), ArchiveError>;
}

/// Writes the record as pretty-printed UTF-8 JSON at a fixed path. Each
/// dispatch overwrites the previous file; there is no append and no
/// versioning.
pub struct JsonArchive {
    path: PathBuf,
}

impl JsonArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Archive for JsonArchive {
    async fn store(&self, record: &IntakeRecord) -> Result<(), ArchiveError> {
        let mut body = serde_json::to_string_pretty(record)?;
        body.push('\n');

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| ArchiveError::Write { path: self.path.clone(), source })?;

        debug!(
            event_name = "frontdesk.notify.record_archived",
            path = %self.path.display(),
            "intake record archived"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use frontdesk_core::IntakeRecord;

    use super::{Archive, ArchiveError, JsonArchive};

    fn record(value: Value) -> IntakeRecord {
        let Value::Object(fields) = value else { panic!("test fixture must be an object") };
        IntakeRecord::from_object(fields)
    }

    #[tokio::test]
    async fn writes_pretty_printed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output.json");
        let archive = JsonArchive::new(&path);

        archive
            .store(&record(json!({"patient_name": "Jane Doe", "doctor_name": "Dr. Mark Patel"})))
            .await
            .expect("archive write succeeds");

        let written = std::fs::read_to_string(&path).expect("file exists");
        assert!(written.contains("  \"patient_name\": \"Jane Doe\""), "output is indented");
        let round_trip: Value = serde_json::from_str(&written).expect("file is valid JSON");
        assert_eq!(round_trip["doctor_name"], "Dr. Mark Patel");
    }

    #[tokio::test]
    async fn each_store_overwrites_the_previous_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output.json");
        let archive = JsonArchive::new(&path);

        archive.store(&record(json!({"patient_name": "First"}))).await.expect("first write");
        archive.store(&record(json!({"patient_name": "Second"}))).await.expect("second write");

        let written = std::fs::read_to_string(&path).expect("file exists");
        assert!(written.contains("Second"));
        assert!(!written.contains("First"), "prior content is replaced, not appended");
    }

    #[tokio::test]
    async fn unwritable_path_is_a_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-subdir").join("output.json");
        let archive = JsonArchive::new(&path);

        let error = archive.store(&record(json!({"patient_name": "Jane"}))).await.unwrap_err();
        assert!(matches!(error, ArchiveError::Write { .. }));
        assert!(error.to_string().contains("missing-subdir"));
    }
}
