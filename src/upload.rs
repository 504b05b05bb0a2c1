//! The upload/analyze pipeline.
//!
//! One image file per invocation: read and transport-encode the file,
//! send it to the analysis collaborator, then assemble a fresh record
//! from the analysis result or the fallback defaults. Analysis failure
//! never aborts an upload; a file that cannot be read does.
//!
//! The app runs the pipeline on a worker thread and polls stage updates
//! from an mpsc channel each frame.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use crate::analysis::{encode_image_file, AnalysisClient, AnalysisOutcome};
use crate::store::{CameraSettings, PhotoLocation, PhotoRecord, FALLBACK_CATEGORY};

/// Placeholder metadata applied when analysis is unavailable.
pub const FALLBACK_NOTES: &str = "No description provided.";
pub const FALLBACK_TAG: &str = "Uploaded";
pub const FALLBACK_LOCATION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Reading,
    Analyzing,
    Finalizing,
}

impl UploadStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            UploadStage::Reading => "Reading file...",
            UploadStage::Analyzing => "Analyzing with AI...",
            UploadStage::Finalizing => "Finalizing...",
        }
    }
}

/// Progress and completion messages from a running upload.
#[derive(Debug)]
pub enum UploadUpdate {
    Stage(UploadStage),
    Finished {
        record: Box<PhotoRecord>,
        used_fallback: bool,
    },
    Failed(String),
}

#[derive(Debug)]
pub struct UploadResult {
    pub record: PhotoRecord,
    pub used_fallback: bool,
}

/// Assemble a new record from the analysis outcome. Both timestamps are
/// set to the current moment (capture date defaults to the upload moment;
/// no EXIF extraction), coordinates are zeroed, and camera metadata gets
/// placeholder values.
pub fn build_record(filename: &str, url: String, outcome: AnalysisOutcome) -> UploadResult {
    let (notes, tags, category, location_name, used_fallback) = match outcome {
        AnalysisOutcome::Analyzed(analysis) => (
            analysis.notes,
            analysis.tags,
            analysis.category,
            analysis
                .location_name
                .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
            false,
        ),
        AnalysisOutcome::Fallback { reason } => {
            tracing::info!("Upload proceeding with fallback metadata: {}", reason);
            (
                FALLBACK_NOTES.to_string(),
                vec![FALLBACK_TAG.to_string()],
                FALLBACK_CATEGORY.to_string(),
                FALLBACK_LOCATION.to_string(),
                true,
            )
        }
    };

    let record = PhotoRecord {
        id: PhotoRecord::generate_id(),
        url,
        filename: filename.to_string(),
        upload_date: PhotoRecord::upload_date_now(),
        capture_date: PhotoRecord::capture_date_now(),
        location: PhotoLocation {
            lat: 0.0,
            lng: 0.0,
            name: location_name,
        },
        notes,
        tags,
        category,
        metadata: CameraSettings {
            iso: Some(100),
            aperture: Some("f/2.8".to_string()),
            camera: Some("Unknown".to_string()),
            ..Default::default()
        },
    };

    UploadResult {
        record,
        used_fallback,
    }
}

/// Run the pipeline synchronously, reporting stage transitions through
/// `progress`. Returns `Err` only when the file itself cannot be read.
pub fn process_upload(
    path: &Path,
    client: &AnalysisClient,
    progress: &mpsc::Sender<UploadUpdate>,
) -> Result<UploadResult> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let _ = progress.send(UploadUpdate::Stage(UploadStage::Reading));
    let encoded = encode_image_file(path)?;

    let _ = progress.send(UploadUpdate::Stage(UploadStage::Analyzing));
    let outcome = client.analyze(&encoded);

    let _ = progress.send(UploadUpdate::Stage(UploadStage::Finalizing));
    Ok(build_record(&filename, encoded.data_url(), outcome))
}

/// Spawn the pipeline on a worker thread. The returned receiver yields
/// stage updates followed by exactly one `Finished` or `Failed`.
pub fn spawn_upload(path: PathBuf, client: AnalysisClient) -> mpsc::Receiver<UploadUpdate> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        match process_upload(&path, &client, &tx) {
            Ok(result) => {
                let _ = tx.send(UploadUpdate::Finished {
                    record: Box::new(result.record),
                    used_fallback: result.used_fallback,
                });
            }
            Err(e) => {
                tracing::error!("Upload of {} failed: {}", path.display(), e);
                let _ = tx.send(UploadUpdate::Failed(e.to_string()));
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PhotoAnalysis;

    #[test]
    fn test_fallback_record_fields() {
        let outcome = AnalysisOutcome::Fallback {
            reason: "connection refused".to_string(),
        };
        let result = build_record("pier.jpg", "data:image/jpeg;base64,x".to_string(), outcome);

        assert!(result.used_fallback);
        let record = result.record;
        assert_eq!(record.filename, "pier.jpg");
        assert_eq!(record.category, FALLBACK_CATEGORY);
        assert_eq!(record.tags, vec![FALLBACK_TAG.to_string()]);
        assert_eq!(record.notes, FALLBACK_NOTES);
        assert_eq!(record.location.name, FALLBACK_LOCATION);
        assert_eq!(record.location.lat, 0.0);
        assert_eq!(record.location.lng, 0.0);
        assert_eq!(record.metadata.iso, Some(100));
        assert_eq!(record.metadata.aperture.as_deref(), Some("f/2.8"));
        assert_eq!(record.metadata.camera.as_deref(), Some("Unknown"));
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_analyzed_record_fields() {
        let outcome = AnalysisOutcome::Analyzed(PhotoAnalysis {
            notes: "a pier at dusk".to_string(),
            tags: vec!["pier".to_string(), "dusk".to_string()],
            category: "Nature".to_string(),
            location_name: Some("Santa Monica".to_string()),
        });
        let result = build_record("pier.jpg", "url".to_string(), outcome);

        assert!(!result.used_fallback);
        let record = result.record;
        assert_eq!(record.notes, "a pier at dusk");
        assert_eq!(record.category, "Nature");
        assert_eq!(record.location.name, "Santa Monica");
    }

    #[test]
    fn test_analyzed_without_location_uses_unknown() {
        let outcome = AnalysisOutcome::Analyzed(PhotoAnalysis {
            notes: "n".to_string(),
            tags: vec![],
            category: "Abstract".to_string(),
            location_name: None,
        });
        let result = build_record("x.jpg", "url".to_string(), outcome);
        assert_eq!(result.record.location.name, FALLBACK_LOCATION);
    }

    #[test]
    fn test_capture_date_matches_upload_day() {
        let outcome = AnalysisOutcome::Fallback {
            reason: "offline".to_string(),
        };
        let record = build_record("x.jpg", "url".to_string(), outcome).record;
        assert!(record.capture_date.starts_with(&record.upload_date));
    }
}
