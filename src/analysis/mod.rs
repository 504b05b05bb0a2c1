//! External photo-analysis collaborator.
//!
//! One outbound request per upload: the encoded image goes to a
//! multimodal API which returns a short note, up to five tags, a category
//! and an optional location guess. Any failure along the way is converted
//! into a typed fallback outcome; the upload never fails because analysis
//! was unavailable.

pub mod provider;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AnalysisConfig;
use provider::{create_provider, AnalysisProvider};

/// Tags beyond this count are discarded (the API is asked for at most
/// five but this is not enforced on the wire).
pub const MAX_TAGS: usize = 5;

/// Largest dimension sent to the API; bigger images are downscaled and
/// re-encoded as JPEG before transport.
const MAX_TRANSPORT_DIMENSION: u32 = 1024;

/// Structured result returned by the analysis collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysis {
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub location_name: Option<String>,
}

impl PhotoAnalysis {
    /// Clamp the tag list to [`MAX_TAGS`] and drop empty entries.
    pub fn sanitized(mut self) -> Self {
        self.tags.retain(|t| !t.trim().is_empty());
        self.tags.truncate(MAX_TAGS);
        self
    }
}

/// Failure classes for a single analysis attempt. All of them take the
/// fallback path; the taxonomy exists so logs and tests can tell the
/// branches apart.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(String),
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
    #[error("empty analysis response")]
    EmptyResponse,
}

/// Result of one analysis attempt. Fallback carries the failure reason
/// so the app can log it; the caller fills in placeholder metadata.
#[derive(Debug)]
pub enum AnalysisOutcome {
    Analyzed(PhotoAnalysis),
    Fallback { reason: String },
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }
}

/// Transport-encoded image: base64 payload plus media type.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: String,
    pub media_type: String,
}

impl EncodedImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Read an image file, downscale if either dimension exceeds the
/// transport limit, re-encode as JPEG and base64 the result.
pub fn encode_image_file(path: &Path) -> Result<EncodedImage> {
    let img = image::open(path)
        .map_err(|e| anyhow!("Failed to read image {}: {}", path.display(), e))?;

    let (width, height) = img.dimensions();
    let img = if width > MAX_TRANSPORT_DIMENSION || height > MAX_TRANSPORT_DIMENSION {
        img.resize(
            MAX_TRANSPORT_DIMENSION,
            MAX_TRANSPORT_DIMENSION,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, 85);
    img.write_with_encoder(encoder)
        .map_err(|e| anyhow!("Failed to encode image as JPEG: {}", e))?;

    Ok(EncodedImage {
        data: BASE64.encode(buf.into_inner()),
        media_type: "image/jpeg".to_string(),
    })
}

/// Cloneable handle to the configured analysis provider.
pub struct AnalysisClient {
    provider: Arc<dyn AnalysisProvider>,
}

impl AnalysisClient {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            provider: Arc::from(create_provider(config)),
        }
    }

    #[cfg(test)]
    pub fn with_provider(provider: Box<dyn AnalysisProvider>) -> Self {
        Self {
            provider: Arc::from(provider),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Run one analysis attempt. Fail-open: every provider error becomes
    /// a `Fallback` outcome rather than propagating.
    pub fn analyze(&self, image: &EncodedImage) -> AnalysisOutcome {
        match self.provider.analyze(image) {
            Ok(analysis) => AnalysisOutcome::Analyzed(analysis.sanitized()),
            Err(e) => {
                tracing::warn!(provider = self.provider.provider_name(), "Analysis failed: {}", e);
                AnalysisOutcome::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Clone for AnalysisClient {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}
