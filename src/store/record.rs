use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned when analysis produces nothing usable.
pub const FALLBACK_CATEGORY: &str = "Other";

/// The categories the analysis collaborator is asked to choose from.
/// "All" is a filter sentinel, not a record category.
pub const CATEGORIES: &[&str] = &[
    "Nature",
    "Architecture",
    "Travel",
    "People",
    "Abstract",
    "Other",
];

/// Geolocation attached to a photo. Coordinates are best-effort; uploaded
/// photos carry zeroed coordinates and only a display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoLocation {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub name: String,
}

/// Optional camera settings bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
}

/// One photo entry in the database.
///
/// `url` is either an external source URL (seed data) or an embedded
/// base64 data URL (uploads). `upload_date` is `YYYY-MM-DD`;
/// `capture_date` is `YYYY-MM-DD HH:MM` and falls back to the upload
/// moment when no capture metadata exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub upload_date: String,
    pub capture_date: String,
    #[serde(default)]
    pub location: PhotoLocation,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub metadata: CameraSettings,
}

impl PhotoRecord {
    /// Generate a fresh record id. Uuid v4 gives a collision-resistant
    /// random token; the store performs no duplicate check.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Current moment formatted as an upload date (`YYYY-MM-DD`).
    pub fn upload_date_now() -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    /// Current moment formatted as a capture date (`YYYY-MM-DD HH:MM`).
    pub fn capture_date_now() -> String {
        Local::now().format("%Y-%m-%d %H:%M").to_string()
    }

    /// Upload date truncated to `YYYY-MM`, the key used by the
    /// upload-month histogram. A stored date that is shorter than seven
    /// bytes, or has a multibyte character spanning the cut, is kept
    /// whole rather than sliced mid-character.
    pub fn upload_month(&self) -> &str {
        self.upload_date.get(..7).unwrap_or(&self.upload_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PhotoRecord::generate_id();
        let b = PhotoRecord::generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_upload_month_truncation() {
        let record = PhotoRecord {
            id: "r1".to_string(),
            url: String::new(),
            filename: "a.jpg".to_string(),
            upload_date: "2024-05-10".to_string(),
            capture_date: "2024-05-01 14:30".to_string(),
            location: PhotoLocation::default(),
            notes: String::new(),
            tags: Vec::new(),
            category: "Travel".to_string(),
            metadata: CameraSettings::default(),
        };
        assert_eq!(record.upload_month(), "2024-05");
    }

    #[test]
    fn test_upload_month_short_date() {
        let record = PhotoRecord {
            id: "r1".to_string(),
            url: String::new(),
            filename: "a.jpg".to_string(),
            upload_date: "2024".to_string(),
            capture_date: String::new(),
            location: PhotoLocation::default(),
            notes: String::new(),
            tags: Vec::new(),
            category: String::new(),
            metadata: CameraSettings::default(),
        };
        assert_eq!(record.upload_month(), "2024");
    }

    #[test]
    fn test_upload_month_multibyte_date_does_not_panic() {
        // A parseable stored file may carry arbitrary date strings; a
        // multibyte character across the truncation point must not slice
        // mid-character.
        let record = PhotoRecord {
            id: "r1".to_string(),
            url: String::new(),
            filename: "a.jpg".to_string(),
            upload_date: "2024-0é-10".to_string(),
            capture_date: String::new(),
            location: PhotoLocation::default(),
            notes: String::new(),
            tags: Vec::new(),
            category: String::new(),
            metadata: CameraSettings::default(),
        };
        assert_eq!(record.upload_month(), "2024-0é-10");
    }

    #[test]
    fn test_record_json_field_names() {
        let record = PhotoRecord {
            id: "r1".to_string(),
            url: "https://example.com/a.jpg".to_string(),
            filename: "a.jpg".to_string(),
            upload_date: "2024-05-10".to_string(),
            capture_date: "2024-05-01 14:30".to_string(),
            location: PhotoLocation {
                lat: 1.0,
                lng: 2.0,
                name: "Somewhere".to_string(),
            },
            notes: "note".to_string(),
            tags: vec!["Tag".to_string()],
            category: "Travel".to_string(),
            metadata: CameraSettings {
                iso: Some(100),
                shutter_speed: Some("1/250s".to_string()),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"uploadDate\""));
        assert!(json.contains("\"captureDate\""));
        assert!(json.contains("\"shutterSpeed\""));
        // Unset optional metadata is omitted entirely
        assert!(!json.contains("aperture"));
    }
}
