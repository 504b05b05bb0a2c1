//! Fixed demonstration dataset used when no persisted collection exists.

use super::record::{CameraSettings, PhotoLocation, PhotoRecord};

/// Build the seed collection. Returned most-recent-first, matching the
/// store's display ordering.
pub fn seed_records() -> Vec<PhotoRecord> {
    vec![
        PhotoRecord {
            id: "seed-4".to_string(),
            url: "https://picsum.photos/id/13/800/600".to_string(),
            filename: "beach_sunset.jpg".to_string(),
            upload_date: "2024-05-18".to_string(),
            capture_date: "2024-05-15 19:30".to_string(),
            location: PhotoLocation {
                lat: 34.0195,
                lng: -118.4912,
                name: "Santa Monica Beach".to_string(),
            },
            notes: "Classic sunset at the pier.".to_string(),
            tags: vec![
                "Beach".to_string(),
                "Sunset".to_string(),
                "California".to_string(),
            ],
            category: "Nature".to_string(),
            metadata: CameraSettings {
                iso: Some(100),
                aperture: Some("f/5.6".to_string()),
                shutter_speed: Some("1/500s".to_string()),
                focal_length: Some("50mm".to_string()),
                camera: Some("Fuji X-T4".to_string()),
            },
        },
        PhotoRecord {
            id: "seed-3".to_string(),
            url: "https://picsum.photos/id/12/800/600".to_string(),
            filename: "city_night.jpg".to_string(),
            upload_date: "2024-05-15".to_string(),
            capture_date: "2024-05-10 21:45".to_string(),
            location: PhotoLocation {
                lat: 40.7128,
                lng: -74.0060,
                name: "New York City".to_string(),
            },
            notes: "Long exposure of Times Square.".to_string(),
            tags: vec![
                "City".to_string(),
                "Night".to_string(),
                "Long Exposure".to_string(),
            ],
            category: "Architecture".to_string(),
            metadata: CameraSettings {
                iso: Some(800),
                aperture: Some("f/11".to_string()),
                shutter_speed: Some("10s".to_string()),
                focal_length: Some("16mm".to_string()),
                camera: Some("Nikon Z7".to_string()),
            },
        },
        PhotoRecord {
            id: "seed-2".to_string(),
            url: "https://picsum.photos/id/11/800/600".to_string(),
            filename: "forest_mist.jpg".to_string(),
            upload_date: "2024-05-12".to_string(),
            capture_date: "2024-05-02 06:15".to_string(),
            location: PhotoLocation {
                lat: 47.9423,
                lng: 8.3000,
                name: "Black Forest, Germany".to_string(),
            },
            notes: "Early morning fog in the deep woods.".to_string(),
            tags: vec![
                "Forest".to_string(),
                "Fog".to_string(),
                "Mystical".to_string(),
            ],
            category: "Nature".to_string(),
            metadata: CameraSettings {
                iso: Some(400),
                aperture: Some("f/2.8".to_string()),
                shutter_speed: Some("1/60s".to_string()),
                focal_length: Some("35mm".to_string()),
                camera: Some("Canon R6".to_string()),
            },
        },
        PhotoRecord {
            id: "seed-1".to_string(),
            url: "https://picsum.photos/id/10/800/600".to_string(),
            filename: "mountain_trek.jpg".to_string(),
            upload_date: "2024-05-10".to_string(),
            capture_date: "2024-05-01 14:30".to_string(),
            location: PhotoLocation {
                lat: 46.8523,
                lng: 9.5300,
                name: "Swiss Alps".to_string(),
            },
            notes: "Breathtaking view of the summit during the spring trek.".to_string(),
            tags: vec![
                "Nature".to_string(),
                "Mountains".to_string(),
                "Landscape".to_string(),
            ],
            category: "Travel".to_string(),
            metadata: CameraSettings {
                iso: Some(100),
                aperture: Some("f/8".to_string()),
                shutter_speed: Some("1/250s".to_string()),
                focal_length: Some("24mm".to_string()),
                camera: Some("Sony A7IV".to_string()),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_distinct() {
        let records = seed_records();
        assert_eq!(records.len(), 4);
        for (i, a) in records.iter().enumerate() {
            for b in records.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
