//! Export the current (filtered) record set to a file.

use anyhow::Result;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::PhotoRecord;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
        }
    }
}

/// Export `records` into `dir`, using a timestamped filename. Returns the
/// path written and the number of records exported.
pub fn export_records(
    records: &[&PhotoRecord],
    dir: &Path,
    format: ExportFormat,
) -> Result<(PathBuf, usize)> {
    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "lensbase-export-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    );
    let output_path = dir.join(filename);

    match format {
        ExportFormat::Json => export_json(records, &output_path)?,
        ExportFormat::Csv => export_csv(records, &output_path)?,
    }

    Ok((output_path, records.len()))
}

fn export_json(records: &[&PhotoRecord], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

fn export_csv(records: &[&PhotoRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    // Write headers
    wtr.write_record([
        "id",
        "filename",
        "upload_date",
        "capture_date",
        "category",
        "tags",
        "location",
        "notes",
        "camera",
        "iso",
        "aperture",
        "shutter_speed",
        "focal_length",
    ])?;

    // Write data
    for record in records {
        wtr.write_record([
            record.id.as_str(),
            record.filename.as_str(),
            record.upload_date.as_str(),
            record.capture_date.as_str(),
            record.category.as_str(),
            &record.tags.join("; "),
            record.location.name.as_str(),
            record.notes.as_str(),
            record.metadata.camera.as_deref().unwrap_or(""),
            &record
                .metadata
                .iso
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record.metadata.aperture.as_deref().unwrap_or(""),
            record.metadata.shutter_speed.as_deref().unwrap_or(""),
            record.metadata.focal_length.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::seed_records;
    use tempfile::TempDir;

    #[test]
    fn test_csv_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let records = seed_records();
        let refs: Vec<&PhotoRecord> = records.iter().collect();

        let (path, count) = export_records(&refs, dir.path(), ExportFormat::Csv).unwrap();
        assert_eq!(count, 4);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("id,filename,upload_date"));
        assert!(lines[1].contains("beach_sunset.jpg"));
    }

    #[test]
    fn test_json_export_round_trips() {
        let dir = TempDir::new().unwrap();
        let records = seed_records();
        let refs: Vec<&PhotoRecord> = records.iter().collect();

        let (path, _) = export_records(&refs, dir.path(), ExportFormat::Json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<PhotoRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, records);
    }
}
