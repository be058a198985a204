//! JSON report export for contact detection results

use crate::contact::{
    ContactPoint, ContactSummary, ContactTable, DetectOptions, LabelMetrics,
};
use crate::error::{ContactPointsError, Result};
use crate::volume::Coord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete report of one detection run
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactReport {
    /// Source volume file
    pub volume_file: String,

    /// Timestamp when the analysis was performed
    pub timestamp: String,

    /// Volume shape `[X, Y, Z]`
    pub shape: [i64; 3],

    /// Options used for detection
    pub options: DetectOptions,

    pub summary: ContactSummary,

    /// Per-label statistics, ordered by label
    pub labels: Vec<LabelMetrics>,

    /// Touching label pairs, ordered by key
    pub pairs: Vec<PairEntry>,
}

/// One touching label pair
#[derive(Debug, Serialize, Deserialize)]
pub struct PairEntry {
    pub label_a: u64,
    pub label_b: u64,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coordinates: Vec<Coord>,
}

impl ContactReport {
    /// Build a report from a detection result
    pub fn new(
        volume_file: String,
        shape: [i64; 3],
        options: &DetectOptions,
        table: &ContactTable,
    ) -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339();

        let pairs = table
            .sorted()
            .into_iter()
            .map(|(key, record)| PairEntry {
                label_a: key.low(),
                label_b: key.high(),
                count: record.count,
                coordinates: record.coordinates.clone(),
            })
            .collect();

        Self {
            volume_file,
            timestamp,
            shape,
            options: options.clone(),
            summary: ContactSummary::compute(table),
            labels: LabelMetrics::compute(table),
            pairs,
        }
    }

    /// Export report to JSON file
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_pretty(self, path.as_ref(), "contact report")
    }
}

/// Contact points between two specific labels
#[derive(Debug, Serialize, Deserialize)]
pub struct PairReport {
    pub volume_file: String,
    pub timestamp: String,
    pub label1: u64,
    pub label2: u64,
    pub connectivity: i64,
    pub points: Vec<ContactPoint>,
}

impl PairReport {
    pub fn new(
        volume_file: String,
        label1: u64,
        label2: u64,
        connectivity: i64,
        points: Vec<ContactPoint>,
    ) -> Self {
        Self {
            volume_file,
            timestamp: chrono::Utc::now().to_rfc3339(),
            label1,
            label2,
            connectivity,
            points,
        }
    }

    /// Export report to JSON file
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_pretty(self, path.as_ref(), "pair report")
    }
}

fn write_pretty<T: Serialize>(value: &T, path: &Path, what: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value).map_err(|e| {
        ContactPointsError::ConfigError(format!("Failed to write {}: {}", what, e))
    })?;
    log::info!("Wrote {} to {:?}", what, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{detect_with_options, Connectivity};
    use crate::volume::LabelVolume;

    #[test]
    fn test_report_contents() {
        let volume = LabelVolume::new([3, 1, 1], vec![1, 2, 3]);
        let options = DetectOptions::new(Connectivity::Six).with_coordinates(true);
        let table = detect_with_options(&volume, &options).unwrap();

        let report = ContactReport::new("v.json".to_string(), volume.shape(), &options, &table);
        assert_eq!(report.pairs.len(), 2);
        assert_eq!((report.pairs[0].label_a, report.pairs[0].label_b), (1, 2));
        assert_eq!(report.pairs[1].coordinates, vec![[1, 0, 0]]);
        assert_eq!(report.summary.total_contacts, 2);
        assert_eq!(report.labels.len(), 3);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[test]
    fn test_report_export() {
        let volume = LabelVolume::new([2, 1, 1], vec![5, 6]);
        let options = DetectOptions::default();
        let table = detect_with_options(&volume, &options).unwrap();
        let report = ContactReport::new("v.json".to_string(), volume.shape(), &options, &table);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.export(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["pairs"][0]["count"], 1);
        assert_eq!(value["options"]["connectivity"], 6);
        assert!(value["pairs"][0].get("coordinates").is_none());
    }
}
