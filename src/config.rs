//! Configuration file support for batch analysis

use crate::contact::{Connectivity, DetectOptions};
use crate::error::{ContactPointsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a single volume analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    /// Input JSON volume path
    pub input_file: String,

    /// Detection options (falls back to the global defaults)
    #[serde(default)]
    pub options: Option<DetectOptions>,

    /// Report filename (optional, will be auto-generated if not specified)
    pub output_file: Option<String>,

    /// Also write the contact voxels as a VTU file
    #[serde(default)]
    pub write_vtk: bool,
}

/// Top-level configuration for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Output directory for results
    pub output_dir: String,

    /// Volumes to analyze
    pub jobs: Vec<AnalysisJob>,

    /// Global detection options (can be overridden per job)
    #[serde(default)]
    pub default_options: DetectOptions,
}

impl AnalysisJob {
    /// Options in effect for this job
    pub fn effective_options(&self, defaults: &DetectOptions) -> DetectOptions {
        let mut options = self.options.clone().unwrap_or_else(|| defaults.clone());
        if self.write_vtk {
            options.track_coordinates = true;
        }
        options
    }

    /// Report path inside `output_dir`
    pub fn report_path(&self, output_dir: &Path) -> PathBuf {
        match &self.output_file {
            Some(name) => output_dir.join(name),
            None => {
                let stem = Path::new(&self.input_file)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("volume");
                output_dir.join(format!("{}_contacts.json", stem))
            }
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ContactPointsError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ContactPointsError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ContactPointsError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ContactPointsError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Parse jobs from command-line string
    /// Format: "a.json,b.json:26" (connectivity suffix is optional)
    pub fn from_jobs_string(
        output_dir: String,
        jobs_str: &str,
        default_options: DetectOptions,
    ) -> Result<Self> {
        let mut jobs = Vec::new();

        for job in jobs_str.split(',') {
            let job = job.trim();
            if job.is_empty() {
                return Err(ContactPointsError::ConfigError(format!(
                    "Empty job in '{}'",
                    jobs_str
                )));
            }

            // Only a numeric suffix is a connectivity; other colons belong to the path
            let suffix = job
                .rsplit_once(':')
                .and_then(|(path, conn)| conn.trim().parse::<i64>().ok().map(|v| (path, v)));

            let (input_file, options) = match suffix {
                Some((path, value)) => {
                    let options = DetectOptions {
                        connectivity: Connectivity::try_from(value)?,
                        ..default_options.clone()
                    };
                    (path.trim().to_string(), Some(options))
                }
                None => (job.to_string(), None),
            };

            jobs.push(AnalysisJob {
                input_file,
                options,
                output_file: None,
                write_vtk: false,
            });
        }

        Ok(AnalysisConfig {
            output_dir,
            jobs,
            default_options,
        })
    }
}
