//! JSON label volume format
//!
//! `{"shape": [X, Y, Z], "labels": [...]}` with labels in X-fastest order. A
//! two-element shape is read as a 2D image with `Z = 1`.

use crate::error::{ContactPointsError, Result};
use crate::volume::LabelVolume;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct JsonVolume {
    shape: Vec<i64>,
    labels: Vec<u64>,
}

pub fn read_json_volume<P: AsRef<Path>>(path: P) -> Result<LabelVolume> {
    let file = File::open(path.as_ref())?;

    let reader = BufReader::new(file);
    let json_volume: JsonVolume = serde_json::from_reader(reader).map_err(|e| {
        ContactPointsError::VolumeFormat(format!("Failed to parse JSON volume: {}", e))
    })?;

    let shape = match json_volume.shape.as_slice() {
        &[sx, sy] => [sx, sy, 1],
        &[sx, sy, sz] => [sx, sy, sz],
        other => {
            return Err(ContactPointsError::VolumeFormat(format!(
                "shape must have 2 or 3 entries, got {}",
                other.len()
            )))
        }
    };

    let volume = LabelVolume::new(shape, json_volume.labels);
    volume.validate()?;

    log::info!(
        "Read {:?} label volume from {:?}",
        volume.shape(),
        path.as_ref()
    );

    Ok(volume)
}

pub fn write_json_volume<P: AsRef<Path>>(volume: &LabelVolume, path: P) -> Result<()> {
    let json_volume = JsonVolume {
        shape: volume.shape().to_vec(),
        labels: volume.labels().to_vec(),
    };

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer(&mut writer, &json_volume).map_err(|e| {
        ContactPointsError::VolumeFormat(format!("Failed to write JSON volume: {}", e))
    })?;
    writer.flush()?;

    Ok(())
}
