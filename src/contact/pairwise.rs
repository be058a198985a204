//! Contact points between one specific pair of labels

use crate::contact::connectivity::{forward_offsets, Connectivity};
use crate::contact::types::ContactPoint;
use crate::error::{ContactPointsError, Result};
use crate::volume::LabelVolume;

/// Find every adjacent voxel pair where one side is `label1` and the other
/// `label2`
///
/// Each point is oriented so `first` is the `label1` voxel. Unlike
/// [`detect`](crate::contact::detect), background is an ordinary label here and
/// may be requested explicitly.
///
/// A pair is emitted when the scan reaches its higher-indexed voxel, checking
/// the backward neighbors in table order (-x, -y, -z first, then diagonals).
/// Points come out in voxel scan order, matching the flat layout of
/// [`flatten_contact_points`].
pub fn find_contact_points(
    volume: &LabelVolume,
    label1: u64,
    label2: u64,
    connectivity: i64,
) -> Result<Vec<ContactPoint>> {
    let connectivity = Connectivity::try_from(connectivity)?;
    let dims = volume.validate()?;

    if label1 == label2 {
        return Err(ContactPointsError::InvalidLabels(format!(
            "labels must differ, got {} twice",
            label1
        )));
    }

    log::debug!(
        "Extracting contact points between {} and {} ({}-connectivity)",
        label1,
        label2,
        connectivity
    );

    let labels = volume.labels();
    let offsets = forward_offsets(connectivity);
    let mut points = Vec::new();

    for z in 0..dims.sz {
        for y in 0..dims.sy {
            for x in 0..dims.sx {
                let cur = labels[dims.index(x, y, z)];
                if cur != label1 && cur != label2 {
                    continue;
                }
                let wanted = if cur == label1 { label2 } else { label1 };
                let here = [x as u32, y as u32, z as u32];

                for &forward in offsets {
                    let offset = forward.map(|d| -d);
                    let Some(n) = dims.neighbor(x, y, z, offset) else {
                        continue;
                    };
                    if labels[n] != wanted {
                        continue;
                    }
                    let there = [
                        (x as i64 + offset[0]) as u32,
                        (y as i64 + offset[1]) as u32,
                        (z as i64 + offset[2]) as u32,
                    ];
                    let point = if cur == label1 {
                        ContactPoint { first: here, second: there }
                    } else {
                        ContactPoint { first: there, second: here }
                    };
                    points.try_reserve(1).map_err(|e| {
                        ContactPointsError::Allocation(format!("contact points: {}", e))
                    })?;
                    points.push(point);
                }
            }
        }
    }

    log::debug!("Found {} contact points", points.len());

    Ok(points)
}

/// Flatten points into `[x1, y1, z1, x2, y2, z2, ...]` for binding layers
pub fn flatten_contact_points(points: &[ContactPoint]) -> Vec<u32> {
    points
        .iter()
        .flat_map(|p| p.first.into_iter().chain(p.second))
        .collect()
}
