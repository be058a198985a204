//! Contact point detection over label volumes

use crate::contact::connectivity::{forward_offsets, Connectivity};
use crate::contact::partition::{scan_partitioned, Region};
use crate::contact::types::{ContactKey, ContactTable, DetectOptions, ScanOrder};
use crate::error::Result;
use crate::volume::{Dims, LabelVolume, BACKGROUND};

/// Detect contacts between every pair of touching labels
///
/// `connectivity` must be 6, 18 or 26. Counts only; see
/// [`detect_with_options`] for coordinate tracking and parallel scans.
pub fn detect(volume: &LabelVolume, connectivity: i64) -> Result<ContactTable> {
    let connectivity = Connectivity::try_from(connectivity)?;
    detect_with_options(volume, &DetectOptions::new(connectivity))
}

/// Detect contacts with explicit options
pub fn detect_with_options(volume: &LabelVolume, options: &DetectOptions) -> Result<ContactTable> {
    let dims = volume.validate()?;

    log::info!(
        "Detecting contacts in {}x{}x{} volume ({}-connectivity)",
        dims.sx,
        dims.sy,
        dims.sz,
        options.connectivity
    );

    let table = if options.parallel {
        scan_partitioned(volume.labels(), dims, options)?
    } else {
        scan(volume.labels(), dims, &Region::full(dims), options)?
    };

    log::info!(
        "Found {} touching label pairs, {} contacts",
        table.len(),
        table.total_contacts()
    );

    Ok(table)
}

/// Scan the voxels whose origin lies in `region`
///
/// Forward neighbors are read from the whole volume, so a region's last slice
/// still sees the first slice of the next region. `labels` and `dims` must
/// already be validated.
pub(crate) fn scan(
    labels: &[u64],
    dims: Dims,
    region: &Region,
    options: &DetectOptions,
) -> Result<ContactTable> {
    let offsets = forward_offsets(options.connectivity);
    let track = options.track_coordinates;
    let mut table = ContactTable::new();

    let mut visit = |x: usize, y: usize, z: usize| -> Result<()> {
        let cur = labels[dims.index(x, y, z)];
        if cur == BACKGROUND {
            return Ok(());
        }
        for &offset in offsets {
            let Some(n) = dims.neighbor(x, y, z, offset) else {
                continue;
            };
            if let Some(key) = ContactKey::new(cur, labels[n]) {
                let coord = track.then_some([x as u32, y as u32, z as u32]);
                table.record(key, coord)?;
            }
        }
        Ok(())
    };

    let [x0, y0, z0] = region.start;
    let [x1, y1, z1] = region.end;

    match options.scan_order {
        ScanOrder::Forward => {
            for z in z0..z1 {
                for y in y0..y1 {
                    for x in x0..x1 {
                        visit(x, y, z)?;
                    }
                }
            }
        }
        ScanOrder::Reverse => {
            for z in (z0..z1).rev() {
                for y in (y0..y1).rev() {
                    for x in (x0..x1).rev() {
                        visit(x, y, z)?;
                    }
                }
            }
        }
    }

    log::debug!(
        "Scanned region {:?}..{:?}: {} pairs",
        region.start,
        region.end,
        table.len()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactPointsError;

    fn two_voxels() -> LabelVolume {
        LabelVolume::new([2, 1, 1], vec![1, 2])
    }

    fn corner_cube() -> LabelVolume {
        let mut volume = LabelVolume::new([2, 2, 2], vec![1; 8]);
        volume.set(1, 1, 1, 2);
        volume
    }

    #[test]
    fn test_two_voxels_along_x() {
        let table = detect(&two_voxels(), 6).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.count(1, 2), 1);
    }

    #[test]
    fn test_corner_voxel_has_three_face_contacts() {
        let table = detect(&corner_cube(), 6).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.count(1, 2), 3);
    }

    #[test]
    fn test_corner_voxel_higher_connectivity() {
        // 3 face neighbors, 3 edge neighbors, 1 corner neighbor
        assert_eq!(detect(&corner_cube(), 18).unwrap().count(1, 2), 6);
        assert_eq!(detect(&corner_cube(), 26).unwrap().count(1, 2), 7);
    }

    #[test]
    fn test_uniform_volume_is_empty() {
        let volume = LabelVolume::new([3, 3, 3], vec![4; 27]);
        for connectivity in [6, 18, 26] {
            assert!(detect(&volume, connectivity).unwrap().is_empty());
        }
    }

    #[test]
    fn test_background_volume_is_empty() {
        let volume = LabelVolume::zeros(4, 3, 2).unwrap();
        assert!(detect(&volume, 26).unwrap().is_empty());
    }

    #[test]
    fn test_background_never_recorded() {
        let volume = LabelVolume::new([3, 1, 1], vec![1, 0, 2]);
        assert!(detect(&volume, 6).unwrap().is_empty());
    }

    #[test]
    fn test_diagonal_only_contact() {
        // 1 0
        // 0 2
        let volume = LabelVolume::from_2d(2, 2, vec![1, 0, 0, 2]);
        assert!(detect(&volume, 6).unwrap().is_empty());
        assert_eq!(detect(&volume, 18).unwrap().count(1, 2), 1);
        assert_eq!(detect(&volume, 26).unwrap().count(1, 2), 1);
    }

    #[test]
    fn test_anti_diagonal_contact() {
        // 0 1
        // 2 0
        let volume = LabelVolume::from_2d(2, 2, vec![0, 1, 2, 0]);
        assert_eq!(detect(&volume, 18).unwrap().count(1, 2), 1);
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let volume = LabelVolume::new([2, -1, 1], vec![1, 2]);
        assert!(matches!(
            detect(&volume, 6),
            Err(ContactPointsError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_connectivity_seven_rejected() {
        assert!(matches!(
            detect(&two_voxels(), 7),
            Err(ContactPointsError::UnsupportedConnectivity(7))
        ));
    }

    #[test]
    fn test_coordinates_are_lower_indexed_voxel() {
        let volume = two_voxels();
        let options = DetectOptions::new(Connectivity::Six).with_coordinates(true);
        let table = detect_with_options(&volume, &options).unwrap();
        assert_eq!(table.get(1, 2).unwrap().coordinates, vec![[0, 0, 0]]);

        let table = detect_with_options(&corner_cube(), &options).unwrap();
        let mut coords = table.get(1, 2).unwrap().coordinates.clone();
        coords.sort();
        assert_eq!(coords, vec![[0, 1, 1], [1, 0, 1], [1, 1, 0]]);
    }

    #[test]
    fn test_coordinates_off_by_default() {
        let table = detect(&corner_cube(), 6).unwrap();
        assert!(table.get(1, 2).unwrap().coordinates.is_empty());
    }

    #[test]
    fn test_reverse_scan_matches_forward() {
        let mut volume = LabelVolume::zeros(5, 4, 3).unwrap();
        volume.fill_box([0, 0, 0], [2, 4, 3], 1);
        volume.fill_box([2, 0, 0], [5, 2, 3], 2);
        volume.fill_box([2, 2, 0], [5, 4, 2], 3);

        for connectivity in [
            Connectivity::Six,
            Connectivity::Eighteen,
            Connectivity::TwentySix,
        ] {
            let forward = detect_with_options(&volume, &DetectOptions::new(connectivity)).unwrap();
            let reverse = detect_with_options(
                &volume,
                &DetectOptions::new(connectivity).with_scan_order(ScanOrder::Reverse),
            )
            .unwrap();
            assert_eq!(forward.counts(), reverse.counts());
            assert_eq!(forward.len(), 3);
        }
    }
}
