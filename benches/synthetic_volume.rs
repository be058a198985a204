//! Synthetic label volume generation utilities for benchmarking
//!
//! Real segmentations are large and not checked in, so benchmarks run on
//! generated volumes with a controllable number of regions.

use contact_points::LabelVolume;

/// Generate a volume tiled with cubic regions
///
/// Each `cell` x `cell` x `cell` block gets its own label, so every block face
/// is a contact interface.
///
/// # Arguments
/// * `sx`, `sy`, `sz` - Volume dimensions in voxels
/// * `cell` - Edge length of each labeled block
pub fn generate_block_volume(sx: usize, sy: usize, sz: usize, cell: usize) -> LabelVolume {
    let cell = cell.max(1);
    let bx = sx.div_ceil(cell);
    let by = sy.div_ceil(cell);

    let mut labels = Vec::with_capacity(sx * sy * sz);
    for z in 0..sz {
        for y in 0..sy {
            for x in 0..sx {
                let block = (x / cell) + bx * ((y / cell) + by * (z / cell));
                labels.push(block as u64 + 1);
            }
        }
    }

    LabelVolume::new([sx as i64, sy as i64, sz as i64], labels)
}

/// Generate a volume of irregular labels with background holes
///
/// Uses a small linear congruential generator so runs are reproducible.
pub fn generate_noisy_volume(sx: usize, sy: usize, sz: usize, num_labels: u64, seed: u64) -> LabelVolume {
    let mut state = seed;
    let labels = (0..sx * sy * sz)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % (num_labels + 1)
        })
        .collect();

    LabelVolume::new([sx as i64, sy as i64, sz as i64], labels)
}

/// Calculate cube dimensions for a target voxel count
pub fn calculate_cube_side(target_voxels: usize) -> usize {
    ((target_voxels as f64).powf(1.0 / 3.0).round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::{calculate_cube_side, generate_block_volume, generate_noisy_volume};

    #[test]
    fn test_block_volume_labels() {
        let volume = generate_block_volume(4, 4, 4, 2);
        assert_eq!(volume.num_voxels(), 64);
        assert_eq!(volume.unique_labels().len(), 8);
    }

    #[test]
    fn test_noisy_volume_reproducible() {
        let a = generate_noisy_volume(5, 5, 5, 3, 7);
        let b = generate_noisy_volume(5, 5, 5, 3, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cube_side() {
        assert_eq!(calculate_cube_side(1_000), 10);
        assert_eq!(calculate_cube_side(1), 1);
    }
}
