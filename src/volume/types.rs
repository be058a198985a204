//! Label volume data structures

use crate::error::{ContactPointsError, Result};
use std::collections::BTreeMap;

/// Voxel coordinate `[x, y, z]`
pub type Coord = [u32; 3];

/// Label reserved for unlabeled voxels
pub const BACKGROUND: u64 = 0;

/// Validated volume dimensions
///
/// Only produced by [`LabelVolume::validate`], so every axis is at least 1 and
/// the voxel count fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl Dims {
    /// Total number of voxels
    pub fn num_voxels(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    /// Linear index of `(x, y, z)`, X varying fastest
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.sx * (y + self.sy * z)
    }

    /// Linear index of the voxel at `(x, y, z) + offset`, or `None` when it
    /// falls outside the volume
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, z: usize, offset: [i64; 3]) -> Option<usize> {
        let nx = shift(x, offset[0], self.sx)?;
        let ny = shift(y, offset[1], self.sy)?;
        let nz = shift(z, offset[2], self.sz)?;
        Some(self.index(nx, ny, nz))
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.sx, self.sy, self.sz]
    }
}

#[inline]
fn shift(pos: usize, delta: i64, extent: usize) -> Option<usize> {
    let moved = pos as i64 + delta;
    if moved < 0 || moved >= extent as i64 {
        None
    } else {
        Some(moved as usize)
    }
}

/// 3D array of integer labels
///
/// Labels are stored with X varying fastest: the voxel `(x, y, z)` lives at
/// `x + X * (y + Y * z)`. A 2D image is a volume with `Z = 1`.
///
/// The shape is kept signed so that shapes handed over by a binding layer can be
/// stored as-is and rejected by [`LabelVolume::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVolume {
    shape: [i64; 3],
    labels: Vec<u64>,
}

impl LabelVolume {
    /// Wrap caller-supplied labels without validation
    pub fn new(shape: [i64; 3], labels: Vec<u64>) -> Self {
        Self { shape, labels }
    }

    /// Wrap a 2D image of `sx * sy` labels as a single-slice volume
    pub fn from_2d(sx: i64, sy: i64, labels: Vec<u64>) -> Self {
        Self::new([sx, sy, 1], labels)
    }

    /// Allocate an all-background volume
    pub fn zeros(sx: usize, sy: usize, sz: usize) -> Result<Self> {
        let count = voxel_count(sx, sy, sz)?;

        let mut labels = Vec::new();
        labels.try_reserve_exact(count).map_err(|e| {
            ContactPointsError::Allocation(format!(
                "cannot allocate {}x{}x{} volume: {}",
                sx, sy, sz, e
            ))
        })?;
        labels.resize(count, BACKGROUND);

        Ok(Self {
            shape: [sx as i64, sy as i64, sz as i64],
            labels,
        })
    }

    /// Shape as supplied, `[X, Y, Z]`
    pub fn shape(&self) -> [i64; 3] {
        self.shape
    }

    /// Raw labels in X-fastest order
    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Check the volume contract and return its dimensions
    ///
    /// Every axis must be positive, must fit a `u32` coordinate, and the label
    /// buffer must hold exactly `X * Y * Z` entries.
    pub fn validate(&self) -> Result<Dims> {
        for (axis, &extent) in ["x", "y", "z"].iter().zip(self.shape.iter()) {
            if extent <= 0 {
                return Err(ContactPointsError::InvalidShape(format!(
                    "dimension {} must be positive, got {} (shape {:?})",
                    axis, extent, self.shape
                )));
            }
            if extent > u32::MAX as i64 {
                return Err(ContactPointsError::InvalidShape(format!(
                    "dimension {} = {} exceeds the coordinate range",
                    axis, extent
                )));
            }
        }

        let dims = Dims {
            sx: self.shape[0] as usize,
            sy: self.shape[1] as usize,
            sz: self.shape[2] as usize,
        };

        let expected = voxel_count(dims.sx, dims.sy, dims.sz)?;
        if self.labels.len() != expected {
            return Err(ContactPointsError::InvalidShape(format!(
                "shape {:?} needs {} labels, got {}",
                self.shape,
                expected,
                self.labels.len()
            )));
        }

        Ok(dims)
    }

    /// Label at `(x, y, z)`, or `None` outside the volume
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u64> {
        let [sx, sy, sz] = self.shape;
        if (x as i64) >= sx || (y as i64) >= sy || (z as i64) >= sz {
            return None;
        }
        self.labels
            .get(x + sx as usize * (y + sy as usize * z))
            .copied()
    }

    /// Overwrite the label at `(x, y, z)`
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the volume.
    pub fn set(&mut self, x: usize, y: usize, z: usize, label: u64) {
        let [sx, sy, sz] = self.shape;
        assert!(
            (x as i64) < sx && (y as i64) < sy && (z as i64) < sz,
            "voxel ({}, {}, {}) outside volume {:?}",
            x,
            y,
            z,
            self.shape
        );
        let idx = x + sx as usize * (y + sy as usize * z);
        self.labels[idx] = label;
    }

    /// Fill the half-open box `[lo, hi)` with `label`, clamped to the volume
    pub fn fill_box(&mut self, lo: [usize; 3], hi: [usize; 3], label: u64) {
        let [sx, sy, sz] = self.shape.map(|d| d.max(0) as usize);
        for z in lo[2]..hi[2].min(sz) {
            for y in lo[1]..hi[1].min(sy) {
                for x in lo[0]..hi[0].min(sx) {
                    self.labels[x + sx * (y + sy * z)] = label;
                }
            }
        }
    }

    /// Get total number of stored labels
    pub fn num_voxels(&self) -> usize {
        self.labels.len()
    }

    /// Voxel count per non-background label
    pub fn label_counts(&self) -> BTreeMap<u64, u64> {
        let mut counts = BTreeMap::new();
        for &label in &self.labels {
            if label != BACKGROUND {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Sorted distinct non-background labels
    pub fn unique_labels(&self) -> Vec<u64> {
        self.label_counts().into_keys().collect()
    }
}

fn voxel_count(sx: usize, sy: usize, sz: usize) -> Result<usize> {
    sx.checked_mul(sy)
        .and_then(|n| n.checked_mul(sz))
        .ok_or_else(|| {
            ContactPointsError::Allocation(format!(
                "voxel count of {}x{}x{} overflows",
                sx, sy, sz
            ))
        })
}
