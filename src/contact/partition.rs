//! Slab decomposition for partitioned and parallel detection
//!
//! A region only owns the voxels that start a pair; forward neighbors are read
//! from the full volume. That gives every slab an implicit one-voxel halo into
//! the next slab, so the partition tables sum to the sequential result.

use crate::contact::detection::scan;
use crate::contact::types::{ContactTable, DetectOptions};
use crate::error::{ContactPointsError, Result};
use crate::volume::{Dims, LabelVolume};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Half-open box of voxel origins, `[start, end)` on each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: [usize; 3],
    pub end: [usize; 3],
}

impl Region {
    /// Region covering the whole volume
    pub fn full(dims: Dims) -> Self {
        Self {
            start: [0, 0, 0],
            end: dims.as_array(),
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.start[axis] >= self.end[axis])
    }

    /// Get number of voxel origins in the region
    pub fn num_voxels(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (0..3).map(|axis| self.end[axis] - self.start[axis]).product()
    }

    /// Cut the region in two at `at` along `axis`
    ///
    /// Returns `None` if `axis > 2` or `at` is outside `start..=end`.
    pub fn split(&self, axis: usize, at: usize) -> Option<(Region, Region)> {
        if axis > 2 || at < self.start[axis] || at > self.end[axis] {
            return None;
        }
        let mut lower = *self;
        let mut upper = *self;
        lower.end[axis] = at;
        upper.start[axis] = at;
        Some((lower, upper))
    }

    /// Split into up to `count` contiguous slabs of near-equal thickness
    ///
    /// Returns `None` if `axis > 2`.
    pub fn slabs(&self, axis: usize, count: usize) -> Option<Vec<Region>> {
        if axis > 2 {
            return None;
        }
        let extent = self.end[axis].saturating_sub(self.start[axis]);
        let count = count.clamp(1, extent.max(1));
        let base = extent / count;
        let extra = extent % count;

        let mut slabs = Vec::with_capacity(count);
        let mut lo = self.start[axis];
        for i in 0..count {
            let thickness = base + usize::from(i < extra);
            let mut slab = *self;
            slab.start[axis] = lo;
            slab.end[axis] = lo + thickness;
            slabs.push(slab);
            lo += thickness;
        }
        Some(slabs)
    }

    fn fits(&self, dims: Dims) -> bool {
        let extent = dims.as_array();
        (0..3).all(|axis| self.start[axis] <= self.end[axis] && self.end[axis] <= extent[axis])
    }
}

/// Detect contacts originating inside `region`
///
/// Neighbors beyond the region boundary are still examined, so tables from
/// regions that tile the volume merge into the full-volume result.
pub fn detect_region(
    volume: &LabelVolume,
    region: &Region,
    options: &DetectOptions,
) -> Result<ContactTable> {
    let dims = volume.validate()?;
    if !region.fits(dims) {
        return Err(ContactPointsError::InvalidShape(format!(
            "region {:?}..{:?} outside volume {:?}",
            region.start,
            region.end,
            dims.as_array()
        )));
    }
    scan(volume.labels(), dims, region, options)
}

/// Detect contacts slab by slab and merge the partial tables
///
/// Slabs run on the rayon pool when the `parallel` feature is enabled and
/// `options.parallel` is set; otherwise one after another.
pub fn detect_partitioned(volume: &LabelVolume, options: &DetectOptions) -> Result<ContactTable> {
    let dims = volume.validate()?;
    scan_partitioned(volume.labels(), dims, options)
}

/// Axis along which slabs are cut: Z unless the volume is flat
fn slab_axis(dims: Dims) -> usize {
    if dims.sz > 1 {
        2
    } else if dims.sy > 1 {
        1
    } else {
        0
    }
}

fn slab_count(options: &DetectOptions) -> usize {
    if options.slabs > 0 {
        options.slabs
    } else {
        worker_threads()
    }
}

#[cfg(feature = "parallel")]
fn worker_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn worker_threads() -> usize {
    1
}

pub(crate) fn scan_partitioned(
    labels: &[u64],
    dims: Dims,
    options: &DetectOptions,
) -> Result<ContactTable> {
    let axis = slab_axis(dims);
    let full = Region::full(dims);
    let slabs = full
        .slabs(axis, slab_count(options))
        .unwrap_or_else(|| vec![full]);

    log::debug!("Scanning {} slabs along axis {}", slabs.len(), axis);

    #[cfg(feature = "parallel")]
    let partials: Vec<Result<ContactTable>> = if options.parallel {
        slabs
            .par_iter()
            .map(|slab| scan(labels, dims, slab, options))
            .collect()
    } else {
        slabs
            .iter()
            .map(|slab| scan(labels, dims, slab, options))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let partials: Vec<Result<ContactTable>> = slabs
        .iter()
        .map(|slab| scan(labels, dims, slab, options))
        .collect();

    // Merge in slab order so coordinate lists stay in scan order
    let mut table = ContactTable::new();
    for partial in partials {
        table.merge(partial?);
    }
    Ok(table)
}
