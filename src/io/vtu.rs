//! VTK export of contact voxels

use crate::contact::{ContactPoint, ContactTable};
use crate::error::{ContactPointsError, Result};
use std::path::Path;
use vtkio::model::*;

/// Default VTK file format version (2.2 for broad compatibility)
pub const DEFAULT_VTK_VERSION: (u8, u8) = (2, 2);

/// Write every tracked contact voxel as a vertex cell
///
/// Each point carries `label_a` and `label_b` point data. Only tables built
/// with coordinate tracking have anything to write.
pub fn write_contacts_to_vtu(
    table: &ContactTable,
    output_path: &Path,
    vtk_version: Option<(u8, u8)>,
) -> Result<()> {
    let version = vtk_version.unwrap_or(DEFAULT_VTK_VERSION);

    let mut points = Vec::new();
    let mut label_a = Vec::new();
    let mut label_b = Vec::new();

    for (key, record) in table.sorted() {
        for coord in &record.coordinates {
            points.extend(coord.map(f64::from));
            label_a.push(key.low());
            label_b.push(key.high());
        }
    }

    if points.is_empty() && table.total_contacts() > 0 {
        log::warn!("Contact table has no coordinates; enable coordinate tracking for VTK output");
    }

    log::info!(
        "Writing {} contact voxels to {:?} (VTK version {}.{})",
        label_a.len(),
        output_path,
        version.0,
        version.1
    );

    let title = format!("Contact voxels: {} label pairs", table.len());
    let mut ugrid = vertex_grid(points);
    ugrid.data.point.push(scalar_u64("label_a", label_a));
    ugrid.data.point.push(scalar_u64("label_b", label_b));

    export(ugrid, title, version, output_path)
}

/// Write contact points between two labels as line cells joining each pair
pub fn write_contact_points_to_vtu(
    contact_points: &[ContactPoint],
    output_path: &Path,
    vtk_version: Option<(u8, u8)>,
) -> Result<()> {
    let version = vtk_version.unwrap_or(DEFAULT_VTK_VERSION);
    log::info!(
        "Writing {} contact points to {:?} (VTK version {}.{})",
        contact_points.len(),
        output_path,
        version.0,
        version.1
    );

    let points: Vec<f64> = contact_points
        .iter()
        .flat_map(|p| p.first.into_iter().chain(p.second).map(f64::from))
        .collect();

    let n = contact_points.len();
    let cells = Cells {
        cell_verts: VertexNumbers::XML {
            connectivity: (0..(2 * n) as u64).collect(),
            offsets: (0..n).map(|i| ((i + 1) * 2) as u64).collect(),
        },
        types: vec![CellType::Line; n],
    };

    let ugrid = UnstructuredGridPiece {
        points: IOBuffer::F64(points),
        cells,
        data: Attributes::new(),
    };

    export(ugrid, format!("Contact points: {} pairs", n), version, output_path)
}

fn vertex_grid(points: Vec<f64>) -> UnstructuredGridPiece {
    let n = points.len() / 3;
    let cells = Cells {
        cell_verts: VertexNumbers::XML {
            connectivity: (0..n as u64).collect(),
            offsets: (1..=n as u64).collect(),
        },
        types: vec![CellType::Vertex; n],
    };

    UnstructuredGridPiece {
        points: IOBuffer::F64(points),
        cells,
        data: Attributes::new(),
    }
}

fn scalar_u64(name: &str, values: Vec<u64>) -> Attribute {
    Attribute::DataArray(DataArray {
        name: name.into(),
        elem: ElementType::Scalars {
            num_comp: 1,
            lookup_table: None,
        },
        data: IOBuffer::U64(values),
    })
}

fn export(
    ugrid: UnstructuredGridPiece,
    title: String,
    version: (u8, u8),
    output_path: &Path,
) -> Result<()> {
    let vtk = Vtk {
        version: Version::new(version),
        title,
        byte_order: ByteOrder::LittleEndian,
        data: DataSet::UnstructuredGrid {
            pieces: vec![Piece::Inline(Box::new(ugrid))],
            meta: None,
        },
        file_path: None,
    };

    vtk.export(output_path)
        .map_err(|e| ContactPointsError::VtkError(format!("Failed to write VTU file: {}", e)))?;

    log::info!("Successfully wrote VTU file to {:?}", output_path);

    Ok(())
}
