// NIfTI header adapter
// Reads only the 348-byte header; voxel data is never decoded

use nifti::NiftiHeader;
use std::path::Path;

use bidsify_core::domain::ImageInfo;
use bidsify_core::port::{ImageInspector, InspectError};

/// ImageInspector backed by the `nifti` crate (`.nii` and `.nii.gz`)
#[derive(Debug, Default, Clone, Copy)]
pub struct NiftiHeaderInspector;

impl NiftiHeaderInspector {
    pub fn new() -> Self {
        Self
    }
}

/// Size of dimension `axis` (1-based), 1 when the image has fewer axes
fn axis_len(header: &NiftiHeader, axis: usize) -> u64 {
    let rank = i64::from(header.dim[0]);
    if (axis as i64) > rank {
        return 1;
    }
    i64::from(header.dim[axis]).max(1) as u64
}

fn image_info(header: &NiftiHeader) -> Result<ImageInfo, InspectError> {
    let rank = i64::from(header.dim[0]);
    if !(1..=7).contains(&rank) {
        return Err(InspectError(format!("invalid number of dimensions: {rank}")));
    }

    Ok(ImageInfo {
        dims: [axis_len(header, 1), axis_len(header, 2), axis_len(header, 3)],
        voxel_size: [
            header.pixdim[1].abs(),
            header.pixdim[2].abs(),
            header.pixdim[3].abs(),
        ],
        volumes: axis_len(header, 4),
    })
}

impl ImageInspector for NiftiHeaderInspector {
    fn inspect(&self, path: &Path) -> Result<ImageInfo, InspectError> {
        let header = NiftiHeader::from_file(path).map_err(|e| InspectError(e.to_string()))?;
        image_info(&header)
    }
}
