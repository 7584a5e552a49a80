// Image Inspector Port
// Reads dimensions and voxel size without loading voxel data

use std::path::Path;
use thiserror::Error;

use crate::domain::ImageInfo;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct InspectError(pub String);

/// Image header reader
#[cfg_attr(test, mockall::automock)]
pub trait ImageInspector: Send + Sync {
    fn inspect(&self, path: &Path) -> Result<ImageInfo, InspectError>;
}
