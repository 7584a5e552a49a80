// Series catalog: the table the operator picks rows from

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::series::{ImageInfo, SeriesFile};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// Row number shown to the operator (0-based)
    pub index: usize,
    pub series: SeriesFile,
    pub info: ImageInfo,
}

/// Converted series in display order
#[derive(Debug, Clone, Serialize)]
pub struct SeriesCatalog {
    dir: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl SeriesCatalog {
    /// Build from already sorted series; row numbers follow the given order
    pub fn new(dir: impl Into<PathBuf>, rows: Vec<(SeriesFile, ImageInfo)>) -> Self {
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, (series, info))| CatalogEntry {
                index,
                series,
                info,
            })
            .collect();
        Self {
            dir: dir.into(),
            entries,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn path_of(&self, entry: &CatalogEntry) -> PathBuf {
        self.dir.join(&entry.series.file_name)
    }
}
