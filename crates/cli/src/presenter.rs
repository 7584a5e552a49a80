//! Series table shown before selection

use tabled::{Table, Tabled};
use tracing::info;

use bidsify_core::application::copy::CopiedImage;
use bidsify_core::domain::SeriesCatalog;
use bidsify_core::port::CatalogPresenter;

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File Name")]
    file_name: String,
    #[tabled(rename = "Dimensions")]
    dimensions: String,
    #[tabled(rename = "Pixel Size [mm]")]
    pixel_size: String,
    #[tabled(rename = "Volumes")]
    volumes: u64,
}

#[derive(Tabled)]
struct CopiedRow {
    #[tabled(rename = "Contrast")]
    contrast: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "BIDS file")]
    destination: String,
}

pub fn render_catalog(catalog: &SeriesCatalog) -> String {
    let rows = catalog.entries().iter().map(|entry| SeriesRow {
        index: entry.index,
        file_name: entry.series.file_name.clone(),
        dimensions: entry.info.dimensions_label(),
        pixel_size: entry.info.pixel_size_label(),
        volumes: entry.info.volumes,
    });
    Table::new(rows).to_string()
}

pub fn render_copied(images: &[CopiedImage]) -> String {
    let rows = images.iter().map(|image| CopiedRow {
        contrast: image.contrast.to_string(),
        source: image
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        destination: image.destination.display().to_string(),
    });
    Table::new(rows).to_string()
}

/// Logs the catalog as a table so it also lands in the log file
pub struct TablePresenter;

impl CatalogPresenter for TablePresenter {
    fn present(&self, catalog: &SeriesCatalog) {
        info!("\n{}\n", render_catalog(catalog));
    }
}
