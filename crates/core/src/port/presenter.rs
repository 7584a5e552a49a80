// Catalog Presenter Port

use crate::domain::SeriesCatalog;

/// Shows the converted series to the operator before selection starts
pub trait CatalogPresenter: Send + Sync {
    fn present(&self, catalog: &SeriesCatalog);
}

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Remembers how many rows each presented catalog had
    #[derive(Default)]
    pub struct RecordingPresenter {
        shown: Mutex<Vec<usize>>,
    }

    impl RecordingPresenter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn shown(&self) -> Vec<usize> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl CatalogPresenter for RecordingPresenter {
        fn present(&self, catalog: &SeriesCatalog) {
            self.shown.lock().unwrap().push(catalog.len());
        }
    }
}
