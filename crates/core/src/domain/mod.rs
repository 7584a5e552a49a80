// Domain Layer - Pure value types for a single import run

pub mod catalog;
pub mod contrast;
pub mod error;
pub mod participant;
pub mod series;
pub mod subject;

// Re-exports
pub use catalog::{CatalogEntry, SeriesCatalog};
pub use contrast::{Contrast, Datatype};
pub use error::DomainError;
pub use participant::{Age, ParticipantRecord, Sex};
pub use series::{ImageInfo, SeriesFile};
pub use subject::{ParticipantId, SessionId};
