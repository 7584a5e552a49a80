// Port Layer - Interfaces for external dependencies

pub mod converter;
pub mod image_inspector;
pub mod presenter;
pub mod prompt;
pub mod time_provider; // For deterministic log names

// Re-exports
pub use converter::{ConversionError, ConversionOutcome, ConversionStatus, Converter};
pub use image_inspector::{ImageInspector, InspectError};
pub use presenter::CatalogPresenter;
pub use prompt::Prompt;
pub use time_provider::{SystemTimeProvider, TimeProvider};
