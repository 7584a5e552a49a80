// Application Layer - Use Cases

pub mod catalog;
pub mod copy;
pub mod import;
pub mod layout;
pub mod overwrite;
pub mod registry;
pub mod selection;
pub mod sidecars;

// Re-exports
pub use import::{ImportOutcome, ImportRequest, ImportService};
pub use layout::{BidsLayout, LayoutOptions};
