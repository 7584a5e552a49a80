// bidsify Infrastructure - System Adapters
// Implements: Converter, ImageInspector, Prompt

pub mod dcm2niix_converter;
pub mod nifti_inspector;
pub mod stdin_prompt;

pub use dcm2niix_converter::{Dcm2niixConverter, Dcm2niixOptions};
pub use nifti_inspector::NiftiHeaderInspector;
pub use stdin_prompt::StdinPrompt;
