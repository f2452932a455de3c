//! Export core modules shared across the CLI wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;
