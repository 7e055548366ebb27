//! Output generation for validated entities.
//!
//! # Submodules
//!
//! - [`json`]: Writes validated sources or articles back out as JSON

pub mod json;
