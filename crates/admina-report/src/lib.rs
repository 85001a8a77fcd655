//! Rendering identity matrices and merge results for display.
//!
//! Every renderer is a pure function of its input plus an [`EmailMask`],
//! except the CSV writer, which produces files.
//!
//! [`EmailMask`]: admina_core::EmailMask

pub mod artifacts;
pub mod error;
mod format;
pub mod matrix;
pub mod merge;

pub use artifacts::{ArtifactPaths, MAPPINGS_FILE, UNMAPPED_FILE, write_artifacts};
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use matrix::render_matrix;
pub use merge::MergeReport;
