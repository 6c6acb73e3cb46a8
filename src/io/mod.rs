//! Input/Output operations.
//!
//! Output files of a training run (loss history and residual report) and
//! model persistence.

pub mod persister;
pub mod report;

pub use persister::{Filesystem, PersistentModel, Persister, MODEL_FORMAT_VERSION};
pub use report::{write_progress, write_progress_to, write_report};
