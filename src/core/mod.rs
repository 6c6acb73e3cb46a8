//! Core infrastructure: fundamental types, constants and error handling.

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{HousingError, Result};
pub use types::*;
