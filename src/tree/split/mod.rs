//! Split finding for tree construction.

pub mod finder;

pub use finder::{NodeStatistics, SplitFinder, SplitInfo};
