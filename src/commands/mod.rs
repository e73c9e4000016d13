//! Pipeline stages
//!
//! Split into submodules by stage: scanning the course tree and writing
//! the reports.

mod reports;
mod scanning;

pub use reports::*;
pub use scanning::*;
