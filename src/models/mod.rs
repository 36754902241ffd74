//! Data models for safe-area-patch
//!
//! Core abstractions:
//! - `FileTask`: a page file to patch, relative to the project root
//! - `FileOutcome`: what happened to that page in this run

mod outcome;
mod task;

pub use outcome::FileOutcome;
pub use task::FileTask;
