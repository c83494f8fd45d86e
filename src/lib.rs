//! Oddjobs - small developer command-line utilities
//!
//! Three independent tools sharing a thin library:
//!
//! - `git-credit` shows per-file authorship in surviving lines of code,
//!   aggregated per directory.
//! - `pickline` samples random lines from input streams.
//! - `starlog` charts a GitHub repository's star history over time.
//!
//! Each binary owns its CLI surface; the library holds the logic so it can
//! be unit tested without spawning processes.

pub mod cache;
pub mod credit;
pub mod sample;
pub mod stars;
