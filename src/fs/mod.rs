//! Filesystem module.
//!
//! Provides:
//! - Per-account directory layout
//! - Filename sanitizing
//! - The skip-check for previously downloaded videos

pub mod naming;
pub mod paths;

pub use naming::{image_filename, sanitize_filename, url_basename, MAX_FILENAME_LENGTH};
pub use paths::{ensure_dir, find_existing_video, AccountPaths};
