//! Command-line interface.

pub mod args;
pub mod prompt;

pub use args::Args;
pub use prompt::{prompt_account, read_account};
