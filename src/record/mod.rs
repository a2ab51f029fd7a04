//! Post records and their persistence.
//!
//! Records are written twice at the end of a run: a pretty-printed JSON
//! array and a JSONL companion with one record per line.

pub mod model;
pub mod writer;

pub use model::PostRecord;
pub use writer::{read_json, read_jsonl, save_records, write_json, write_jsonl};
