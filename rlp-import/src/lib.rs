//! rlp-import library - recipe data import
//!
//! Converts CSV exports into a JSON array and loads such arrays into the
//! recipe store. Rows are checked with the same validation layer the API
//! uses, so every record written to the JSON output is one `POST /recipes`
//! accepts.

pub mod convert;
pub mod error;
pub mod load;

pub use convert::{convert_file, convert_reader, write_json, Conversion, RejectedRow};
pub use error::{ImportError, Result};
pub use load::{load_records, read_records, read_records_file, FailedRecord, LoadReport, RecordFailure};
