//! CSV ingestion.
//!
//! Raw text is split into lines, each line is tokenized, and the tokenized
//! rows are converted into typed records.

pub mod records;
pub mod tokenizer;

pub use records::{build_records, parse_document, ColumnMap};
pub use tokenizer::{parse_line, split_lines};
