//! Row-oriented batch pricing over CSV tables.

pub mod pipeline;
pub mod types;

pub use pipeline::{price_raw_row, process_rows, read_rows, run_batch, write_results};
pub use types::{BatchOutput, BatchRecord, BatchRow, BatchSummary, RawRow, RowError};
