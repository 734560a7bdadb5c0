//! Append-only CSV output, one row per dump.

mod writer;

pub use writer::RowWriter;
