//! Writing results: the comments CSV, the winners JSON and the console
//! winner list.

pub mod csv_writer;
pub mod export;

pub use csv_writer::write_csv;
pub use export::{export_winners_json, format_winners};
