//! The contents of this crate need to be organized better:
//!
//! - Timer (a mix of logging, profiling, and even parallel execution)
//! - IO utilities for the JSON and CSV inputs the map builder reads
//! - Miscellaneous collection and formatting helpers

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod collections;
mod io;
pub mod logger;
mod time;
mod utils;

pub use crate::collections::{adjacent_pairs, adjacent_triples, wraparound_get};
pub use crate::io::{read_csv_rows, read_json, slurp_file, to_json, write_json};
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::{basename, prettyprint_usize};
