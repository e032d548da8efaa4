//! The tabular side of the pipeline: a named-column table of simulation
//! output and the extraction of clean feature/target matrices from it.

#![deny(unused_imports)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod extract;
mod table;

pub use extract::{extract, Extracted};
pub use table::Table;
