//! Quote corpus handling
//!
//! Reads the flat-text quotation file, splits it into quote texts and
//! performs the one-time import into an empty store.

pub mod error;
pub mod importer;
pub mod loader;
pub mod parser;

#[cfg(test)]
mod property_tests;

pub use error::ImportError;
pub use importer::{CorpusImporter, ImportReport};
pub use loader::load_lines;
pub use parser::parse_lines;
