pub mod extraction;

pub use extraction::{ExtractionRecord, RECORD_KEYS};
