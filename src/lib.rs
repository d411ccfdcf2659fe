//! Post-processing for speech-to-text transcripts.

pub mod config;
pub mod error;
pub mod text;

pub use error::Error;
pub use text::{FillerMode, Normalizer, Replacement, ReplacementTable, normalize};
