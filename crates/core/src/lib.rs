//! Core logic for geo-compliance classification.
//!
//! Everything in this crate is pure: feature records, glossary lookup,
//! prompt rendering, and verdict parsing. File I/O, networking, and the
//! CLI surface live in `geovet-cli`.

pub mod glossary;
pub mod prompt;
pub mod record;
pub mod verdict;

pub use glossary::{Glossary, GlossaryEntry};
pub use prompt::build_prompt;
pub use record::FeatureRecord;
pub use verdict::{parse_verdict, ComplianceVerdict, ParseError};
