//! Glossary of internal acronyms and codenames.
//!
//! Feature descriptions are written with team-internal jargon ("ASL",
//! "Jellybean") that the remote model cannot be expected to know. The
//! glossary maps each term to a plain-language definition so matched
//! definitions can be appended to the prompt.

use serde::{Deserialize, Serialize};

/// A domain acronym/codename paired with its plain-language definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Read-only set of glossary entries, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new(entries: Vec<GlossaryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose term appears as a substring of `text`.
    ///
    /// Matching is case-sensitive: internal terms are written the same
    /// way everywhere, and a case-insensitive match would drag short
    /// acronyms into ordinary words ("asl" inside "easily").
    pub fn matching(&self, text: &str) -> Vec<&GlossaryEntry> {
        self.entries
            .iter()
            .filter(|e| !e.term.is_empty() && text.contains(e.term.as_str()))
            .collect()
    }
}
