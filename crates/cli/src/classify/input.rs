//! Row source: read the feature CSV and the optional glossary.

use std::path::Path;

use geovet_core::{FeatureRecord, Glossary, GlossaryEntry};

use crate::CliError;

pub const NAME_COLUMN: &str = "feature_name";
pub const DESCRIPTION_COLUMN: &str = "feature_description";

/// All input rows plus the original header, order preserved.
#[derive(Debug)]
pub struct FeatureTable {
    pub headers: Vec<String>,
    pub rows: Vec<FeatureRow>,
}

/// One input row: the original fields verbatim (extra columns included)
/// plus the extracted feature record.
#[derive(Debug)]
pub struct FeatureRow {
    pub fields: Vec<String>,
    pub record: FeatureRecord,
}

/// Read the input CSV into memory.
///
/// Requires `feature_name` and `feature_description` columns; extra
/// columns are kept so the sink can pass them through untouched. An
/// empty description is not an error.
pub fn read_features(path: &Path) -> Result<FeatureTable, CliError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CliError::input(format!("cannot read {}: {}", path.display(), e)))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| {
            CliError::input(format!("cannot read header of {}: {}", path.display(), e))
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let name_idx = column_index(&headers, NAME_COLUMN, path)?;
    let desc_idx = column_index(&headers, DESCRIPTION_COLUMN, path)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            CliError::input(format!(
                "bad CSV record at row {} of {}: {}",
                i + 2,
                path.display(),
                e,
            ))
        })?;

        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        let name = fields.get(name_idx).cloned().unwrap_or_default();
        let description = fields.get(desc_idx).cloned().unwrap_or_default();

        rows.push(FeatureRow {
            fields,
            record: FeatureRecord::new(name, description),
        });
    }

    Ok(FeatureTable { headers, rows })
}

fn column_index(headers: &[String], wanted: &str, path: &Path) -> Result<usize, CliError> {
    headers.iter().position(|h| h == wanted).ok_or_else(|| {
        CliError::schema(format!(
            "{} is missing required column {:?}",
            path.display(),
            wanted,
        ))
        .with_hint(format!(
            "expected columns {:?} and {:?}; extra columns are passed through",
            NAME_COLUMN, DESCRIPTION_COLUMN,
        ))
    })
}

/// Load the glossary CSV (columns: term, definition, header skipped).
///
/// A missing or unreadable glossary is never fatal: augmentation is
/// simply skipped, with a note on stderr.
pub fn load_glossary(path: &Path) -> Glossary {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(r) => r,
        Err(_) => {
            eprintln!(
                "warning: glossary {} not found, proceeding without it",
                path.display(),
            );
            return Glossary::default();
        }
    };

    let mut entries = Vec::new();
    for result in reader.records() {
        let Ok(record) = result else { continue };
        let term = record.get(0).unwrap_or("").trim();
        let definition = record.get(1).unwrap_or("").trim();
        if !term.is_empty() {
            entries.push(GlossaryEntry {
                term: term.to_string(),
                definition: definition.to_string(),
            });
        }
    }

    Glossary::new(entries)
}

// ── Tests ───────────────────────────────────────────────────────────
