//! Result sink: write verdict rows back out as CSV.
//!
//! Column contract: every original input column, in order, followed by
//! `is_geo_compliance_needed`, `reasoning`, `relevant_regulation`. The
//! output file is the audit trail, so input order is preserved and
//! degraded rows are written visibly marked rather than dropped.

use std::path::Path;

use geovet_core::ComplianceVerdict;

use crate::CliError;

pub const VERDICT_COLUMNS: [&str; 3] = [
    "is_geo_compliance_needed",
    "reasoning",
    "relevant_regulation",
];

/// Marker written in the flag column of a degraded row.
pub const DEGRADED_FLAG: &str = "unknown";

/// Outcome of one row's trip through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum RowVerdict {
    Classified(ComplianceVerdict),
    /// Classification or parsing failed; the message lands in the
    /// reasoning column so a reviewer can re-run or classify manually.
    Failed(String),
}

impl RowVerdict {
    fn columns(&self) -> [String; 3] {
        match self {
            RowVerdict::Classified(v) => [
                v.is_geo_compliance_needed.to_string(),
                v.reasoning.clone(),
                v.relevant_regulation.clone(),
            ],
            RowVerdict::Failed(reason) => [
                DEGRADED_FLAG.to_string(),
                format!("classification failed: {}", reason),
                String::new(),
            ],
        }
    }
}

/// One output row: the original input fields plus the verdict.
#[derive(Debug)]
pub struct ResultRow {
    pub fields: Vec<String>,
    pub verdict: RowVerdict,
}

/// Write header + rows, creating or truncating `out`. This run's result
/// entirely replaces any prior output at that path. Returns the output
/// label for progress messages.
pub fn write_results(
    headers: &[String],
    rows: &[ResultRow],
    out: &Path,
) -> Result<String, CliError> {
    let file = std::fs::File::create(out)
        .map_err(|e| CliError::output(format!("cannot create {}: {}", out.display(), e)))?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(std::io::BufWriter::new(file));

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.extend(VERDICT_COLUMNS);
    writer
        .write_record(&header_row)
        .map_err(|e| CliError::output(format!("CSV write error: {}", e)))?;

    for row in rows {
        let verdict = row.verdict.columns();
        let mut record: Vec<&str> = row.fields.iter().map(String::as_str).collect();
        record.extend(verdict.iter().map(String::as_str));
        writer
            .write_record(&record)
            .map_err(|e| CliError::output(format!("CSV write error: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| CliError::output(format!("CSV flush error: {}", e)))?;

    Ok(out.display().to_string())
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(flag: bool, reasoning: &str, regulation: &str) -> RowVerdict {
        RowVerdict::Classified(ComplianceVerdict {
            is_geo_compliance_needed: flag,
            reasoning: reasoning.to_string(),
            relevant_regulation: regulation.to_string(),
        })
    }

    #[test]
    fn test_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");

        let headers = vec!["feature_name".to_string(), "feature_description".to_string()];
        write_results(&headers, &[], &out).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "feature_name,feature_description,is_geo_compliance_needed,reasoning,relevant_regulation\n",
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");

        let headers = vec!["feature_name".to_string(), "feature_description".to_string()];
        let rows = vec![
            ResultRow {
                fields: vec!["a".into(), "first, with comma".into()],
                verdict: verdict(true, "has \"quotes\"", "GDPR"),
            },
            ResultRow {
                fields: vec!["b".into(), "second".into()],
                verdict: RowVerdict::Failed("upstream error: timeout".into()),
            },
        ];
        write_results(&headers, &rows, &out).unwrap();

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let read: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        assert_eq!(read.len(), 2);
        assert_eq!(read[0], vec!["a", "first, with comma", "true", "has \"quotes\"", "GDPR"]);
        assert_eq!(read[1][2], DEGRADED_FLAG);
        assert!(read[1][3].contains("classification failed: upstream error: timeout"));
        assert_eq!(read[1][4], "");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        std::fs::write(&out, "stale content that should disappear\n").unwrap();

        let headers = vec!["feature_name".to_string(), "feature_description".to_string()];
        write_results(&headers, &[], &out).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(!content.contains("stale"));
    }
}
