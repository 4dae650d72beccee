//! `geovet classify` — run the compliance pipeline over a feature CSV.
//!
//! The pipeline is strictly linear and single-pass: for each row, build
//! the prompt, call the remote classifier, parse the verdict. A failure
//! in one row degrades that row only; the run continues and still writes
//! every other result.

pub mod client;
mod input;
mod output;

use std::path::{Path, PathBuf};

use geovet_core::{build_prompt, parse_verdict, FeatureRecord, Glossary};

use crate::exit_codes;
use crate::CliError;

use client::{ChatClient, Classifier};
use input::FeatureTable;
use output::{ResultRow, RowVerdict};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct ClassifyArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub glossary: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub quiet: bool,
}

pub fn cmd_classify(args: ClassifyArgs) -> Result<(), CliError> {
    // 1. Resolve the credential first: a missing key must abort before
    //    any row is read and before any network call.
    let key = resolve_api_key(args.api_key)?;

    // 2. Read input rows (fatal on failure).
    let table = input::read_features(&args.input)?;

    // 3. Optional glossary; absence is never fatal.
    let glossary = input::load_glossary(&args.glossary);

    let classifier = ChatClient::with_base_url(key, args.model, args.base_url);

    run(&table, &glossary, &classifier, &args.output, args.quiet)
}

/// Drive the pipeline over already-loaded rows.
///
/// Split from `cmd_classify` so tests can substitute a deterministic
/// classifier for the HTTP client.
fn run(
    table: &FeatureTable,
    glossary: &Glossary,
    classifier: &dyn Classifier,
    out: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let stderr_tty = atty::is(atty::Stream::Stderr);
    let show_progress = !quiet && stderr_tty;

    let total = table.rows.len();
    let mut failed = 0usize;
    let mut results = Vec::with_capacity(total);

    for (i, row) in table.rows.iter().enumerate() {
        if show_progress {
            eprintln!("[{}/{}] classifying '{}'...", i + 1, total, row.record.name);
        }

        let verdict = classify_row(&row.record, glossary, classifier);
        if let RowVerdict::Failed(reason) = &verdict {
            failed += 1;
            eprintln!(
                "warning: row {} ('{}') failed: {}",
                i + 1,
                row.record.name,
                reason,
            );
        }

        results.push(ResultRow {
            fields: row.fields.clone(),
            verdict,
        });
    }

    let out_label = output::write_results(&table.headers, &results, out)?;

    if show_progress {
        eprintln!(
            "Done: {} classified, {} failed, written to {}",
            total - failed,
            failed,
            out_label,
        );
    }

    Ok(())
}

/// One row's trip through the pipeline. Never fails the run: classifier
/// and parse errors become a degraded verdict carrying the message.
fn classify_row(
    record: &FeatureRecord,
    glossary: &Glossary,
    classifier: &dyn Classifier,
) -> RowVerdict {
    let prompt = build_prompt(record, glossary);

    let raw = match classifier.complete(&prompt) {
        Ok(text) => text,
        Err(e) => return RowVerdict::Failed(e.to_string()),
    };

    match parse_verdict(&raw) {
        Ok(verdict) => RowVerdict::Classified(verdict),
        Err(e) => RowVerdict::Failed(e.to_string()),
    }
}

/// Resolve the API key: flag value > environment variable > error.
fn resolve_api_key(flag: Option<String>) -> Result<String, CliError> {
    resolve_api_key_from(flag, API_KEY_ENV)
}

fn resolve_api_key_from(flag: Option<String>, env_var: &str) -> Result<String, CliError> {
    if let Some(key) = flag {
        let trimmed = key.trim().to_string();
        if trimmed.is_empty() {
            return Err(missing_key(env_var));
        }
        return Ok(trimmed);
    }

    if let Ok(key) = std::env::var(env_var) {
        let trimmed = key.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    Err(missing_key(env_var))
}

fn missing_key(env_var: &str) -> CliError {
    CliError {
        code: exit_codes::EXIT_CONFIG_NO_KEY,
        message: format!("missing OpenAI API key (use --api-key or set {})", env_var),
        hint: None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use client::ClassifyError;
    use geovet_core::GlossaryEntry;

    /// Deterministic classifier: always returns the same completion.
    struct StubClassifier(&'static str);

    impl Classifier for StubClassifier {
        fn complete(&self, _prompt: &str) -> Result<String, ClassifyError> {
            Ok(self.0.to_string())
        }
    }

    /// Returns malformed text for prompts mentioning the marker, a valid
    /// verdict otherwise.
    struct FlakyClassifier {
        marker: &'static str,
    }

    impl Classifier for FlakyClassifier {
        fn complete(&self, prompt: &str) -> Result<String, ClassifyError> {
            if prompt.contains(self.marker) {
                Ok("not json".to_string())
            } else {
                Ok(r#"{"is_geo_compliance_needed": false, "reasoning": "ok"}"#.to_string())
            }
        }
    }

    fn table(names_and_descriptions: &[(&str, &str)]) -> FeatureTable {
        FeatureTable {
            headers: vec!["feature_name".into(), "feature_description".into()],
            rows: names_and_descriptions
                .iter()
                .map(|(n, d)| input::FeatureRow {
                    fields: vec![n.to_string(), d.to_string()],
                    record: FeatureRecord::new(*n, *d),
                })
                .collect(),
        }
    }

    fn read_output(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_stub_verdict_propagates_to_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let stub = StubClassifier(
            r#"{"is_geo_compliance_needed": true, "reasoning": "x", "relevant_regulation": "GDPR"}"#,
        );

        let t = table(&[("a", "first"), ("b", "second"), ("c", "third")]);
        run(&t, &Glossary::default(), &stub, &out, true).unwrap();

        let rows = read_output(&out);
        assert_eq!(rows.len(), 3);
        // Order preserved.
        assert_eq!(rows[0][0], "a");
        assert_eq!(rows[1][0], "b");
        assert_eq!(rows[2][0], "c");
        for row in &rows {
            assert_eq!(row[2], "true");
            assert_eq!(row[3], "x");
            assert_eq!(row[4], "GDPR");
        }
    }

    #[test]
    fn test_malformed_response_degrades_only_its_row() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let flaky = FlakyClassifier { marker: "BROKEN" };

        let t = table(&[("good1", "fine"), ("bad", "BROKEN feature"), ("good2", "fine too")]);
        run(&t, &Glossary::default(), &flaky, &out, true).unwrap();

        let rows = read_output(&out);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][2], "false");
        assert_eq!(rows[1][2], output::DEGRADED_FLAG);
        assert!(rows[1][3].contains("classification failed"));
        assert_eq!(rows[2][2], "false");
    }

    #[test]
    fn test_classifier_error_degrades_row() {
        struct DownClassifier;
        impl Classifier for DownClassifier {
            fn complete(&self, _prompt: &str) -> Result<String, ClassifyError> {
                Err(ClassifyError::Upstream("connection refused".into()))
            }
        }

        let verdict = classify_row(
            &FeatureRecord::new("f", "d"),
            &Glossary::default(),
            &DownClassifier,
        );
        match verdict {
            RowVerdict::Failed(reason) => assert!(reason.contains("connection refused")),
            RowVerdict::Classified(_) => panic!("expected degraded verdict"),
        }
    }

    #[test]
    fn test_empty_description_still_classifies() {
        let stub = StubClassifier(r#"{"is_geo_compliance_needed": false, "reasoning": "no detail"}"#);
        let verdict = classify_row(
            &FeatureRecord::new("blank", ""),
            &Glossary::new(vec![GlossaryEntry {
                term: "GH".into(),
                definition: "geo-handler".into(),
            }]),
            &stub,
        );
        assert!(matches!(verdict, RowVerdict::Classified(_)));
    }

    #[test]
    fn test_resolve_api_key_flag_priority() {
        let key = resolve_api_key_from(Some("  sk-test-123  ".into()), "__GEOVET_UNSET").unwrap();
        assert_eq!(key, "sk-test-123");
    }

    #[test]
    fn test_resolve_api_key_empty_flag() {
        let err = resolve_api_key_from(Some("  ".into()), "__GEOVET_UNSET").unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_CONFIG_NO_KEY);
        assert!(err.message.contains("missing OpenAI API key"));
    }

    #[test]
    fn test_resolve_api_key_missing() {
        std::env::remove_var("__GEOVET_TEST_KEY_MISSING");
        let err = resolve_api_key_from(None, "__GEOVET_TEST_KEY_MISSING").unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_CONFIG_NO_KEY);
    }

    #[test]
    fn test_resolve_api_key_from_env() {
        std::env::set_var("__GEOVET_TEST_KEY_SET", "sk-env-key");
        let key = resolve_api_key_from(None, "__GEOVET_TEST_KEY_SET").unwrap();
        assert_eq!(key, "sk-env-key");
        std::env::remove_var("__GEOVET_TEST_KEY_SET");
    }
}
