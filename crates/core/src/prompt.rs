//! Prompt rendering for the compliance classifier.
//!
//! The instruction text is fixed configuration shared verbatim across
//! every row; only the feature fields and the matched glossary entries
//! vary. This module only formats text — no parsing, no networking.

use crate::glossary::Glossary;
use crate::record::FeatureRecord;

/// Task statement, shared across all rows.
const INSTRUCTIONS: &str = "\
You are an expert compliance analyst. Determine whether the feature \
described below requires geo-specific compliance logic.

A feature requires geo-specific compliance if it is implemented to comply \
with a specific law, regulation, or legal mandate in a particular \
geographic region (a country, a state, or a union such as the EU).

Do NOT flag features for these reasons:
- Business-driven decisions such as market testing, phased rollouts, or A/B tests in specific regions.
- General safety or policy features that apply globally, even if a region is mentioned for context.
";

/// Output contract: a strict JSON object with exactly the verdict fields.
const OUTPUT_CONTRACT: &str = "\
Respond with a single JSON object containing exactly these three keys:
1. \"is_geo_compliance_needed\": boolean
2. \"reasoning\": string (a clear, concise explanation for the decision)
3. \"relevant_regulation\": string (the law or regulation if one applies, otherwise an empty string)

Do not add explanations, markdown, or any text outside the JSON object.
";

/// Render the full prompt for one feature record.
///
/// Pure function of its inputs. Glossary definitions are appended only
/// for terms found as substrings of the description; with no match the
/// output is byte-identical to the no-glossary rendering. An empty
/// description is a valid substitution value.
pub fn build_prompt(record: &FeatureRecord, glossary: &Glossary) -> String {
    let mut prompt = String::new();

    prompt.push_str(INSTRUCTIONS);
    prompt.push('\n');

    let matched = glossary.matching(&record.description);
    if !matched.is_empty() {
        prompt.push_str("GLOSSARY (internal terms used in the description):\n");
        for entry in matched {
            prompt.push_str(&format!("- {}: {}\n", entry.term, entry.definition));
        }
        prompt.push('\n');
    }

    prompt.push_str("FEATURE NAME:\n");
    prompt.push_str(&record.name);
    prompt.push_str("\n\n");

    prompt.push_str("FEATURE DESCRIPTION:\n");
    prompt.push_str(&record.description);
    prompt.push_str("\n\n");

    prompt.push_str(OUTPUT_CONTRACT);

    prompt
}
