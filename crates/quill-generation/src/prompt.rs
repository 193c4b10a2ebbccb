//! Report prompt compilation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quill_core::models::MetricBundle;
use quill_core::template;

/// Compile a report-type prompt template against a metric bundle.
///
/// Available placeholders:
/// - `{subject}`, `{report_type}`
/// - `{metrics}`: the whole bundle as one pretty-printed JSON block
/// - `{conviction}`: `"<score>/100 (<band>)"` or `"not scored"`
/// - `{generated_on}`: `YYYY-MM-DD`
/// - `{facts.<name>}` for every fact in the bundle
pub fn compile_report_prompt(
    template_text: &str,
    bundle: &MetricBundle,
    generated_on: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let mut subs: HashMap<String, String> = HashMap::new();
    subs.insert("subject".into(), bundle.subject.clone());
    subs.insert("report_type".into(), bundle.report_type.clone());
    subs.insert("metrics".into(), serde_json::to_string_pretty(bundle)?);
    subs.insert(
        "conviction".into(),
        bundle
            .conviction
            .as_ref()
            .map(|c| format!("{}/100 ({})", c.score, c.band))
            .unwrap_or_else(|| "not scored".into()),
    );
    subs.insert(
        "generated_on".into(),
        generated_on.format("%Y-%m-%d").to_string(),
    );
    for (name, value) in &bundle.facts {
        subs.insert(format!("facts.{name}"), value.clone());
    }
    Ok(template::compile(template_text, &subs))
}
