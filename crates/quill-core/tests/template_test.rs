use std::collections::HashMap;

use quill_core::template::{compile, render, substitutions};

#[test]
fn compile_substitutes_supplied_placeholder() {
    let subs = substitutions([("name", "Acme")]);
    assert_eq!(compile("Hello {name}", &subs), "Hello Acme");
}

#[test]
fn compile_leaves_missing_placeholder_verbatim() {
    assert_eq!(compile("Hello {name}", &HashMap::new()), "Hello {name}");
}

#[test]
fn whole_bundle_embeds_as_one_block() {
    let payload = serde_json::json!({
        "metrics": {"netMargin": {"value": 0.12, "isMet": true}},
        "trends": {"revenue": {"direction": "improving"}}
    });
    let block = serde_json::to_string_pretty(&payload).unwrap();
    let subs = substitutions([("metrics", block.clone()), ("subject", "ACME".to_string())]);
    let out = compile("Analyze {subject}.\n\nDATA:\n{metrics}\n", &subs);
    assert!(out.contains(&block));
    assert!(out.starts_with("Analyze ACME."));
    // Braces inside the embedded block are not treated as placeholders.
    let report = render("{metrics}", &subs);
    assert!(report.unresolved.is_empty());
}

#[test]
fn partially_supplied_map_reports_the_rest() {
    let subs = substitutions([("subject", "ACME")]);
    let out = render("{subject} {report_type} {subject}", &subs);
    assert_eq!(out.text, "ACME {report_type} ACME");
    assert_eq!(out.unresolved, vec!["report_type"]);
}
