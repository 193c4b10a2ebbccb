//! Placeholder template compiler.
//!
//! `{name}` placeholders are replaced in a single left-to-right pass.
//! Substituted values are never re-scanned, so a value may embed a whole
//! serialized bundle (braces included). Placeholders with no supplied value
//! stay verbatim in the output and are reported back to the caller.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_.\-]*)\}").expect("placeholder pattern is valid")
});

/// Output of a compilation, with the placeholders that had no substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub text: String,
    /// Unresolved placeholder names in first-occurrence order, deduplicated.
    pub unresolved: Vec<String>,
}

impl Compiled {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Compile and report unresolved placeholders without logging.
pub fn render(template: &str, substitutions: &HashMap<String, String>) -> Compiled {
    let mut unresolved: Vec<String> = Vec::new();
    let text = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match substitutions.get(name) {
            Some(value) => value.clone(),
            None => {
                if !unresolved.iter().any(|u| u == name) {
                    unresolved.push(name.to_string());
                }
                caps[0].to_string()
            }
        }
    });
    Compiled {
        text: text.into_owned(),
        unresolved,
    }
}

/// Compile `template`, replacing every supplied placeholder.
///
/// Unresolved placeholders pass through verbatim and are logged as a
/// warning; they are never an error.
pub fn compile(template: &str, substitutions: &HashMap<String, String>) -> String {
    let compiled = render(template, substitutions);
    if !compiled.is_complete() {
        tracing::warn!(
            event = "placeholder_unresolved",
            placeholders = ?compiled.unresolved,
            "template compiled with unresolved placeholders"
        );
    }
    compiled.text
}

/// Names of every placeholder in `template`, deduplicated, in order.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Convenience for building substitution maps from string pairs.
pub fn substitutions<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> HashMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let subs = substitutions([("name", "Acme")]);
        assert_eq!(compile("{name} and {name}", &subs), "Acme and Acme");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let subs = substitutions([("a", "{b}"), ("b", "x")]);
        assert_eq!(compile("{a}", &subs), "{b}");
    }

    #[test]
    fn json_braces_in_template_are_not_placeholders() {
        let subs = substitutions([("subject", "ACME")]);
        let out = compile(r#"{"ticker": "{subject}"}"#, &subs);
        assert_eq!(out, r#"{"ticker": "ACME"}"#);
    }

    #[test]
    fn unresolved_names_reported_once() {
        let compiled = render("{x} {y} {x}", &HashMap::new());
        assert_eq!(compiled.text, "{x} {y} {x}");
        assert_eq!(compiled.unresolved, vec!["x", "y"]);
    }

    #[test]
    fn lists_placeholders() {
        assert_eq!(
            placeholders("{previous}\n{subject} {previous} {facts.name}"),
            vec!["previous", "subject", "facts.name"]
        );
    }
}
