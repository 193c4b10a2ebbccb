//! Best-effort repair of structured stage output.
//!
//! A stage declared `output = json` must yield a JSON document. When the
//! raw text does not parse, one repair is attempted (unwrap the first code
//! fence, quote bare object keys, drop trailing commas before a closing
//! bracket) followed by exactly one re-parse. Key quoting and comma removal
//! only touch text outside string literals.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\n?(.*?)```").expect("fence pattern is valid")
});

/// A parsed structured output.
#[derive(Debug, Clone, PartialEq)]
pub struct Structured {
    pub value: Value,
    /// The repair step was needed to parse.
    pub repaired: bool,
}

/// Parse `text` as JSON, repairing once if needed. On failure returns the
/// parser's message for the repaired text.
pub fn parse_structured(text: &str) -> Result<Structured, String> {
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(Structured {
            value,
            repaired: false,
        });
    }
    let repaired = repair(text);
    serde_json::from_str::<Value>(&repaired)
        .map(|value| Structured {
            value,
            repaired: true,
        })
        .map_err(|e| e.to_string())
}

/// Apply the three repair steps in order.
pub fn repair(text: &str) -> String {
    normalize_outside_strings(&strip_code_fences(text))
}

/// Contents of the first Markdown code fence, with or without a language
/// tag, wherever it sits in `text`. Text without a closed fence is returned
/// trimmed, minus an unterminated opening fence line.
pub fn strip_code_fences(text: &str) -> String {
    if let Some(caps) = FENCED_BLOCK.captures(text) {
        return caps[1].trim().to_string();
    }
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => rest.find('\n').map_or(rest, |nl| &rest[nl + 1..]).trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Quote bare keys and drop trailing commas, skipping `"..."` literals.
fn normalize_outside_strings(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    // Last non-whitespace character emitted outside a string.
    let mut last_structural = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                last_structural = Some('"');
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ',' if matches!(next_significant(&chars, i + 1), Some('}' | ']')) => {
                i += 1;
            }
            c if is_key_start(c) && matches!(last_structural, Some('{' | ',')) => {
                let end = chars[i..]
                    .iter()
                    .position(|&ch| !is_key_char(ch))
                    .map_or(chars.len(), |n| i + n);
                let ident: String = chars[i..end].iter().collect();
                if next_significant(&chars, end) == Some(':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                    last_structural = Some('"');
                } else {
                    out.push_str(&ident);
                    last_structural = ident.chars().last();
                }
                i = end;
            }
            c => {
                out.push(c);
                if !c.is_whitespace() {
                    last_structural = Some(c);
                }
                i += 1;
            }
        }
    }
    out
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars.get(from..)?.iter().copied().find(|c| !c.is_whitespace())
}

fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
