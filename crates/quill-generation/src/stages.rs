//! Built-in stage descriptors and stage prompt assembly.
//!
//! A stage instruction is a template: `{previous}` receives the full output
//! of the stage before it (the compiled report prompt for the first stage),
//! `{subject}` and `{report_type}` identify the request.

use std::time::Duration;

use quill_core::models::{PassStrategy, StageDescriptor, StageOutput};
use quill_core::template::{compile, substitutions};

pub const DRAFT: &str = "draft";
pub const REFINE: &str = "refine";
pub const FLOW: &str = "flow";
pub const FLAIR: &str = "flair";

pub const DRAFT_INSTRUCTION: &str = "{previous}";

pub const JSON_DRAFT_INSTRUCTION: &str = "{previous}\n\n\
Respond with a single JSON object and nothing else. Use the keys \
\"thesis\" (string), \"drivers\" (array of strings), \"risks\" (array of \
strings) and \"outlook\" (string).";

pub const REFINE_INSTRUCTION: &str = "You are reviewing a draft {report_type} analysis of {subject}.\n\
Tighten the argument: keep every figure exactly as given, cut repetition, \
and make sure each claim is backed by a number from the draft.\n\n\
DRAFT:\n{previous}";

pub const FOCUS_INSTRUCTION: &str = "You are reviewing a draft {report_type} analysis of {subject}.\n\
Focus it on the three findings that matter most to a long-term reader. \
Keep every figure exactly as given and drop anything that does not support \
those findings.\n\n\
DRAFT:\n{previous}";

pub const FLOW_INSTRUCTION: &str = "Rewrite the following {report_type} analysis of {subject} so it reads \
as one continuous piece: clear section order, smooth transitions, no \
bullet fragments. Do not change any figure.\n\n\
TEXT:\n{previous}";

pub const FLAIR_INSTRUCTION: &str = "Give the following {report_type} analysis of {subject} a confident, \
engaging voice with a short headline and a one-sentence takeaway at the \
end. Do not add facts or change any figure.\n\n\
TEXT:\n{previous}";

/// `draft -> refine/focus -> flow -> flair`.
pub fn four_pass(deadline: Duration) -> PassStrategy {
    PassStrategy::new(vec![
        StageDescriptor::new(DRAFT, DRAFT_INSTRUCTION, deadline),
        StageDescriptor::new(REFINE, FOCUS_INSTRUCTION, deadline),
        StageDescriptor::new(FLOW, FLOW_INSTRUCTION, deadline),
        StageDescriptor::new(FLAIR, FLAIR_INSTRUCTION, deadline),
    ])
}

/// `draft -> refine`.
pub fn two_pass(deadline: Duration) -> PassStrategy {
    PassStrategy::new(vec![
        StageDescriptor::new(DRAFT, DRAFT_INSTRUCTION, deadline),
        StageDescriptor::new(REFINE, REFINE_INSTRUCTION, deadline),
    ])
}

/// `draft (json) -> refine`: a structured draft turned into prose.
pub fn structured_two_pass(deadline: Duration) -> PassStrategy {
    PassStrategy::new(vec![
        StageDescriptor::new(DRAFT, JSON_DRAFT_INSTRUCTION, deadline).with_output(StageOutput::Json),
        StageDescriptor::new(REFINE, REFINE_INSTRUCTION, deadline),
    ])
}

/// Wrap `previous` in the stage's instruction.
pub fn stage_prompt(stage: &StageDescriptor, previous: &str, subject: &str, report_type: &str) -> String {
    let subs = substitutions([
        ("previous", previous),
        ("subject", subject),
        ("report_type", report_type),
    ]);
    compile(&stage.instruction, &subs)
}
