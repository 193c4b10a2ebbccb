use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{StageDescriptor, ThresholdTable};

/// A `[report_types.<name>]` table. Every field is optional so a table can
/// override parts of a built-in report type; a table naming a new report
/// type must supply `required_endpoints`, `prompt_template`, `calculator`
/// and `stages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTypeConfig {
    pub required_endpoints: Option<Vec<String>>,
    pub prompt_template: Option<String>,
    pub calculator: Option<String>,
    pub stages: Option<Vec<StageDescriptor>>,
    /// Per-metric threshold tables; entries replace built-in tables by name.
    pub thresholds: BTreeMap<String, ThresholdTable>,
}
