use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "Not Started";

/// Normalize a task identifier: trim surrounding whitespace and case-fold.
/// All id comparisons in the engine go through this.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub duration_days: i64,
    #[serde(default)]
    pub predecessors: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub early_start: Option<i64>,
    #[serde(default)]
    pub early_finish: Option<i64>,
    #[serde(default)]
    pub late_start: Option<i64>,
    #[serde(default)]
    pub late_finish: Option<i64>,
    #[serde(default)]
    pub total_float: Option<i64>,
    #[serde(default)]
    pub is_critical: Option<bool>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl Task {
    pub fn new(id: impl Into<String>, description: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            duration_days,
            predecessors: Vec::new(),
            status: default_status(),
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
            total_float: None,
            is_critical: None,
        }
    }

    pub fn normalized_id(&self) -> String {
        normalize_id(&self.id)
    }

    pub fn normalized_predecessors(&self) -> Vec<String> {
        self.predecessors.iter().map(|p| normalize_id(p)).collect()
    }

    /// Forget any previously computed schedule values.
    pub fn clear_derived(&mut self) {
        self.early_start = None;
        self.early_finish = None;
        self.late_start = None;
        self.late_finish = None;
        self.total_float = None;
        self.is_critical = None;
    }
}
