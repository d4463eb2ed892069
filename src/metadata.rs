use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    /// Calendar anchor for reporting: day 0 of the computed schedule maps to
    /// this date. May stay unset until the user picks one; scheduling itself
    /// runs on whole-day offsets and never reads it.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            start_date: None,
        }
    }
}
