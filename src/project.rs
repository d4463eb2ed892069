use crate::calculations::backward_pass::BackwardPass;
use crate::calculations::critical_path;
use crate::calculations::forward_pass::ForwardPass;
use crate::graph::TaskGraph;
use crate::metadata::ProjectMetadata;
use crate::task::{Task, normalize_id};
use crate::validation::{self, ValidationReport};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub task_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<String>,
    pub project_finish: i64,
}

impl RefreshSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("finish=day {}", self.project_finish));
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    EmptyIdentifier,
    NegativeDuration { id: String, duration_days: i64 },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::EmptyIdentifier => write!(f, "task id must not be empty"),
            ProjectError::NegativeDuration { id, duration_days } => {
                write!(f, "task '{id}' has negative duration {duration_days}")
            }
        }
    }
}

impl std::error::Error for ProjectError {}

/// Calendar dates for one task, projected from the metadata start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDates {
    pub id: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
}

/// A named, ordered collection of tasks: the unit the engine runs over.
/// Input order is preserved so downstream rendering maps rows
/// deterministically.
#[derive(Debug)]
pub struct Project {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self::new_with_metadata(ProjectMetadata::default())
    }

    pub fn new_with_metadata(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            tasks: Vec::new(),
        }
    }

    pub fn from_tasks(metadata: ProjectMetadata, tasks: Vec<Task>) -> Self {
        Self { metadata, tasks }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn project_name(&self) -> &str {
        &self.metadata.project_name
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.metadata.project_name = name.into();
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.metadata.start_date = date;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        let wanted = normalize_id(id);
        self.tasks.iter().find(|task| task.normalized_id() == wanted)
    }

    /// Insert or update a task. Existing tasks are matched by normalized id;
    /// `predecessors = None` leaves the current links untouched on update.
    pub fn upsert_task(
        &mut self,
        id: &str,
        description: &str,
        duration_days: i64,
        predecessors: Option<Vec<String>>,
    ) -> Result<(), ProjectError> {
        let mut task = Task::new(id, description, duration_days);
        if let Some(preds) = predecessors.clone() {
            task.predecessors = preds;
        }
        let wanted = normalize_id(id);
        if let Some(existing) = self
            .tasks
            .iter_mut()
            .find(|task| task.normalized_id() == wanted)
        {
            Self::check_task(&task)?;
            existing.description = description.to_string();
            existing.duration_days = duration_days;
            if let Some(preds) = predecessors {
                existing.predecessors = preds;
            }
            existing.clear_derived();
            return Ok(());
        }
        self.upsert_task_record(task)
    }

    pub fn upsert_task_record(&mut self, task: Task) -> Result<(), ProjectError> {
        Self::check_task(&task)?;
        let wanted = task.normalized_id();
        if let Some(existing) = self
            .tasks
            .iter_mut()
            .find(|t| t.normalized_id() == wanted)
        {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
        Ok(())
    }

    pub fn set_task_status(&mut self, id: &str, status: &str) -> bool {
        let wanted = normalize_id(id);
        match self
            .tasks
            .iter_mut()
            .find(|task| task.normalized_id() == wanted)
        {
            Some(task) => {
                task.status = status.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a task and strip references to it from every remaining
    /// predecessor list. Callers re-run `refresh` afterwards.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let wanted = normalize_id(id);
        let before = self.tasks.len();
        self.tasks.retain(|task| task.normalized_id() != wanted);
        if self.tasks.len() == before {
            return false;
        }
        for task in &mut self.tasks {
            task.predecessors.retain(|pred| normalize_id(pred) != wanted);
            task.clear_derived();
        }
        true
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        validation::validate_tasks(&self.tasks)
    }

    /// Full recompute: validate, then forward pass, backward pass, and
    /// float classification, writing the derived fields back into the tasks
    /// in input order. Fails fast with the consolidated validation report;
    /// the passes themselves have no error path.
    pub fn refresh(&mut self) -> Result<RefreshSummary, ValidationReport> {
        validation::validate_tasks(&self.tasks)?;

        let graph = TaskGraph::build(&self.tasks);
        let early = ForwardPass::new(&graph).execute();
        let project_finish = latest_sink_finish(&graph, &early);
        let late = BackwardPass::new(&graph).execute(project_finish);

        for task in &mut self.tasks {
            let id = task.normalized_id();
            if let Some(&(early_start, early_finish)) = early.get(&id) {
                task.early_start = Some(early_start);
                task.early_finish = Some(early_finish);
            }
            if let Some(&(late_start, late_finish)) = late.get(&id) {
                task.late_start = Some(late_start);
                task.late_finish = Some(late_finish);
            }
        }
        critical_path::classify(&mut self.tasks);

        let critical_path = critical_path::critical_path_ids(&self.tasks);
        Ok(RefreshSummary {
            task_count: self.tasks.len(),
            critical_count: critical_path.len(),
            critical_path,
            project_finish,
        })
    }

    /// Concrete start/finish dates per task, anchored on the metadata start
    /// date. Returns `None` until both the anchor is set and the schedule
    /// has been computed.
    pub fn task_dates(&self) -> Option<Vec<TaskDates>> {
        let anchor = self.metadata.start_date?;
        let mut rows = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let early_start = task.early_start?;
            let start = anchor + Duration::days(early_start);
            let finish = start + Duration::days(task.duration_days);
            rows.push(TaskDates {
                id: task.id.trim().to_string(),
                start,
                finish,
            });
        }
        Some(rows)
    }

    fn check_task(task: &Task) -> Result<(), ProjectError> {
        if task.normalized_id().is_empty() {
            return Err(ProjectError::EmptyIdentifier);
        }
        if task.duration_days < 0 {
            return Err(ProjectError::NegativeDuration {
                id: task.id.trim().to_string(),
                duration_days: task.duration_days,
            });
        }
        Ok(())
    }
}

/// Overall project finish: the latest early finish over the zero-out-degree
/// tasks. Consistent with `max(early_finish)` over all tasks for a valid
/// schedule.
fn latest_sink_finish(graph: &TaskGraph, early: &HashMap<String, (i64, i64)>) -> i64 {
    graph
        .graph
        .node_indices()
        .filter(|&ix| graph.is_sink(ix))
        .filter_map(|ix| early.get(&graph.graph[ix]).map(|&(_, ef)| ef))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_task_inserts_and_updates() {
        let mut project = Project::new();
        project.upsert_task("A", "Excavate", 5, None).unwrap();
        assert_eq!(project.task_count(), 1);

        project
            .upsert_task(" a ", "Excavate deeper", 7, Some(vec!["B".into()]))
            .unwrap();
        assert_eq!(project.task_count(), 1);
        let task = project.find_task("A").unwrap();
        assert_eq!(task.description, "Excavate deeper");
        assert_eq!(task.duration_days, 7);
        assert_eq!(task.predecessors, vec!["B".to_string()]);
    }

    #[test]
    fn upsert_rejects_negative_duration_and_empty_id() {
        let mut project = Project::new();
        assert_eq!(
            project.upsert_task("A", "Excavate", -1, None),
            Err(ProjectError::NegativeDuration {
                id: "A".into(),
                duration_days: -1
            })
        );
        assert_eq!(
            project.upsert_task("   ", "Blank", 1, None),
            Err(ProjectError::EmptyIdentifier)
        );
        assert!(project.is_empty());
    }

    #[test]
    fn delete_task_strips_dangling_references() {
        let mut project = Project::new();
        project.upsert_task("A", "Excavate", 2, None).unwrap();
        project
            .upsert_task("B", "Foundations", 3, Some(vec!["A".into()]))
            .unwrap();

        assert!(project.delete_task("a"));
        assert!(!project.delete_task("a"));
        assert!(project.find_task("B").unwrap().predecessors.is_empty());
        assert!(project.refresh().is_ok());
    }
}
