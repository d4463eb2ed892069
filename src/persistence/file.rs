use super::{PersistenceError, PersistenceResult};
use crate::metadata::ProjectMetadata;
use crate::project::Project;
use crate::task::{DEFAULT_STATUS, Task};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Split a raw predecessor cell on the delimiters users actually type:
/// commas, semicolons, periods, and any whitespace. Empty fragments are
/// dropped here, at the ingestion boundary.
pub fn split_predecessors(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == ';' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Serialize, Deserialize)]
struct ProjectSnapshot {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
}

impl ProjectSnapshot {
    fn from_project(project: &Project) -> PersistenceResult<Self> {
        super::validate_tasks(project.tasks())?;
        Ok(Self {
            metadata: project.metadata().clone(),
            tasks: project.tasks().to_vec(),
        })
    }

    fn into_project(self) -> PersistenceResult<Project> {
        super::validate_tasks(&self.tasks)?;
        Ok(Project::from_tasks(self.metadata, self.tasks))
    }
}

pub fn save_project_to_json<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let snapshot = ProjectSnapshot::from_project(project)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    snapshot.into_project()
}

/// One CSV row in the upload/export layout the original spreadsheets used.
/// Optional cells stay strings so half-filled uploads load cleanly.
#[derive(Serialize, Deserialize)]
struct TaskCsvRecord {
    #[serde(rename = "Task ID")]
    id: String,
    #[serde(rename = "Task Description")]
    description: String,
    #[serde(rename = "Predecessors", default)]
    predecessors: String,
    #[serde(rename = "Duration")]
    duration: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "ES", default)]
    early_start: String,
    #[serde(rename = "EF", default)]
    early_finish: String,
    #[serde(rename = "LS", default)]
    late_start: String,
    #[serde(rename = "LF", default)]
    late_finish: String,
    #[serde(rename = "Float", default)]
    total_float: String,
    #[serde(rename = "On Critical Path?", default)]
    on_critical_path: String,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            description: task.description.clone(),
            predecessors: task.predecessors.join(","),
            duration: task.duration_days.to_string(),
            status: task.status.clone(),
            early_start: format_option_i64(task.early_start),
            early_finish: format_option_i64(task.early_finish),
            late_start: format_option_i64(task.late_start),
            late_finish: format_option_i64(task.late_finish),
            total_float: format_option_i64(task.total_float),
            on_critical_path: match task.is_critical {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => String::new(),
            },
        }
    }
}

impl TaskCsvRecord {
    fn into_task(self) -> PersistenceResult<Task> {
        let duration_days = self.duration.trim().parse::<i64>().map_err(|e| {
            PersistenceError::InvalidData(format!(
                "task '{}' has invalid duration '{}': {e}",
                self.id, self.duration
            ))
        })?;
        if duration_days < 0 {
            return Err(PersistenceError::InvalidData(format!(
                "task '{}' has negative duration {duration_days}",
                self.id
            )));
        }

        let mut task = Task::new(self.id, self.description, duration_days);
        task.predecessors = split_predecessors(&self.predecessors);
        task.status = if self.status.trim().is_empty() {
            DEFAULT_STATUS.to_string()
        } else {
            self.status
        };
        task.early_start = parse_option_i64("ES", &self.early_start)?;
        task.early_finish = parse_option_i64("EF", &self.early_finish)?;
        task.late_start = parse_option_i64("LS", &self.late_start)?;
        task.late_finish = parse_option_i64("LF", &self.late_finish)?;
        task.total_float = parse_option_i64("Float", &self.total_float)?;
        task.is_critical = match self.on_critical_path.trim() {
            "" => None,
            "Yes" => Some(true),
            "No" => Some(false),
            other => {
                return Err(PersistenceError::InvalidData(format!(
                    "invalid critical-path flag '{other}' (expected Yes or No)"
                )));
            }
        };
        Ok(task)
    }
}

/// Write the task list in the upload layout. Zero-task projects are
/// rejected so every file this writes is one `load_project_from_csv`
/// accepts.
pub fn save_project_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    if project.is_empty() {
        return Err(PersistenceError::InvalidData(
            "project has no tasks to export".into(),
        ));
    }
    super::validate_tasks(project.tasks())?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for task in project.tasks() {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a task list in the upload layout. The project takes its name from
/// the file stem, the way the original derived it from the upload name.
pub fn load_project_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let path = path.as_ref();
    let project_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "New Project".to_string());

    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        tasks.push(record?.into_task()?);
    }

    if tasks.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no tasks".into(),
        ));
    }

    super::validate_tasks(&tasks)?;

    let mut metadata = ProjectMetadata::default();
    metadata.project_name = project_name;
    Ok(Project::from_tasks(metadata, tasks))
}

fn format_option_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_option_i64(column: &str, input: &str) -> PersistenceResult<Option<i64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input.trim().parse::<i64>().map(Some).map_err(|e| {
        PersistenceError::InvalidData(format!("invalid {column} value '{input}': {e}"))
    })
}
