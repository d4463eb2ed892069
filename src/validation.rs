use crate::graph::TaskGraph;
use crate::task::Task;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Structural defects in a task set. Every variant carries enough context
/// (id, row index) for a human-readable message; all are recoverable by
/// fixing the input and re-submitting. The engine never auto-corrects.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyIdentifier {
        row: usize,
    },
    DuplicateIdentifier {
        id: String,
        rows: Vec<usize>,
    },
    DanglingReference {
        task_id: String,
        row: usize,
        missing: String,
    },
    CyclicDependency {
        task_ids: Vec<String>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyIdentifier { row } => {
                write!(f, "row {row}: task id is empty")
            }
            ValidationError::DuplicateIdentifier { id, rows } => {
                let rows = rows
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "duplicate task id '{id}' in rows {rows}")
            }
            ValidationError::DanglingReference {
                task_id,
                row,
                missing,
            } => write!(
                f,
                "task '{task_id}' (row {row}) references unknown predecessor '{missing}'"
            ),
            ValidationError::CyclicDependency { task_ids } => {
                write!(
                    f,
                    "cyclic dependency involving tasks: {}",
                    task_ids.join(", ")
                )
            }
        }
    }
}

/// Consolidated validation outcome: every cheap violation found in one pass,
/// or the cycle found once the cheap checks are clean.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{messages}")
    }
}

impl std::error::Error for ValidationReport {}

/// Check the task set before any scheduling computation runs.
///
/// Empty ids, duplicates (after normalization), and dangling predecessor
/// references are all collected into a single report. The cycle check only
/// runs on a task set that passed those, so a set that validates is
/// guaranteed to admit a topological ordering and a well-defined schedule.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationReport> {
    let mut errors = Vec::new();

    let mut rows_by_id: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (row, task) in tasks.iter().enumerate() {
        let id = task.normalized_id();
        if id.is_empty() {
            errors.push(ValidationError::EmptyIdentifier { row });
        } else {
            rows_by_id.entry(id).or_default().push(row);
        }
    }

    for (id, rows) in &rows_by_id {
        if rows.len() > 1 {
            errors.push(ValidationError::DuplicateIdentifier {
                id: id.clone(),
                rows: rows.clone(),
            });
        }
    }

    let known_ids: HashSet<&str> = rows_by_id.keys().map(String::as_str).collect();
    for (row, task) in tasks.iter().enumerate() {
        for pred in task.normalized_predecessors() {
            if !known_ids.contains(pred.as_str()) {
                errors.push(ValidationError::DanglingReference {
                    task_id: task.id.trim().to_string(),
                    row,
                    missing: pred,
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(ValidationReport { errors });
    }

    if let Some(task_ids) = TaskGraph::build(tasks).find_cycle() {
        errors.push(ValidationError::CyclicDependency { task_ids });
        return Err(ValidationReport { errors });
    }

    Ok(())
}
