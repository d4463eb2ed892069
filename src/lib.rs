pub mod calculations;
pub mod graph;
pub mod metadata;
pub mod persistence;
pub mod project;
pub mod task;
pub mod validation;

pub use graph::TaskGraph;
pub use metadata::ProjectMetadata;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteProjectStore;
pub use persistence::{
    PersistenceError, ProjectStore, load_project_from_csv, load_project_from_json,
    save_project_to_csv, save_project_to_json, split_predecessors,
};
pub use project::{Project, ProjectError, RefreshSummary, TaskDates};
pub use task::Task;
pub use validation::{ValidationError, ValidationReport, validate_tasks};
