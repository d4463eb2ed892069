use super::{PersistenceError, PersistenceResult, ProjectStore};
use crate::metadata::ProjectMetadata;
use crate::project::Project;
use crate::task::{DEFAULT_STATUS, Task};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Multi-project store over the original application's two-table schema.
/// Task rows keep an explicit position so load returns input order.
pub struct SqliteProjectStore {
    connection: Mutex<Connection>,
}

impl SqliteProjectStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                start_date TEXT
            );
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                task_id_str TEXT NOT NULL,
                description TEXT NOT NULL,
                predecessors TEXT,
                duration INTEGER NOT NULL,
                status TEXT DEFAULT 'Not Started',
                es INTEGER,
                ef INTEGER,
                ls INTEGER,
                lf INTEGER,
                total_float INTEGER,
                is_critical INTEGER
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn project_id(tx: &rusqlite::Transaction, name: &str) -> PersistenceResult<Option<i64>> {
        let mut stmt = tx.prepare("SELECT id FROM projects WHERE name = ?1")?;
        Ok(stmt.query_row(params![name], |row| row.get(0)).optional()?)
    }
}

impl ProjectStore for SqliteProjectStore {
    fn save_project(&self, project: &Project) -> PersistenceResult<()> {
        super::validate_tasks(project.tasks())?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        let start_date = project
            .metadata()
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string());
        tx.execute(
            "INSERT INTO projects (name, start_date) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET start_date = excluded.start_date",
            params![project.project_name(), start_date],
        )?;
        let project_id = Self::project_id(&tx, project.project_name())?
            .ok_or(PersistenceError::NotFound)?;

        // Replace the project's tasks wholesale, like the original import.
        tx.execute(
            "DELETE FROM tasks WHERE project_id = ?1",
            params![project_id],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (project_id, position, task_id_str, description,
                     predecessors, duration, status, es, ef, ls, lf, total_float, is_critical)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for (position, task) in project.tasks().iter().enumerate() {
                stmt.execute(params![
                    project_id,
                    position as i64,
                    task.id,
                    task.description,
                    task.predecessors.join(","),
                    task.duration_days,
                    task.status,
                    task.early_start,
                    task.early_finish,
                    task.late_start,
                    task.late_finish,
                    task.total_float,
                    task.is_critical,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_project(&self, name: &str) -> PersistenceResult<Option<Project>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT id, start_date FROM projects WHERE name = ?1")?;
        let header: Option<(i64, Option<String>)> = stmt
            .query_row(params![name], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        let Some((project_id, start_date_raw)) = header else {
            return Ok(None);
        };

        let start_date = match start_date_raw {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                    PersistenceError::InvalidData(format!("invalid start_date '{raw}': {e}"))
                })?,
            ),
            None => None,
        };

        let mut stmt = conn.prepare(
            "SELECT task_id_str, description, predecessors, duration, status,
                    es, ef, ls, lf, total_float, is_critical
             FROM tasks WHERE project_id = ?1 ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![project_id], |row| {
            let mut task = Task::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(3)?,
            );
            let predecessors: Option<String> = row.get(2)?;
            task.predecessors = predecessors
                .map(|raw| super::split_predecessors(&raw))
                .unwrap_or_default();
            task.status = row
                .get::<_, Option<String>>(4)?
                .unwrap_or_else(|| DEFAULT_STATUS.to_string());
            task.early_start = row.get(5)?;
            task.early_finish = row.get(6)?;
            task.late_start = row.get(7)?;
            task.late_finish = row.get(8)?;
            task.total_float = row.get(9)?;
            task.is_critical = row.get(10)?;
            Ok(task)
        })?;

        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        super::validate_tasks(&tasks)?;

        let metadata = ProjectMetadata {
            project_name: name.to_string(),
            start_date,
        };
        Ok(Some(Project::from_tasks(metadata, tasks)))
    }

    fn list_projects(&self) -> PersistenceResult<Vec<String>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT name FROM projects ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for name in rows {
            names.push(name?);
        }
        Ok(names)
    }

    fn delete_project(&self, name: &str) -> PersistenceResult<bool> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        let Some(project_id) = Self::project_id(&tx, name)? else {
            tx.commit()?;
            return Ok(false);
        };
        tx.execute(
            "DELETE FROM tasks WHERE project_id = ?1",
            params![project_id],
        )?;
        tx.execute("DELETE FROM projects WHERE id = ?1", params![project_id])?;
        tx.commit()?;
        Ok(true)
    }
}
