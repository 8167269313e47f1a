//! Project Storage
//! Mission: Persist project documents and their per-model record lists

use crate::models::{ModelSpec, Project, ProjectData, Record};
use crate::templates::ProjectTemplate;
use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;
use uuid::Uuid;

/// Typed store failures, so callers (and tests) can distinguish cause while
/// the wire response stays generic.
#[derive(Debug)]
pub enum ProjectStoreError {
    /// No project with the given id.
    ProjectNotFound,
    /// Index out of bounds for the model's record list.
    RecordNotFound,
    /// Anything else: connectivity, corrupt document, serialization.
    Db(anyhow::Error),
}

impl std::fmt::Display for ProjectStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStoreError::ProjectNotFound => write!(f, "Project not found"),
            ProjectStoreError::RecordNotFound => write!(f, "Record not found"),
            ProjectStoreError::Db(err) => write!(f, "Store error: {}", err),
        }
    }
}

impl std::error::Error for ProjectStoreError {}

impl From<rusqlite::Error> for ProjectStoreError {
    fn from(err: rusqlite::Error) -> Self {
        ProjectStoreError::Db(err.into())
    }
}

impl From<serde_json::Error> for ProjectStoreError {
    fn from(err: serde_json::Error) -> Self {
        ProjectStoreError::Db(err.into())
    }
}

/// Project document store with SQLite backend.
///
/// Documents are stored whole: `models` and `data` are JSON text columns and
/// every mutation re-saves the full `data` payload. Concurrent writers to the
/// same project race; the last successful save wins.
pub struct ProjectStore {
    db_path: String,
}

impl ProjectStore {
    /// Create a new project store and initialize the schema.
    pub fn new(db_path: &str) -> anyhow::Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> anyhow::Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                models TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create projects table")?;

        Ok(())
    }

    fn open(&self) -> Result<Connection, ProjectStoreError> {
        Connection::open(&self.db_path).map_err(Into::into)
    }

    /// Persist a new project from a template, with `data` initialized empty.
    pub fn create(&self, template: ProjectTemplate) -> Result<Project, ProjectStoreError> {
        let now = Utc::now().to_rfc3339();
        let project = Project {
            id: Uuid::new_v4(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            models: template.models,
            data: ProjectData::new(),
            created_at: now.clone(),
            updated_at: now,
        };

        let conn = self.open()?;
        conn.execute(
            "INSERT INTO projects (id, name, description, models, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.id.to_string(),
                project.name,
                project.description,
                serde_json::to_string(&project.models)?,
                serde_json::to_string(&project.data)?,
                project.created_at,
                project.updated_at,
            ],
        )?;

        info!("📦 Created project: {} ({})", project.name, project.id);

        Ok(project)
    }

    /// Read the whole document by id.
    pub fn get_by_id(&self, id: &Uuid) -> Result<Project, ProjectStoreError> {
        let conn = self.open()?;

        let row = conn
            .query_row(
                "SELECT id, name, description, models, data, created_at, updated_at
                 FROM projects WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let (id_str, name, description, models_json, data_json, created_at, updated_at) =
            row.ok_or(ProjectStoreError::ProjectNotFound)?;

        let id = Uuid::parse_str(&id_str)
            .map_err(|e| ProjectStoreError::Db(anyhow::Error::new(e).context("Corrupt project id")))?;
        let models: Vec<ModelSpec> = serde_json::from_str(&models_json)?;
        let data: ProjectData = serde_json::from_str(&data_json)?;

        Ok(Project {
            id,
            name,
            description,
            models,
            data,
            created_at,
            updated_at,
        })
    }

    /// Append a record to a model's list, creating the list if absent.
    /// Returns the full updated list for that model.
    pub fn append_record(
        &self,
        id: &Uuid,
        model: &str,
        record: Record,
    ) -> Result<Vec<Record>, ProjectStoreError> {
        let mut project = self.get_by_id(id)?;
        let records = project.data.append(model, record).to_vec();
        self.save_data(&project)?;
        Ok(records)
    }

    /// Records for a model; empty list if the model was never written.
    /// Errors only for a missing project.
    pub fn list_records(&self, id: &Uuid, model: &str) -> Result<Vec<Record>, ProjectStoreError> {
        let project = self.get_by_id(id)?;
        Ok(project.data.records(model).to_vec())
    }

    /// Shallow-merge `patch` onto the record at `index` and persist.
    /// `index` is a zero-based position into the current list, not a stable
    /// identifier.
    pub fn update_record(
        &self,
        id: &Uuid,
        model: &str,
        index: usize,
        patch: Record,
    ) -> Result<Vec<Record>, ProjectStoreError> {
        let mut project = self.get_by_id(id)?;
        let records = project
            .data
            .merge_at(model, index, patch)
            .ok_or(ProjectStoreError::RecordNotFound)?
            .to_vec();
        self.save_data(&project)?;
        Ok(records)
    }

    /// Remove the record at `index`, shifting later records down, and persist.
    pub fn delete_record(
        &self,
        id: &Uuid,
        model: &str,
        index: usize,
    ) -> Result<Vec<Record>, ProjectStoreError> {
        let mut project = self.get_by_id(id)?;
        let records = project
            .data
            .remove_at(model, index)
            .ok_or(ProjectStoreError::RecordNotFound)?
            .to_vec();
        self.save_data(&project)?;
        Ok(records)
    }

    /// Save the full data payload back. Last successful save wins.
    fn save_data(&self, project: &Project) -> Result<(), ProjectStoreError> {
        let conn = self.open()?;
        conn.execute(
            "UPDATE projects SET data = ?2, updated_at = ?3 WHERE id = ?1",
            params![
                project.id.to_string(),
                serde_json::to_string(&project.data)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}
