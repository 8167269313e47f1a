//! Persistence layer: SQLite-backed document and account stores.

pub mod project_store;
pub mod user_store;

pub use project_store::{ProjectStore, ProjectStoreError};
pub use user_store::{User, UserStore, UserStoreError};
