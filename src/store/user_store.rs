//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use anyhow::Context;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// User account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub plan: String,
    pub created_at: String,
}

#[derive(Debug)]
pub enum UserStoreError {
    /// Email already registered.
    DuplicateEmail,
    Db(anyhow::Error),
}

impl std::fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStoreError::DuplicateEmail => write!(f, "Email already registered"),
            UserStoreError::Db(err) => write!(f, "Store error: {}", err),
        }
    }
}

impl std::error::Error for UserStoreError {}

impl From<rusqlite::Error> for UserStoreError {
    fn from(err: rusqlite::Error) -> Self {
        UserStoreError::Db(err.into())
    }
}

/// Canonical email form used for uniqueness: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User storage with SQLite backend.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema.
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
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                plan TEXT NOT NULL DEFAULT 'free',
                created_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create users table")?;

        Ok(())
    }

    /// Create a new user on the default `free` plan. The password is hashed
    /// with bcrypt before it touches the database.
    pub fn create_user(&self, email: &str, password: &str) -> Result<User, UserStoreError> {
        let email = normalize_email(email);

        if self.find_by_email(&email).map_err(UserStoreError::Db)?.is_some() {
            return Err(UserStoreError::DuplicateEmail);
        }

        let password_hash = hash(password, DEFAULT_COST)
            .context("Failed to hash password")
            .map_err(UserStoreError::Db)?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            plan: "free".to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path).map_err(|e| UserStoreError::Db(e.into()))?;
        let inserted = conn.execute(
            "INSERT INTO users (id, email, password_hash, plan, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.email,
                user.password_hash,
                user.plan,
                user.created_at,
            ],
        );

        match inserted {
            Ok(_) => {}
            // Unique constraint can still trip under a concurrent register.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(UserStoreError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        }

        info!("✅ Registered user: {}", user.email);

        Ok(user)
    }

    /// Look up a user by email (normalized before matching).
    pub fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let email = normalize_email(email);
        let conn = Connection::open(&self.db_path)?;

        let user = conn
            .query_row(
                "SELECT id, email, password_hash, plan, created_at
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        match user {
            Some((id, email, password_hash, plan, created_at)) => Ok(Some(User {
                id: Uuid::parse_str(&id).context("Corrupt user id")?,
                email,
                password_hash,
                plan,
                created_at,
            })),
            None => Ok(None),
        }
    }

    /// Verify credentials. `Some(user)` only when the email exists and the
    /// password matches; unknown email and wrong password are
    /// indistinguishable to the caller.
    pub fn verify_credentials(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        match self.find_by_email(email)? {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid.then_some(user))
            }
            None => Ok(None),
        }
    }
}
