//! Account service for farmer registration and login

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use shared::models::Farmer;
use shared::validation::{validate_email, validate_name, validate_password};

/// Farmer account service
#[derive(Clone)]
pub struct FarmerService {
    db: SqlitePool,
}

/// Farmer row as stored in SQLite
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl FarmerService {
    /// Create a new FarmerService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Register a new farmer account.
    ///
    /// The email must be unique; the UNIQUE constraint on the table is
    /// the source of truth and its violation maps to `DuplicateEmail`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Farmer> {
        validate_name(name).map_err(AppError::Validation)?;
        validate_email(email).map_err(AppError::Validation)?;
        validate_password(password).map_err(AppError::Validation)?;

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?;

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            INSERT INTO farmers (name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name.trim())
        .bind(email)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateEmail
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into())
    }

    /// Authenticate a farmer with email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller: both are `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(
            "SELECT id, name, email, password_hash, created_at FROM farmers WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &row.password_hash)
            .map_err(|e| anyhow::anyhow!("Password verification failed: {}", e))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(row.into())
    }
}
