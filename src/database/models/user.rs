use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::map_constraint;
use crate::auth::{hash_password, verify_password, AuthError};
use crate::database::manager::DatabaseError;
use crate::database::sql::{bind_param_query_as, sql_for_partial_update, ColumnNames, PartialUpdate, SqlValue, UpdateData};
use crate::schemas::UserNew;

/// Request field names that differ from their column
const COLUMN_NAMES: &ColumnNames = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

const COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// A user as exposed by the API; the password hash never leaves the model
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserWithJobs {
    #[serde(flatten)]
    pub user: User,
    /// Ids of jobs applied for
    pub jobs: Vec<i32>,
}

#[derive(FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

impl User {
    /// Fails with `InvalidCredentials` for an unknown user or a wrong password
    pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {COLUMNS}, password FROM users WHERE username = $1");
        let found = sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = found {
            if verify_password(password, &row.password).await? {
                return Ok(row.user);
            }
        }

        tracing::warn!("Failed login for user '{}'", username);
        Err(AuthError::InvalidCredentials.into())
    }

    /// Fails with `Duplicate` if the username is taken
    pub async fn register(pool: &PgPool, new: &UserNew) -> Result<User, DatabaseError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(&new.username)
            .fetch_optional(pool)
            .await?;
        if existing.is_some() {
            return Err(DatabaseError::Duplicate(format!("Duplicate username: {}", new.username)));
        }

        let hashed = hash_password(&new.password).await?;
        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.username)
            .bind(&hashed)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.email)
            .bind(new.is_admin)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || format!("Duplicate username: {}", new.username),
                    || format!("No user: {}", new.username),
                )
            })?;

        tracing::info!("Registered user {} (admin: {})", user.username, user.is_admin);
        Ok(user)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM users ORDER BY username");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, username: &str) -> Result<UserWithJobs, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))?;

        let jobs = sqlx::query_scalar::<_, i32>(
            "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
        )
        .bind(username)
        .fetch_all(pool)
        .await?;

        Ok(UserWithJobs { user, jobs })
    }

    /// Partial update; a supplied password is hashed before it is stored
    pub async fn update(pool: &PgPool, username: &str, data: &UpdateData) -> Result<User, DatabaseError> {
        let mut data = data.clone();
        if let Some(SqlValue::Text(password)) = data.get("password") {
            let hashed = hash_password(password).await?;
            data.insert("password", hashed);
        }

        let PartialUpdate { set_cols, values } = sql_for_partial_update(&data, COLUMN_NAMES)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {COLUMNS}",
            set_cols,
            values.len() + 1
        );

        let mut q = sqlx::query_as::<_, User>(&sql);
        for v in values.iter() {
            q = bind_param_query_as(q, v);
        }
        q.bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))
    }

    pub async fn remove(pool: &PgPool, username: &str) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, String>("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))
    }

    /// Record an application; both the job and the user must exist
    pub async fn apply_to_job(pool: &PgPool, username: &str, job_id: i32) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", job_id)))?;

        sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))?;

        sqlx::query("INSERT INTO applications (job_id, username) VALUES ($1, $2)")
            .bind(job_id)
            .bind(username)
            .execute(pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || format!("Already applied to job: {}", job_id),
                    || format!("No job: {}", job_id),
                )
            })?;

        tracing::debug!("{} applied to job {}", username, job_id);
        Ok(())
    }
}
