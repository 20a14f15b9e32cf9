use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::job::JobSummary;
use super::map_constraint;
use crate::database::manager::DatabaseError;
use crate::database::sql::{bind_param_query_as, sql_for_partial_update, ColumnNames, PartialUpdate, UpdateData};
use crate::filter::CompanyFilter;
use crate::schemas::CompanyNew;

/// Request field names that differ from their column
const COLUMN_NAMES: &ColumnNames = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

impl Company {
    /// Fails with `Duplicate` if the handle (or name) is taken
    pub async fn create(pool: &PgPool, new: &CompanyNew) -> Result<Company, DatabaseError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&new.handle)
            .fetch_optional(pool)
            .await?;
        if existing.is_some() {
            return Err(DatabaseError::Duplicate(format!("Duplicate company: {}", new.handle)));
        }

        let sql = format!(
            "INSERT INTO companies ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(&new.handle)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.num_employees)
            .bind(&new.logo_url)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || format!("Duplicate company: {}", new.name),
                    || format!("No company: {}", new.handle),
                )
            })?;

        tracing::info!("Created company {}", company.handle);
        Ok(company)
    }

    pub async fn find_all(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<Company>, DatabaseError> {
        let where_sql = filter.to_where_sql()?;
        let sql = format!("SELECT {COLUMNS} FROM companies {} ORDER BY name", where_sql.query);

        let mut q = sqlx::query_as::<_, Company>(&sql);
        for p in where_sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyWithJobs, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM companies WHERE handle = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, JobSummary>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Partial update; fails with `NoData` when `data` is empty
    pub async fn update(pool: &PgPool, handle: &str, data: &UpdateData) -> Result<Company, DatabaseError> {
        let PartialUpdate { set_cols, values } = sql_for_partial_update(data, COLUMN_NAMES)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COLUMNS}",
            set_cols,
            values.len() + 1
        );

        let mut q = sqlx::query_as::<_, Company>(&sql);
        for v in values.iter() {
            q = bind_param_query_as(q, v);
        }
        q.bind(handle)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || "Duplicate company name".to_string(),
                    || format!("No company: {}", handle),
                )
            })?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }
}
