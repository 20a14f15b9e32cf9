use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::company::Company;
use super::map_constraint;
use crate::database::manager::DatabaseError;
use crate::database::sql::{bind_param_query_as, sql_for_partial_update, ColumnNames, PartialUpdate, UpdateData};
use crate::filter::JobFilter;
use crate::schemas::JobNew;

/// Job request fields already match their columns
const COLUMN_NAMES: &ColumnNames = &[];

const COLUMNS: &str = "id, title, salary, equity, company_handle";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// Row of `GET /jobs`, carrying the company name
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithCompany {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

impl Job {
    /// Fails with `NotFound` when the company does not exist
    pub async fn create(pool: &PgPool, new: &JobNew, equity: Option<Decimal>) -> Result<Job, DatabaseError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&new.title)
            .bind(new.salary)
            .bind(equity)
            .bind(&new.company_handle)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || format!("Duplicate job: {}", new.title),
                    || format!("No company: {}", new.company_handle),
                )
            })?;

        tracing::info!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobListing>, DatabaseError> {
        let where_sql = filter.to_where_sql()?;
        let sql = format!(
            "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
             FROM jobs AS j LEFT JOIN companies AS c ON c.handle = j.company_handle \
             {} ORDER BY j.title",
            where_sql.query
        );

        let mut q = sqlx::query_as::<_, JobListing>(&sql);
        for p in where_sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<JobWithCompany, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        let company = sqlx::query_as::<_, Company>(
            "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1",
        )
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await?;

        Ok(JobWithCompany {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Partial update; fails with `NoData` when `data` is empty
    pub async fn update(pool: &PgPool, id: i32, data: &UpdateData) -> Result<Job, DatabaseError> {
        let PartialUpdate { set_cols, values } = sql_for_partial_update(data, COLUMN_NAMES)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {COLUMNS}",
            set_cols,
            values.len() + 1
        );

        let mut q = sqlx::query_as::<_, Job>(&sql);
        for v in values.iter() {
            q = bind_param_query_as(q, v);
        }
        q.bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }
}
