pub mod company;
pub mod job;
pub mod user;

pub use company::{Company, CompanyWithJobs};
pub use job::{Job, JobListing, JobSummary, JobWithCompany};
pub use user::{User, UserWithJobs};

use super::manager::DatabaseError;

/// Turn constraint violations into client-facing errors, leave the rest as-is
fn map_constraint(err: sqlx::Error, duplicate: impl FnOnce() -> String, missing: impl FnOnce() -> String) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DatabaseError::Duplicate(duplicate());
        }
        if db_err.is_foreign_key_violation() {
            return DatabaseError::NotFound(missing());
        }
    }
    DatabaseError::Sqlx(err)
}
