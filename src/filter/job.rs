use serde::Deserialize;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterOp, SqlResult};

/// Query-string filters for `GET /jobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if matches!(&self.title, Some(title) if title.is_empty()) {
            return Err(FilterError::EmptyValue("title"));
        }
        if let Some(min) = self.min_salary {
            if min < 0 {
                return Err(FilterError::BelowMinimum { field: "minSalary", min: 0 });
            }
        }
        Ok(())
    }

    /// `WHERE` clause over `jobs AS j`; `hasEquity=false` applies no equity filter
    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        self.validate()?;

        let mut filter = FilterWhere::new();
        if let Some(min) = self.min_salary {
            filter.condition("j.salary", FilterOp::Gte, min);
        }
        if self.has_equity == Some(true) {
            filter.literal("j.equity > 0");
        }
        if let Some(title) = &self.title {
            filter.condition("j.title", FilterOp::ILike, format!("%{}%", title));
        }
        Ok(filter.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::sql::SqlValue;

    #[test]
    fn all_filters() {
        let filter = JobFilter {
            title: Some("eng".to_string()),
            min_salary: Some(150),
            has_equity: Some(true),
        };
        let result = filter.to_where_sql().unwrap();
        assert_eq!(result.query, "WHERE j.salary >= $1 AND j.equity > 0 AND j.title ILIKE $2");
        assert_eq!(result.params, vec![SqlValue::Int(150), SqlValue::from("%eng%")]);
    }

    #[test]
    fn has_equity_false_is_ignored() {
        let filter = JobFilter { has_equity: Some(false), ..Default::default() };
        assert_eq!(filter.to_where_sql().unwrap().query, "");
    }

    #[test]
    fn negative_salary_is_rejected() {
        let filter = JobFilter { min_salary: Some(-5), ..Default::default() };
        assert!(filter.to_where_sql().is_err());
    }
}
