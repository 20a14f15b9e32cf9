use serde::Deserialize;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterOp, SqlResult};

/// Query-string filters for `GET /companies`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if matches!(&self.name, Some(name) if name.is_empty()) {
            return Err(FilterError::EmptyValue("name"));
        }
        if let Some(min) = self.min_employees {
            if min < 0 {
                return Err(FilterError::BelowMinimum { field: "minEmployees", min: 0 });
            }
        }
        if let Some(max) = self.max_employees {
            if max < 0 {
                return Err(FilterError::BelowMinimum { field: "maxEmployees", min: 0 });
            }
        }
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(FilterError::InvalidEmployeeRange);
            }
        }
        Ok(())
    }

    /// `WHERE` clause over the `companies` table; name matches case-insensitively anywhere
    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        self.validate()?;

        let mut filter = FilterWhere::new();
        if let Some(min) = self.min_employees {
            filter.condition("num_employees", FilterOp::Gte, min);
        }
        if let Some(max) = self.max_employees {
            filter.condition("num_employees", FilterOp::Lte, max);
        }
        if let Some(name) = &self.name {
            filter.condition("name", FilterOp::ILike, format!("%{}%", name));
        }
        Ok(filter.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::sql::SqlValue;

    #[test]
    fn no_filters_no_where() {
        let result = CompanyFilter::default().to_where_sql().unwrap();
        assert_eq!(result.query, "");
        assert!(result.params.is_empty());
    }

    #[test]
    fn all_filters() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let result = filter.to_where_sql().unwrap();
        assert_eq!(
            result.query,
            "WHERE num_employees >= $1 AND num_employees <= $2 AND name ILIKE $3"
        );
        assert_eq!(
            result.params,
            vec![SqlValue::Int(10), SqlValue::Int(500), SqlValue::from("%net%")]
        );
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(5),
            ..Default::default()
        };
        assert!(matches!(filter.to_where_sql(), Err(FilterError::InvalidEmployeeRange)));
    }

    #[test]
    fn negative_and_empty_values_are_rejected() {
        let filter = CompanyFilter { min_employees: Some(-1), ..Default::default() };
        assert!(matches!(filter.validate(), Err(FilterError::BelowMinimum { .. })));

        let filter = CompanyFilter { name: Some(String::new()), ..Default::default() };
        assert!(matches!(filter.validate(), Err(FilterError::EmptyValue("name"))));
    }
}
