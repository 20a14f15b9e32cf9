use crate::database::sql::SqlValue;

use super::types::{FilterOp, SqlResult};

/// Accumulates `AND`-joined conditions, numbering placeholders as they are added
pub struct FilterWhere {
    conditions: Vec<String>,
    params: Vec<SqlValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self {
            conditions: vec![],
            params: vec![],
            param_index: 0,
        }
    }

    /// `column` is trusted SQL; only `value` comes from the caller
    pub fn condition(&mut self, column: &str, op: FilterOp, value: impl Into<SqlValue>) -> &mut Self {
        self.param_index += 1;
        self.conditions
            .push(format!("{} {} ${}", column, op.as_sql(), self.param_index));
        self.params.push(value.into());
        self
    }

    /// A condition with no parameters, e.g. `equity > 0`
    pub fn literal(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// `WHERE ...` (or an empty string) plus the bound values
    pub fn to_sql(&self) -> SqlResult {
        let query = if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        };
        SqlResult {
            query,
            params: self.params.clone(),
        }
    }
}

impl Default for FilterWhere {
    fn default() -> Self {
        Self::new()
    }
}
