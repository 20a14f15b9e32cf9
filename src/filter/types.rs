use crate::database::sql::SqlValue;

/// Generated SQL text with its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Gte,
    Lte,
    ILike,
}

impl FilterOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::ILike => "ILIKE",
        }
    }
}
