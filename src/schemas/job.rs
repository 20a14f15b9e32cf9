use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::database::sql::UpdateData;
use crate::error::ApiError;

/// Equity is a fraction between 0 and 1 inclusive, sent as a string
static EQUITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0(\.\d+)?|1(\.0+)?)$").expect("equity pattern compiles"));

pub fn parse_equity(value: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(value).map_err(|_| ApiError::bad_request(format!("Invalid equity: {}", value)))
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobNew {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub salary: Option<i32>,
    #[validate(regex(path = *EQUITY_RE, message = "must be a number between 0 and 1"))]
    pub equity: Option<String>,
    #[validate(length(min = 1, max = 25, message = "must be 1 to 25 characters"))]
    pub company_handle: String,
}

impl JobNew {
    pub fn equity_decimal(&self) -> Result<Option<Decimal>, ApiError> {
        self.equity.as_deref().map(parse_equity).transpose()
    }
}

/// Neither the id nor the owning company can be changed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub salary: Option<i32>,
    #[validate(regex(path = *EQUITY_RE, message = "must be a number between 0 and 1"))]
    pub equity: Option<String>,
}

impl TryFrom<JobUpdate> for UpdateData {
    type Error = ApiError;

    fn try_from(body: JobUpdate) -> Result<Self, Self::Error> {
        let equity = body.equity.as_deref().map(parse_equity).transpose()?;
        Ok(UpdateData::new()
            .set_opt("title", body.title)
            .set_opt("salary", body.salary)
            .set_opt("equity", equity))
    }
}
