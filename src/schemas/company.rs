use serde::Deserialize;
use validator::Validate;

use crate::database::sql::UpdateData;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyNew {
    #[validate(length(min = 1, max = 25, message = "must be 1 to 25 characters"))]
    pub handle: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "must be a valid URL"))]
    pub logo_url: Option<String>,
}

/// The handle is the primary key and cannot be changed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "must be a valid URL"))]
    pub logo_url: Option<String>,
}

impl From<CompanyUpdate> for UpdateData {
    fn from(body: CompanyUpdate) -> Self {
        UpdateData::new()
            .set_opt("name", body.name)
            .set_opt("description", body.description)
            .set_opt("numEmployees", body.num_employees)
            .set_opt("logoUrl", body.logo_url)
    }
}
