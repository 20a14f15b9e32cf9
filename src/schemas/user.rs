use serde::Deserialize;
use validator::Validate;

use crate::database::sql::UpdateData;

/// Usernames are capped at the `users.username` column width (25)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserAuth {
    #[validate(length(min = 1, max = 25, message = "must be 1 to 25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 20, message = "must be 5 to 20 characters"))]
    pub password: String,
}

/// Self-service signup; never grants admin
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserRegister {
    #[validate(length(min = 1, max = 25, message = "must be 1 to 25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 20, message = "must be 5 to 20 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub last_name: String,
    #[validate(
        length(min = 6, max = 60, message = "must be 6 to 60 characters"),
        email(message = "must be a valid email address")
    )]
    pub email: String,
}

/// Admin-created user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserNew {
    #[validate(length(min = 1, max = 25, message = "must be 1 to 25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 20, message = "must be 5 to 20 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub last_name: String,
    #[validate(
        length(min = 6, max = 60, message = "must be 6 to 60 characters"),
        email(message = "must be a valid email address")
    )]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<UserRegister> for UserNew {
    fn from(body: UserRegister) -> Self {
        Self {
            username: body.username,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            is_admin: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[validate(length(min = 5, max = 20, message = "must be 5 to 20 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub last_name: Option<String>,
    #[validate(
        length(min = 6, max = 60, message = "must be 6 to 60 characters"),
        email(message = "must be a valid email address")
    )]
    pub email: Option<String>,
}

/// The password stays plain text here; `User::update` hashes it
impl From<UserUpdate> for UpdateData {
    fn from(body: UserUpdate) -> Self {
        UpdateData::new()
            .set_opt("password", body.password)
            .set_opt("firstName", body.first_name)
            .set_opt("lastName", body.last_name)
            .set_opt("email", body.email)
    }
}
