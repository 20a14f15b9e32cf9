// Request body schemas
//
// Each body type deserializes with unknown fields rejected, then runs the
// rules declared with `#[derive(Validate)]`. Handlers receive it through the
// `ValidJson` extractor.

pub mod company;
pub mod job;
pub mod user;

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

pub use company::{CompanyNew, CompanyUpdate};
pub use job::{JobNew, JobUpdate};
pub use user::{UserAuth, UserNew, UserRegister, UserUpdate};

/// JSON body that has been deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
        validate_body(&value)?;
        Ok(ValidJson(value))
    }
}

/// Run the declared rules, reporting the first failure per field under its
/// JSON (camelCase) name
pub fn validate_body<T: Validate>(body: &T) -> Result<(), ApiError> {
    body.validate().map_err(|errors| {
        ApiError::validation_error("Invalid request body", Some(field_errors(&errors)))
    })
}

fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = match &first.message {
                Some(message) => message.to_string(),
                None => format!("failed {} check", first.code),
            };
            Some((json_name(&field), message))
        })
        .collect()
}

fn json_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Profile {
        #[validate(length(min = 1, max = 5, message = "must be 1 to 5 characters"))]
        first_name: String,
        #[validate(email(message = "must be a valid email address"))]
        email: String,
        #[validate(url)]
        logo_url: Option<String>,
    }

    #[test]
    fn field_names_use_json_casing() {
        assert_eq!(json_name("first_name"), "firstName");
        assert_eq!(json_name("num_employees"), "numEmployees");
        assert_eq!(json_name("email"), "email");
    }

    #[test]
    fn reports_declared_messages() {
        let body = Profile {
            first_name: String::new(),
            email: "not-an-email".to_string(),
            logo_url: Some("not-a-url".to_string()),
        };
        match validate_body(&body).unwrap_err() {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert_eq!(fields["firstName"], "must be 1 to 5 characters");
                assert_eq!(fields["email"], "must be a valid email address");
                assert_eq!(fields["logoUrl"], "failed url check");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn length_counts_characters() {
        let body = Profile {
            first_name: "héllo".to_string(),
            email: "user@example.com".to_string(),
            logo_url: None,
        };
        assert!(validate_body(&body).is_ok());
    }
}
