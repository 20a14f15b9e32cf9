//! End-to-end tests against the built binary and a live `jobly_test`
//! database. Run with `cargo build && cargo test -- --ignored`.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{admin_token, ensure_server};

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, std::process::id())
}

#[tokio::test]
#[ignore = "needs a running postgres with the jobly_test database"]
async fn health_endpoint_responds() -> Result<()> {
    let server = ensure_server().await?;
    let res = reqwest::get(format!("{}/health", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running postgres with the jobly_test database"]
async fn company_and_job_lifecycle() -> Result<()> {
    let server = ensure_server().await?;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let handle = unique("co");

    let res = client
        .post(format!("{}/companies", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "handle": handle,
            "name": format!("Company {}", handle),
            "description": "Desc",
            "numEmployees": 10,
            "logoUrl": "http://c.img"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["company"]["numEmployees"], 10);

    // Partial update touches only the supplied column
    let res = client
        .patch(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&admin)
        .json(&json!({ "numEmployees": 25 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["company"]["numEmployees"], 25);
    assert_eq!(body["company"]["description"], "Desc");

    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "title": "Engineer", "salary": 100, "equity": "0.1", "companyHandle": handle }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let job_id = body["job"]["id"].as_i64().expect("job id");

    let res = client
        .get(format!("{}/companies?name={}&minEmployees=20", server.base_url, handle))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["companies"].as_array().map(Vec::len), Some(1));

    let res = client.get(format!("{}/companies/{}", server.base_url, handle)).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["company"]["jobs"][0]["id"], job_id);

    let res = client
        .delete(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["deleted"], handle.as_str());

    // Jobs go with their company
    let res = client.get(format!("{}/jobs/{}", server.base_url, job_id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running postgres with the jobly_test database"]
async fn user_register_login_update() -> Result<()> {
    let server = ensure_server().await?;
    let client = reqwest::Client::new();
    let username = unique("user");

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "username": username,
            "password": "password",
            "firstName": "First",
            "lastName": "Last",
            "email": "user@email.com"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "username": username,
            "password": "password",
            "firstName": "First",
            "lastName": "Last",
            "email": "user@email.com"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/auth/token", server.base_url))
        .json(&json!({ "username": username, "password": "wrong-pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/auth/token", server.base_url))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().expect("token").to_string();

    let res = client
        .patch(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "New", "password": "new-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user"]["firstName"], "New");
    assert_eq!(body["user"]["lastName"], "Last");
    assert!(body["user"].get("password").is_none());

    // New password is hashed and usable
    let res = client
        .post(format!("{}/auth/token", server.base_url))
        .json(&json!({ "username": username, "password": "new-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
