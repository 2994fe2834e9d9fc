// Common test utilities for integration tests

use std::collections::HashMap;
use std::sync::Arc;

use hotel_backend::app_data::AppData;
use hotel_backend::config::{BootstrapSettings, EnvironmentProvider, SecretManager, connect, migrate_database};
use hotel_backend::stores::CredentialStore;
use hotel_backend::types::internal::AppRole;
use poem::http::{Method, StatusCode, Uri};
use poem::{Body, Endpoint, Request};
use serde_json::Value;

pub const TEST_PASSWORD: &str = "password123";

/// Fixed environment so tests never read or mutate the process env
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(extra: &[(&str, &str)]) -> Self {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_URL".to_string(), "sqlite::memory:".to_string());
        vars.insert("JWT_SECRET".to_string(), "integration-jwt-secret-0123456789abcdef".to_string());
        vars.insert("PEPPER".to_string(), "integration-pepper-0123".to_string());
        vars.insert(
            "REFRESH_TOKEN_SECRET".to_string(),
            "integration-refresh-secret-0123456789abc".to_string(),
        );
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        Self { vars }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// In-memory database with migrations applied, wrapped in AppData
pub async fn setup_app_data() -> Arc<AppData> {
    let env: Arc<dyn EnvironmentProvider + Send + Sync> = Arc::new(TestEnvironment::new(&[]));
    let settings = BootstrapSettings::from_env_provider(env.clone()).expect("settings");
    let secret_manager = SecretManager::init_with_provider(env).expect("secrets");

    let db = connect(settings.database_url()).await.expect("connect");
    migrate_database(&db).await.expect("migrate");

    Arc::new(AppData::from_parts(db, settings, secret_manager))
}

/// Create a user holding `role` and return its id
pub async fn create_user(credential_store: &CredentialStore, email: &str, role: AppRole) -> String {
    credential_store
        .add_user_with_role(email, TEST_PASSWORD, Some("Integration User".to_string()), role, true)
        .await
        .expect("create user")
        .id
}

/// Send a request to the app and decode the JSON body
pub async fn send(
    app: &impl Endpoint,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(path.parse::<Uri>().expect("uri"))
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder.body(Body::from_json(body).expect("json body")),
        None => builder.finish(),
    };

    let resp = app.get_response(req).await;
    let status = resp.status();
    let text = resp.into_body().into_string().await.expect("body");
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, json)
}

/// Log in through the HTTP API and return the access token
pub async fn login(app: &impl Endpoint, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().expect("access_token").to_string()
}
