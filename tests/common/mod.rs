use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use finance_tracker_server::{
    AppState,
    database::{self, DatabaseLocation},
    routes,
};
use tower::util::ServiceExt;

#[derive(Clone)]
pub struct TestConfig {
    pub temp_dir_path: String,
}

impl TestConfig {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let temp_dir_path = temp_dir.path().to_string_lossy().to_string();
        std::mem::forget(temp_dir);
        Ok(Self { temp_dir_path })
    }

    pub fn database(&self) -> DatabaseLocation {
        DatabaseLocation::Local(std::path::Path::new(&self.temp_dir_path).join("test.db"))
    }
}

pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub state: AppState,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let test_config = TestConfig::new()?;

    let db = database::connect(&test_config.database())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database: {}", e))?;

    let state = AppState::from_db(db);
    let router = routes::build_router(state.clone());

    Ok(TestApp { router, state })
}

#[allow(dead_code)]
pub fn lunch_payload() -> serde_json::Value {
    serde_json::json!({
        "amount": 50.0,
        "description": "Lunch",
        "date": "2025-07-15",
        "category": "Food",
        "type": "expense"
    })
}

/// Send a request with an optional JSON body and return status and body text.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> anyhow::Result<(StatusCode, String)> {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    raw_request(app, method, uri, body).await
}

#[allow(dead_code)]
pub async fn raw_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Body,
) -> anyhow::Result<(StatusCode, String)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .map_err(|e| anyhow::anyhow!("Failed to build request: {}", e))?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to execute request: {}", e))?;

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read response body: {}", e))?;
    let body_str = String::from_utf8(body.to_vec())?;

    Ok((status, body_str))
}

/// Create a transaction through the API and return the response JSON.
#[allow(dead_code)]
pub async fn create_transaction(
    app: &Router,
    payload: &serde_json::Value,
) -> anyhow::Result<serde_json::Value> {
    let (status, body) = request(app, "POST", "/transactions", Some(payload)).await?;
    anyhow::ensure!(
        status == StatusCode::CREATED,
        "create failed with {}: {}",
        status,
        body
    );
    Ok(serde_json::from_str(&body)?)
}
