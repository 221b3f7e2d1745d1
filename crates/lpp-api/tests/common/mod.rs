use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lpp_api::{config::Environment, router, state::ApiState};
use lpp_scoring::PolicyTable;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Builds an `ApiState` without reading `POLICY_FILE` or any other variable
pub struct TestStateBuilder {
    policies: PolicyTable,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            policies: PolicyTable::builtin(),
        }
    }

    /// Use `policies` instead of the built-in presets
    pub fn policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState::with_policies(self.policies, Environment::Development)
    }
}

/// Drives the API router in-process
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn with_state(state: ApiState) -> Self {
        Self {
            router: router::router().with_state(state),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes()
            .to_vec();

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, payload: &T) -> TestResponse {
        let json = serde_json::to_string(payload).expect("payload should serialize");
        self.send(Method::POST, uri, Some(json)).await
    }

    /// POST a body verbatim, e.g. to exercise malformed JSON
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|err| panic!("invalid JSON ({err}): {}", self.text()))
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(self.status, expected, "body: {}", self.text());
    }
}
