use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.rootly.com";
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

#[async_trait]
pub trait RootlyApi: Send + Sync {
    /// Issues a single GET and returns the decoded JSON body of a successful response.
    async fn get(&self, url: Url, token: &str) -> Result<Value, AppError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpRootlyClient {
    client: Client,
}

impl HttpRootlyClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl RootlyApi for HttpRootlyClient {
    async fn get(&self, url: Url, token: &str) -> Result<Value, AppError> {
        debug!(url = %url, "calling rootly api");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .send()
            .await
            .map_err(|err| AppError::internal(format!("rootly request failed: {err}")))?;

        let status = response.status();
        // hyper does not keep the reason phrase from the wire, so the text is the canonical
        // phrase for the code (empty for unregistered codes).
        if !status.is_success() {
            return Err(AppError::upstream(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| AppError::internal(format!("failed to read rootly response: {err}")))?;

        serde_json::from_slice(&body)
            .map_err(|err| AppError::internal(format!("rootly response is not json: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn url(server: &MockServer, suffix: &str) -> Url {
        Url::parse(&format!("{}{suffix}", server.uri())).expect("valid mock url")
    }

    #[tokio::test]
    async fn sends_bearer_token_and_json_api_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/incidents"))
            .and(query_param("page[size]", "10"))
            .and(header("Authorization", "Bearer rootly-token"))
            .and(header("Content-Type", JSON_API_CONTENT_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let body = HttpRootlyClient::new()
            .get(url(&server, "/v1/incidents?page[size]=10"), "rootly-token")
            .await
            .expect("successful call");

        assert_eq!(body, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn non_success_status_maps_to_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/teams"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = HttpRootlyClient::new()
            .get(url(&server, "/v1/teams"), "rootly-token")
            .await
            .expect_err("500 must fail");

        match error {
            AppError::Upstream {
                status,
                status_text,
            } => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_relayed_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/alerts/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let error = HttpRootlyClient::new()
            .get(url(&server, "/v1/alerts/missing"), "rootly-token")
            .await
            .expect_err("404 must fail");

        assert_eq!(error.to_string(), "Rootly API error: 404 - Not Found");
    }

    #[tokio::test]
    async fn unregistered_status_has_no_reason_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/teams"))
            .respond_with(ResponseTemplate::new(599))
            .mount(&server)
            .await;

        let error = HttpRootlyClient::new()
            .get(url(&server, "/v1/teams"), "rootly-token")
            .await
            .expect_err("599 must fail");

        assert_eq!(error.to_string(), "Rootly API error: 599 - ");
    }

    #[tokio::test]
    async fn non_json_success_body_is_internal_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let error = HttpRootlyClient::new()
            .get(url(&server, "/v1/users/me"), "rootly-token")
            .await
            .expect_err("html body must fail");

        assert!(matches!(error, AppError::Internal { .. }));
    }
}
