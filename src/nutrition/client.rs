//! HTTP adapter for the nutrition source.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{facts_from_response, NutritionError, NutritionFacts, NutritionSource};
use crate::config::NutritionConfig;

/// Header carrying the nutrition source API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Nutrition source backed by an HTTP lookup endpoint.
///
/// One GET per lookup. No retries, no caching, and the transport's default
/// timeout.
#[derive(Debug, Clone)]
pub struct NutritionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl NutritionClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &NutritionConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl NutritionSource for NutritionClient {
    async fn lookup(&self, item: &str) -> Result<NutritionFacts, NutritionError> {
        let mut request = self.http.get(&self.api_url).query(&[("query", item)]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Nutrition request failed: {}", e);
            NutritionError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NutritionError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            tracing::warn!("Nutrition source returned {}: {}", status, body);
            return Err(NutritionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to parse nutrition response: {}", e);
            NutritionError::Parse(e.to_string())
        })?;
        tracing::debug!("Nutrition response for '{}': {}", item, parsed);

        facts_from_response(&parsed).inspect_err(|e| {
            tracing::warn!("Unusable nutrition response for '{}': {}", item, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_lookup_sends_query_and_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/nutrition")
                    .query_param("query", "banana")
                    .header("X-Api-Key", "test-key");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!([
                        {"name": "banana", "calories": 89.0, "serving_size_g": 100.0}
                    ]));
            })
            .await;

        let client = NutritionClient::new(server.url("/v1/nutrition"), Some("test-key".into()));
        let facts = client.lookup("banana").await.unwrap();

        mock.assert_async().await;
        assert_eq!(facts, NutritionFacts::new(89.0, 100.0));
    }

    #[tokio::test]
    async fn test_lookup_encodes_free_text_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/nutrition")
                    .query_param("query", "1 cup brown rice & beans");
                then.status(200)
                    .json_body(json!([{"calories": 216.0, "serving_size_g": 195.0}]));
            })
            .await;

        let client = NutritionClient::new(server.url("/v1/nutrition"), None);
        let facts = client.lookup("1 cup brown rice & beans").await.unwrap();

        mock.assert_async().await;
        assert_eq!(facts.serving_size_g, 195.0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_propagated() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/nutrition");
                then.status(401).body("{\"error\": \"Invalid API Key.\"}");
            })
            .await;

        let client = NutritionClient::new(server.url("/v1/nutrition"), Some("bad".into()));
        let result = client.lookup("banana").await;

        match result {
            Err(NutritionError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API Key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/nutrition");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let client = NutritionClient::new(server.url("/v1/nutrition"), None);
        let result = client.lookup("banana").await;

        assert!(matches!(result, Err(NutritionError::Parse(_))));
    }

    #[tokio::test]
    async fn test_empty_result_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/nutrition");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = NutritionClient::new(server.url("/v1/nutrition"), None);
        let result = client.lookup("unobtainium").await;

        assert!(matches!(result, Err(NutritionError::InvalidResponse)));
    }

    #[tokio::test]
    async fn test_unreachable_source_is_transport_error() {
        let client = NutritionClient::new("http://127.0.0.1:1/v1/nutrition", None);
        let result = client.lookup("banana").await;

        assert!(matches!(result, Err(NutritionError::Transport(_))));
    }

    #[test]
    fn test_from_config() {
        let config = NutritionConfig {
            api_url: "http://localhost:9000/nutrition".to_string(),
            api_key: Some("k".to_string()),
        };
        let client = NutritionClient::from_config(&config);

        assert_eq!(client.api_url, "http://localhost:9000/nutrition");
        assert_eq!(client.api_key.as_deref(), Some("k"));
    }
}
