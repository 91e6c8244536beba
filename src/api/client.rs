use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::criteria::CriteriaDocument;

use super::error::ServiceError;
use super::types::{StatusReport, SubmitReceipt, TokenResponse};

/// Client-side surface of the scoring service.
///
/// Kept behind a trait so the workflow can be exercised against a mock
/// without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn authenticate(&self, username: &str, password: &str) -> Result<String>;

    /// Submit a criteria document, returning the request id that correlates
    /// all later calls.
    async fn upload_criteria(
        &self,
        token: &str,
        customer_id: &str,
        gls: &str,
        criteria: &CriteriaDocument,
    ) -> Result<SubmitReceipt>;

    /// Query the current processing status of a request.
    async fn get_status(&self, token: &str, request_id: &str) -> Result<StatusReport>;

    /// Fetch the result document for a completed request.
    async fn get_response(&self, token: &str, request_id: &str) -> Result<serde_json::Value>;
}

/// HTTP implementation of [`ScoringApi`] against a fixed base URL.
pub struct ScoringClient {
    client: Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Render a non-200 response as "HTTP <status>: <body>" for diagnostics.
/// The body is part of the service's error contract, so it is never dropped.
async fn failure_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("HTTP {}: {}", status, body)
}

#[async_trait]
impl ScoringApi for ScoringClient {
    #[tracing::instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/token", self.base_url);
        debug!("POST {} (credential exchange)...", url);

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send token request")?;

        if !response.status().is_success() {
            return Err(ServiceError::AuthenticationFailed(failure_body(response).await).into());
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        Ok(parsed.access_token)
    }

    #[tracing::instrument(skip(self, token, criteria))]
    async fn upload_criteria(
        &self,
        token: &str,
        customer_id: &str,
        gls: &str,
        criteria: &CriteriaDocument,
    ) -> Result<SubmitReceipt> {
        let url = format!("{}/upload_criteria", self.base_url);
        debug!("POST {} for customer {}...", url, customer_id);

        let response = self
            .client
            .post(&url)
            .query(&[("customerid", customer_id), ("GLS", gls)])
            .bearer_auth(token)
            .json(criteria)
            .send()
            .await
            .context("Failed to send criteria upload request")?;

        if !response.status().is_success() {
            return Err(ServiceError::SubmissionFailed(failure_body(response).await).into());
        }

        response
            .json()
            .await
            .context("Failed to parse upload response")
    }

    #[tracing::instrument(skip(self, token))]
    async fn get_status(&self, token: &str, request_id: &str) -> Result<StatusReport> {
        let url = format!("{}/get_status/{}", self.base_url, request_id);
        debug!("GET {}...", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send status request")?;

        if !response.status().is_success() {
            return Err(ServiceError::StatusQueryFailed(failure_body(response).await).into());
        }

        response
            .json()
            .await
            .context("Failed to parse status response")
    }

    #[tracing::instrument(skip(self, token))]
    async fn get_response(&self, token: &str, request_id: &str) -> Result<serde_json::Value> {
        let url = format!("{}/get_response/{}", self.base_url, request_id);
        debug!("GET {}...", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send response fetch request")?;

        if !response.status().is_success() {
            return Err(ServiceError::ResponseFetchFailed(failure_body(response).await).into());
        }

        response
            .json()
            .await
            .context("Failed to parse result document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RequestStatus;

    fn test_client(server: &mockito::Server) -> ScoringClient {
        ScoringClient::new(Client::new(), server.url())
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/token")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("application/x-www-form-urlencoded".to_string()),
            )
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("username".into(), "alice".into()),
                mockito::Matcher::UrlEncoded("password".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc123"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let token = client.authenticate("alice", "secret").await.unwrap();

        mock.assert_async().await;
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_authenticate_rejected_carries_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/token")
            .with_status(401)
            .with_body("invalid credentials")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.authenticate("alice", "wrong").await.unwrap_err();

        mock.assert_async().await;
        let service_err = err.downcast_ref::<ServiceError>().unwrap();
        assert!(matches!(
            service_err,
            ServiceError::AuthenticationFailed(body) if body.contains("invalid credentials")
        ));
    }

    #[tokio::test]
    async fn test_upload_criteria_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/upload_criteria")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("customerid".into(), "C42".into()),
                mockito::Matcher::UrlEncoded("GLS".into(), "G7".into()),
            ]))
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"request_id": "R1"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let criteria = CriteriaDocument::sample();
        let receipt = client
            .upload_criteria("abc123", "C42", "G7", &criteria)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.request_id, "R1");
    }

    #[tokio::test]
    async fn test_upload_criteria_rejected() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/upload_criteria")
            .match_query(mockito::Matcher::Any)
            .with_status(422)
            .with_body("missing GLS")
            .create_async()
            .await;

        let client = test_client(&server);
        let criteria = CriteriaDocument::sample();
        let err = client
            .upload_criteria("abc123", "C42", "G7", &criteria)
            .await
            .unwrap_err();

        mock.assert_async().await;
        let service_err = err.downcast_ref::<ServiceError>().unwrap();
        assert!(matches!(
            service_err,
            ServiceError::SubmissionFailed(body) if body.contains("missing GLS")
        ));
    }

    #[tokio::test]
    async fn test_get_status_parses_enum() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/get_status/R1")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "processing", "message": "still working"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let report = client.get_status("abc123", "R1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(report.status, RequestStatus::Processing);
        assert_eq!(report.message, "still working");
    }

    #[tokio::test]
    async fn test_get_status_non_200_is_fatal() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/get_status/R1")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_status("abc123", "R1").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<ServiceError>().unwrap(),
            ServiceError::StatusQueryFailed(body) if body.contains("500")
        ));
    }

    #[tokio::test]
    async fn test_get_response_returns_document() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/get_response/R1")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"score": 42}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let document = client.get_response("abc123", "R1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(document["score"], 42);
    }

    #[tokio::test]
    async fn test_get_response_non_200_is_fatal() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/get_response/R1")
            .with_status(404)
            .with_body("no such request")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_response("abc123", "R1").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<ServiceError>().unwrap(),
            ServiceError::ResponseFetchFailed(body) if body.contains("no such request")
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ScoringClient::new(Client::new(), "https://example.com/");
        assert_eq!(client.base_url, "https://example.com");
    }
}
