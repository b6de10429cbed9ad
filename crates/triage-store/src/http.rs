//! HTTP implementation of the store traits
//!
//! Speaks JSON against a configured base URL. Non-2xx responses are mapped
//! to `RemoteError` with the status and raw body; transport failures carry
//! no status.

use async_trait::async_trait;
use serde::Deserialize;
use triage_core::{AlertPage, Case, CaseDraft, CaseQuery, CaseTemplate, RemoteError};

use crate::store::{AlertStore, CaseStore, SearchRequest};

pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RemoteError::with_status(status.as_u16(), body))
        }
    }

    /// POST with no body to a per-alert endpoint, e.g. `/api/alert/{id}/follow`
    async fn post_alert_op(&self, id: &str, op: &str) -> Result<(), RemoteError> {
        let path = format!("/api/alert/{}/{}", id, op);
        self.send(self.request(reqwest::Method::POST, &path)).await?;
        Ok(())
    }

    async fn parse<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::transport(format!("invalid response body: {}", e)))
    }
}

#[derive(Deserialize)]
struct MergeResponse {
    data: MergedCaseRef,
}

#[derive(Deserialize)]
struct MergedCaseRef {
    id: String,
}

#[async_trait]
impl AlertStore for HttpStore {
    async fn search(&self, request: &SearchRequest) -> Result<AlertPage, RemoteError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "/api/alert/_search")
                    .json(request),
            )
            .await?;
        self.parse(response).await
    }

    async fn follow(&self, id: &str) -> Result<(), RemoteError> {
        self.post_alert_op(id, "follow").await
    }

    async fn unfollow(&self, id: &str) -> Result<(), RemoteError> {
        self.post_alert_op(id, "unfollow").await
    }

    async fn mark_as_read(&self, id: &str) -> Result<(), RemoteError> {
        self.post_alert_op(id, "markAsRead").await
    }

    async fn mark_as_unread(&self, id: &str) -> Result<(), RemoteError> {
        self.post_alert_op(id, "markAsUnread").await
    }

    async fn bulk_remove(&self, ids: &[String]) -> Result<(), RemoteError> {
        self.send(
            self.request(reqwest::Method::POST, "/api/alert/delete/_bulk")
                .json(&serde_json::json!({ "ids": ids })),
        )
        .await?;
        Ok(())
    }

    async fn bulk_merge_into(&self, ids: &[String], case_id: &str) -> Result<String, RemoteError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "/api/alert/merge/_bulk")
                    .json(&serde_json::json!({ "ids": ids, "caseId": case_id })),
            )
            .await?;
        let merged: MergeResponse = self.parse(response).await?;
        Ok(merged.data.id)
    }
}

#[async_trait]
impl CaseStore for HttpStore {
    async fn case_templates(&self) -> Result<Vec<CaseTemplate>, RemoteError> {
        let response = self
            .send(self.request(reqwest::Method::GET, "/api/case/template"))
            .await?;
        self.parse(response).await
    }

    async fn create_case(&self, draft: &CaseDraft) -> Result<Case, RemoteError> {
        let response = self
            .send(self.request(reqwest::Method::POST, "/api/case").json(draft))
            .await?;
        self.parse(response).await
    }

    async fn find_cases(&self, query: &CaseQuery) -> Result<Vec<Case>, RemoteError> {
        let body = match query {
            CaseQuery::ByTitle(input) => {
                serde_json::json!({ "query": format!("title:\"{}\"", input) })
            }
            CaseQuery::ByNumber(input) => serde_json::json!({ "caseId": input }),
        };
        let response = self
            .send(
                self.request(reqwest::Method::POST, "/api/case/_search")
                    .json(&body),
            )
            .await?;
        self.parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let store = HttpStore::new("http://localhost:9000/", None).unwrap();
        assert_eq!(store.url("/api/alert/_search"), "http://localhost:9000/api/alert/_search");
    }
}
