//! HTTP client for the Appwrite Databases REST API.
//!
//! Authenticates with a server API key (`X-Appwrite-Key`) and addresses a
//! single collection fixed at construction time.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppwriteError;
use crate::query::Query;
use crate::types::{CreateDocumentRequest, DocumentList, UpdateDocumentRequest};

/// Error body returned by Appwrite on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Client bound to one Appwrite database collection.
pub struct AppwriteClient {
    client: Client,
    endpoint: Url,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
}

impl AppwriteClient {
    /// Creates a client for `collection_id` in `database_id`.
    ///
    /// `endpoint` is the API root including the version segment, e.g.
    /// `https://cloud.appwrite.io/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`AppwriteError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`AppwriteError::InvalidEndpoint`] if `endpoint` does not
    /// parse.
    pub fn new(
        settings: &marquee_core::AppwriteSettings,
        timeout_secs: u64,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("marquee/0.1 (movie-catalogue)")
            .build()?;

        let normalised = format!("{}/", settings.endpoint.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised).map_err(|e| AppwriteError::InvalidEndpoint {
            url: settings.endpoint.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            project_id: settings.project_id.clone(),
            api_key: settings.api_key.clone(),
            database_id: settings.database_id.clone(),
            collection_id: settings.collection_id.clone(),
        })
    }

    /// Lists documents matching `queries`.
    ///
    /// # Errors
    ///
    /// Returns [`AppwriteError::Api`] on a non-2xx status,
    /// [`AppwriteError::Http`] on network failure, or
    /// [`AppwriteError::Deserialize`] if the body does not match `T`.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        queries: &[Query],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let mut url = self.documents_url(None)?;
        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_param());
            }
        }
        tracing::debug!(
            collection = %self.collection_id,
            queries = queries.len(),
            "Appwrite list documents"
        );
        self.send(self.request(Method::GET, url)).await
    }

    /// Creates a document with the given id.
    ///
    /// # Errors
    ///
    /// Same as [`AppwriteClient::list_documents`].
    pub async fn create_document<D: Serialize, T: DeserializeOwned>(
        &self,
        document_id: &str,
        data: D,
    ) -> Result<T, AppwriteError> {
        let url = self.documents_url(None)?;
        let body = CreateDocumentRequest { document_id, data };
        tracing::debug!(collection = %self.collection_id, document_id, "Appwrite create document");
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    /// Partially updates the document `document_id`.
    ///
    /// # Errors
    ///
    /// Same as [`AppwriteClient::list_documents`].
    pub async fn update_document<D: Serialize, T: DeserializeOwned>(
        &self,
        document_id: &str,
        data: D,
    ) -> Result<T, AppwriteError> {
        let url = self.documents_url(Some(document_id))?;
        let body = UpdateDocumentRequest { data };
        tracing::debug!(collection = %self.collection_id, document_id, "Appwrite update document");
        self.send(self.request(Method::PATCH, url).json(&body)).await
    }

    fn documents_url(&self, document_id: Option<&str>) -> Result<Url, AppwriteError> {
        let mut path = format!(
            "databases/{}/collections/{}/documents",
            self.database_id, self.collection_id
        );
        if let Some(id) = document_id {
            path.push('/');
            path.push_str(id);
        }
        self.endpoint
            .join(&path)
            .map_err(|e| AppwriteError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppwriteError> {
        let response = request.send().await?;
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
            let (message, kind) = parsed
                .map(|e| (e.message, e.kind))
                .unwrap_or_else(|| (body.clone(), String::new()));
            return Err(AppwriteError::Api {
                status: status.as_u16(),
                kind,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| AppwriteError::Deserialize {
            context: path,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::AppwriteSettings;

    use super::*;

    fn settings(endpoint: &str) -> AppwriteSettings {
        AppwriteSettings {
            endpoint: endpoint.to_string(),
            project_id: "proj".to_string(),
            database_id: "db1".to_string(),
            collection_id: "metrics".to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn documents_url_keeps_version_segment() {
        let client = AppwriteClient::new(&settings("https://cloud.appwrite.io/v1"), 30).unwrap();
        assert_eq!(
            client.documents_url(None).unwrap().as_str(),
            "https://cloud.appwrite.io/v1/databases/db1/collections/metrics/documents"
        );
        assert_eq!(
            client.documents_url(Some("abc")).unwrap().as_str(),
            "https://cloud.appwrite.io/v1/databases/db1/collections/metrics/documents/abc"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = AppwriteClient::new(&settings("::not a url"), 30);
        assert!(matches!(result, Err(AppwriteError::InvalidEndpoint { .. })));
    }
}
