//! Vector-index access: embedding and nearest-neighbour lookup.
//!
//! Pipeline code depends on the `VectorIndex` trait. `HttpVectorIndex` is the production
//! backend: a JSON-over-HTTP client for a collection-oriented index that embeds query
//! and document text server-side.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::skill::Taxonomy;

pub mod retriever;

/// Free-form metadata attached to an indexed document.
pub type Metadata = Map<String, Value>;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Index API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected index response: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Equality filter applied to document metadata. Serialized as the index `where` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexFilter {
    pub framework: String,
}

impl IndexFilter {
    pub fn taxonomy(taxonomy: Taxonomy) -> Self {
        Self {
            framework: taxonomy.as_str().to_string(),
        }
    }
}

/// A document to embed and store. Ingestion write path only.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    pub text: String,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Nearest-neighbour search. Returns metadata maps, closest first.
    async fn query(
        &self,
        text: &str,
        filter: &IndexFilter,
        top_k: usize,
    ) -> Result<Vec<Metadata>, IndexError>;

    /// Embeds and stores documents with their metadata (paired by position).
    #[allow(dead_code)]
    async fn add_documents(
        &self,
        docs: &[IndexDocument],
        metadatas: &[Metadata],
    ) -> Result<(), IndexError>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_texts: [&'a str; 1],
    n_results: usize,
    #[serde(rename = "where")]
    filter: &'a IndexFilter,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    /// One list per query text; entries may be null for documents stored without metadata.
    #[serde(default)]
    metadatas: Vec<Vec<Option<Metadata>>>,
}

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    documents: Vec<&'a str>,
    metadatas: &'a [Metadata],
    ids: Vec<String>,
}

/// HTTP client for the vector index. One collection holds every taxonomy's skills,
/// partitioned by the `framework` metadata field.
#[derive(Clone)]
pub struct HttpVectorIndex {
    client: Client,
    base_url: String,
    collection: String,
}

impl HttpVectorIndex {
    pub fn new(base_url: &str, collection: String) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/collections/{}/{}", self.base_url, self.collection, action)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &T,
    ) -> Result<String, IndexError> {
        let response = self.client.post(self.endpoint(action)).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(IndexError::Api {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn query(
        &self,
        text: &str,
        filter: &IndexFilter,
        top_k: usize,
    ) -> Result<Vec<Metadata>, IndexError> {
        let body = self
            .post(
                "query",
                &QueryRequest {
                    query_texts: [text],
                    n_results: top_k,
                    filter,
                },
            )
            .await?;

        let parsed: QueryResponse = serde_json::from_str(&body)?;
        let metadatas: Vec<Metadata> = parsed
            .metadatas
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        debug!(
            "Index query returned {} records for {}",
            metadatas.len(),
            filter.framework
        );
        Ok(metadatas)
    }

    async fn add_documents(
        &self,
        docs: &[IndexDocument],
        metadatas: &[Metadata],
    ) -> Result<(), IndexError> {
        let request = AddRequest {
            documents: docs.iter().map(|d| d.text.as_str()).collect(),
            metadatas,
            ids: (0..docs.len()).map(|i| format!("doc_{i}")).collect(),
        };
        self.post("add", &request).await?;
        debug!("Added {} documents to {}", docs.len(), self.collection);
        Ok(())
    }
}
