pub mod documents;
pub mod search;

use documents::{DocumentRecord, StatsResponse};
use search::{SearchRequest, SearchResponse};
use serde::{Deserialize, Serialize};

#[tarpc::service]
pub trait DocumentService {
    /// Heartbeat
    async fn ping() -> String;

    /// Store a file and index its extracted content
    async fn ingest(filename: String, bytes: Vec<u8>) -> Result<DocumentRecord, ServiceError>;

    /// Run a search against the corpus
    async fn search(req: SearchRequest) -> Result<SearchResponse, ServiceError>;

    /// All documents, capped by the server's corpus limit
    async fn list_documents() -> Result<Vec<DocumentRecord>, ServiceError>;

    async fn get_document(id: String) -> Result<DocumentRecord, ServiceError>;

    async fn delete_document(id: String) -> Result<(), ServiceError>;

    /// Document count and file type distribution
    async fn stats() -> Result<StatsResponse, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ServiceError {
    /// The request was rejected before touching the store (e.g. an empty query)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Store or infrastructure failure on the server side
    #[error("internal error: {0}")]
    Internal(String),
}
