// search-core/src/rpc_compat.rs
//! RPC 适配层 - rpc crate 类型与内部类型之间的转换

use std::path::PathBuf;
use std::time::SystemTime;

use rpc::ServiceError;
use rpc::documents::{DocumentRecord, StatsResponse};
use rpc::search::{SearchMode as RpcSearchMode, SearchRequest as RpcSearchRequest, SearchResponse};

use crate::error::LibraryError;
use crate::models::{Document, SearchMode, SearchRequest, SearchResult, Stats};

impl From<RpcSearchMode> for SearchMode {
    fn from(mode: RpcSearchMode) -> Self {
        match mode {
            RpcSearchMode::All => SearchMode::All,
            RpcSearchMode::Title => SearchMode::Title,
            RpcSearchMode::Author => SearchMode::Author,
            RpcSearchMode::Publisher => SearchMode::Publisher,
            RpcSearchMode::Content => SearchMode::Content,
            RpcSearchMode::Keywords => SearchMode::Keywords,
        }
    }
}

impl From<RpcSearchRequest> for SearchRequest {
    fn from(req: RpcSearchRequest) -> Self {
        Self {
            query: req.query,
            search_mode: req.search_mode.into(),
            fuzzy: req.fuzzy,
            boolean_mode: req.boolean_mode,
            filters: req.filters,
        }
    }
}

impl From<Document> for DocumentRecord {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            author: doc.author,
            publisher: doc.publisher,
            keywords: doc.keywords,
            file_type: doc.file_type.to_string(),
            file_size: doc.file_size,
            upload_date: SystemTime::from(doc.upload_date),
            content: doc.content,
            file_path: PathBuf::from(doc.file_path),
            abstract_text: doc.abstract_text,
        }
    }
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            documents: result.documents.into_iter().map(Into::into).collect(),
            total_count: result.total_count,
            search_time: result.search_time,
        }
    }
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_documents: stats.total_documents,
            file_type_distribution: stats.file_type_distribution,
        }
    }
}

impl From<LibraryError> for ServiceError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::Validation(e) => ServiceError::InvalidRequest(e.to_string()),
            LibraryError::NotFound(id) => ServiceError::NotFound(id),
            LibraryError::Store(e) => ServiceError::Internal(format!("{:#}", e)),
        }
    }
}
