use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::documents::DocumentRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_mode: SearchMode,
    /// Allow loose field matching and the approximate fallback
    pub fuzzy: bool,
    /// Interpret ` AND ` / ` OR ` in the query
    pub boolean_mode: bool,
    /// `fileType`, `dateFrom`, `dateTo`; other keys are ignored
    pub filters: BTreeMap<String, String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_mode: SearchMode::All,
            fuzzy: true,
            boolean_mode: false,
            filters: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SearchMode {
    #[default]
    All,
    Title,
    Author,
    Publisher,
    Content,
    Keywords,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub documents: Vec<DocumentRecord>,
    pub total_count: usize,
    /// Seconds spent on the whole search
    pub search_time: f64,
}
