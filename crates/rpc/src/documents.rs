use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub keywords: Vec<String>,
    /// One of `PDF`, `DOCX`, `TXT`, `Unknown`
    pub file_type: String,
    pub file_size: u64,
    pub upload_date: SystemTime,
    pub content: String,
    pub file_path: PathBuf,
    pub abstract_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub file_type_distribution: BTreeMap<String, usize>,
}
