// search-core/src/models.rs
//! 数据模型定义

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use query::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// 文件类型（封闭集合）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
pub enum FileType {
    #[serde(rename = "PDF")]
    #[strum(serialize = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    #[strum(serialize = "DOCX")]
    Docx,
    #[serde(rename = "TXT")]
    #[strum(serialize = "TXT")]
    Txt,
    Unknown,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// 语料库中的文档记录，组装后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// 按词频降序
    pub keywords: Vec<String>,
    pub file_type: FileType,
    pub file_size: u64,
    pub upload_date: DateTime<Utc>,
    pub content: String,
    pub file_path: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl Record for Document {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Id => FieldValue::Text(&self.id),
            Field::Title => FieldValue::Text(&self.title),
            Field::Author => FieldValue::Text(&self.author),
            Field::Publisher => FieldValue::Text(&self.publisher),
            Field::Content => FieldValue::Text(&self.content),
            Field::Keywords => FieldValue::List(&self.keywords),
            Field::FileType => FieldValue::Text(self.file_type.as_str()),
            Field::UploadDate => FieldValue::Date(self.upload_date),
        }
    }
}

/// 搜索模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
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

impl SearchMode {
    /// 字段专属模式对应的字段
    pub fn metadata_field(&self) -> Option<Field> {
        match self {
            SearchMode::Title => Some(Field::Title),
            SearchMode::Author => Some(Field::Author),
            SearchMode::Publisher => Some(Field::Publisher),
            _ => None,
        }
    }

    /// 模糊回退时参与打分的字段
    pub fn fuzzy_fields(&self) -> &'static [Field] {
        match self {
            SearchMode::All => &[Field::Title, Field::Author, Field::Publisher],
            SearchMode::Title => &[Field::Title],
            SearchMode::Author => &[Field::Author],
            SearchMode::Publisher => &[Field::Publisher],
            SearchMode::Content | SearchMode::Keywords => &[],
        }
    }
}

/// 搜索请求（不持久化）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,
    #[serde(default)]
    pub boolean_mode: bool,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

fn default_fuzzy() -> bool {
    true
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_mode: SearchMode::All,
            fuzzy: default_fuzzy(),
            boolean_mode: false,
            filters: BTreeMap::new(),
        }
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn boolean(mut self, boolean_mode: bool) -> Self {
        self.boolean_mode = boolean_mode;
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// 搜索结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub documents: Vec<Document>,
    pub total_count: usize,
    /// 整个搜索耗时（秒）
    pub search_time: f64,
}

/// 语料库统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_documents: usize,
    pub file_type_distribution: BTreeMap<String, usize>,
}
