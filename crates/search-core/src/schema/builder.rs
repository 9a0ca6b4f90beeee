// search-core/src/schema/builder.rs
//! Schema 构建器
//!
//! 构建 Tantivy 索引 Schema，统一管理字段配置

use anyhow::{Context, Result};
use tantivy::schema::*;

use super::fields::*;

/// 英文词干分词器（Tantivy 内置）
pub const TOKENIZER: &str = "en_stem";

/// 构建 Tantivy Schema
///
/// # 字段
/// - `id`: 文档 ID，精确匹配，存储
/// - `title` / `author` / `publisher` / `content` / `keywords`: 英文分词，仅索引
///
/// 完整的文档记录保存在 sled 中，索引只负责返回命中的 ID。
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    let text_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );

    schema_builder.add_text_field(FIELD_ID, STRING | STORED);

    schema_builder.add_text_field(FIELD_TITLE, text_options.clone());
    schema_builder.add_text_field(FIELD_AUTHOR, text_options.clone());
    schema_builder.add_text_field(FIELD_PUBLISHER, text_options.clone());
    schema_builder.add_text_field(FIELD_CONTENT, text_options.clone());
    schema_builder.add_text_field(FIELD_KEYWORDS, text_options);

    schema_builder.build()
}

/// Schema 字段辅助结构
///
/// 缓存字段引用，避免重复查找
#[derive(Debug, Clone, Copy)]
pub struct SchemaFields {
    pub id: Field,
    pub title: Field,
    pub author: Field,
    pub publisher: Field,
    pub content: Field,
    pub keywords: Field,
}

impl SchemaFields {
    /// 从 Schema 中提取所有字段引用
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let get = |name: &str| {
            schema
                .get_field(name)
                .with_context(|| format!("索引缺少字段 '{}'", name))
        };
        Ok(Self {
            id: get(FIELD_ID)?,
            title: get(FIELD_TITLE)?,
            author: get(FIELD_AUTHOR)?,
            publisher: get(FIELD_PUBLISHER)?,
            content: get(FIELD_CONTENT)?,
            keywords: get(FIELD_KEYWORDS)?,
        })
    }

    /// 文档字段对应的全文索引字段
    pub fn text_field(&self, field: query::Field) -> Option<Field> {
        match field {
            query::Field::Title => Some(self.title),
            query::Field::Author => Some(self.author),
            query::Field::Publisher => Some(self.publisher),
            query::Field::Content => Some(self.content),
            query::Field::Keywords => Some(self.keywords),
            _ => None,
        }
    }
}
