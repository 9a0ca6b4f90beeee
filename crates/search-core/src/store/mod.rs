// search-core/src/store/mod.rs
//! 语料库存储接口
//!
//! 查询引擎只通过谓词树 [`Condition`] 与存储交互，具体如何执行由实现决定。

mod disk;
mod memory;

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use query::{Condition, Field};

use crate::models::Document;

pub use disk::DiskStore;
pub use memory::MemoryStore;

pub trait CorpusStore: Send + Sync {
    fn insert(&self, doc: Document) -> Result<()>;

    /// 指定全文匹配要查询的字段，非文本字段返回错误
    fn ensure_text_index(&self, fields: &[Field]) -> Result<()>;

    /// 按插入顺序返回满足条件的文档，最多 `limit` 个
    fn find_by_query(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>>;

    fn find_all(&self, limit: usize) -> Result<Vec<Document>>;

    fn find_by_id(&self, id: &str) -> Result<Option<Document>>;

    /// 返回删除的文档数（0 或 1）
    fn delete_by_id(&self, id: &str) -> Result<usize>;

    fn aggregate_count_by_field(&self, field: Field) -> Result<BTreeMap<String, usize>>;

    fn count(&self) -> Result<usize>;
}

pub(crate) fn check_text_fields(fields: &[Field]) -> Result<()> {
    if let Some(field) = fields.iter().find(|f| !f.is_textual()) {
        bail!("field '{}' cannot be text indexed", field);
    }
    Ok(())
}

/// 聚合统计用的分组键
pub(crate) fn group_key(doc: &Document, field: Field) -> Vec<String> {
    match field {
        Field::Id => vec![doc.id.clone()],
        Field::Title => vec![doc.title.clone()],
        Field::Author => vec![doc.author.clone()],
        Field::Publisher => vec![doc.publisher.clone()],
        Field::Content => vec![doc.content.clone()],
        Field::Keywords => doc.keywords.clone(),
        Field::FileType => vec![doc.file_type.to_string()],
        Field::UploadDate => vec![doc.upload_date.to_rfc3339()],
    }
}
