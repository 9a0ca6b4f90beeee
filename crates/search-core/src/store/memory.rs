// search-core/src/store/memory.rs
//! 内存存储，用于测试和临时语料库

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{Result, anyhow};
use query::{Condition, Field, FieldValue, Record};

use super::{CorpusStore, check_text_fields, group_key};
use crate::models::Document;

pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
    text_fields: RwLock<Vec<Field>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            text_fields: RwLock::new(Field::TEXT_INDEXED.to_vec()),
        }
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// 查询中任一单词与文档索引字段中的某个单词相同即命中
fn text_matches(query: &str, doc: &Document, fields: &[Field]) -> bool {
    let wanted: Vec<String> = words(query).collect();
    if wanted.is_empty() {
        return false;
    }
    fields.iter().any(|&field| match doc.field(field) {
        FieldValue::Text(text) => words(text).any(|w| wanted.contains(&w)),
        FieldValue::List(items) => items
            .iter()
            .any(|item| words(item).any(|w| wanted.contains(&w))),
        FieldValue::Date(_) => false,
    })
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("memory store lock poisoned")
}

impl CorpusStore for MemoryStore {
    fn insert(&self, doc: Document) -> Result<()> {
        self.documents.write().map_err(poisoned)?.push(doc);
        Ok(())
    }

    fn ensure_text_index(&self, fields: &[Field]) -> Result<()> {
        check_text_fields(fields)?;
        *self.text_fields.write().map_err(poisoned)? = fields.to_vec();
        Ok(())
    }

    fn find_by_query(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>> {
        let text_fields = self.text_fields.read().map_err(poisoned)?;
        let documents = self.documents.read().map_err(poisoned)?;
        let text_match = |q: &str, doc: &Document| text_matches(q, doc, &text_fields);

        Ok(documents
            .iter()
            .filter(|doc| condition.evaluate(*doc, &text_match))
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_all(&self, limit: usize) -> Result<Vec<Document>> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.iter().take(limit).cloned().collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Document>> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> Result<usize> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        Ok(before - documents.len())
    }

    fn aggregate_count_by_field(&self, field: Field) -> Result<BTreeMap<String, usize>> {
        let documents = self.documents.read().map_err(poisoned)?;
        let mut counts = BTreeMap::new();
        for doc in documents.iter() {
            for key in group_key(doc, field) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.documents.read().map_err(poisoned)?.len())
    }
}
