// search-core/src/store/disk.rs
//! 持久化存储
//!
//! sled 保存完整的文档记录（bincode 编码），Tantivy 负责全文索引：
//! - `documents` 树：自增序号（大端）-> 文档，迭代顺序即插入顺序
//! - `ids` 树：文档 ID -> 序号
//! - Tantivy 索引只存储文档 ID，全文检索返回命中的 ID 集合
//! - 全文检索直接由分词结果构造词项查询，`AND`、`field:`、`+`/`-` 都只是普通文本

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, RwLock};

use anyhow::{Context, Result, anyhow};
use query::{Condition, Field};
use sled::{Db, IVec, Tree};
use tantivy::collector::DocSetCollector;
use tantivy::directory::MmapDirectory;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use super::{CorpusStore, check_text_fields, group_key};
use crate::config::StoreConfig;
use crate::models::Document;
use crate::schema::{SchemaFields, build_schema};

const DOCUMENTS_TREE: &str = "documents";
const IDS_TREE: &str = "ids";

pub struct DiskStore {
    db: Db,
    documents: Tree,
    ids: Tree,
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    fields: SchemaFields,
    /// 全文匹配查询的索引字段
    text_fields: RwLock<Vec<tantivy::schema::Field>>,
}

impl DiskStore {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let db = sled::open(&config.db_path)
            .with_context(|| format!("无法打开文档库 {:?}", config.db_path))?;
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        let ids = db.open_tree(IDS_TREE)?;

        let (index, reader) = init_persistent_index(&config.index_path)?;
        let fields = SchemaFields::from_schema(&index.schema())?;
        let writer: IndexWriter = index.writer(config.writer_memory)?;

        let text_fields = Field::TEXT_INDEXED
            .iter()
            .filter_map(|&f| fields.text_field(f))
            .collect();

        tracing::info!(
            "文档库已加载: {:?} ({} 条记录), 索引: {:?}",
            config.db_path,
            documents.len(),
            config.index_path
        );

        Ok(Self {
            db,
            documents,
            ids,
            index,
            reader,
            writer: Mutex::new(writer),
            fields,
            text_fields: RwLock::new(text_fields),
        })
    }

    fn decode(bytes: &IVec) -> Result<Document> {
        bincode::deserialize(bytes).context("文档记录已损坏")
    }

    /// 按插入顺序遍历文档
    fn scan(&self) -> impl Iterator<Item = Result<Document>> + '_ {
        self.documents.iter().map(|entry| {
            let (_, value) = entry?;
            Self::decode(&value)
        })
    }

    fn commit(&self, writer: &mut IndexWriter) -> Result<()> {
        writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }

    /// 在全文索引中检索，返回命中的文档 ID
    ///
    /// 查询文本按各字段的分词器切分，任一词项命中即可，不解释查询语法。
    fn text_hits(&self, query_text: &str) -> Result<HashSet<String>> {
        let text_fields = self
            .text_fields
            .read()
            .map_err(|_| anyhow!("text field lock poisoned"))?
            .clone();

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for field in text_fields {
            let mut analyzer = self.index.tokenizer_for_field(field)?;
            let mut stream = analyzer.token_stream(query_text);
            while stream.advance() {
                let term = Term::from_field_text(field, &stream.token().text);
                clauses.push((
                    Occur::Should,
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
                ));
            }
        }
        if clauses.is_empty() {
            return Ok(HashSet::new());
        }

        let searcher = self.reader.searcher();
        let addresses = searcher.search(&BooleanQuery::new(clauses), &DocSetCollector)?;

        let mut ids = HashSet::with_capacity(addresses.len());
        for address in addresses {
            let doc: TantivyDocument = searcher.doc(address)?;
            if let Some(id) = doc.get_first(self.fields.id).and_then(|v| v.as_str()) {
                ids.insert(id.to_string());
            }
        }
        tracing::debug!("[Tantivy 搜索] '{}' 命中 {} 个文档", query_text, ids.len());
        Ok(ids)
    }

    fn index_document(&self, doc: &Document) -> TantivyDocument {
        let mut indexed = TantivyDocument::default();
        indexed.add_text(self.fields.id, &doc.id);
        indexed.add_text(self.fields.title, &doc.title);
        indexed.add_text(self.fields.author, &doc.author);
        indexed.add_text(self.fields.publisher, &doc.publisher);
        indexed.add_text(self.fields.content, &doc.content);
        indexed.add_text(self.fields.keywords, doc.keywords.join(" "));
        indexed
    }
}

/// 初始化持久化索引
fn init_persistent_index(index_path: &Path) -> Result<(Index, IndexReader)> {
    if !index_path.exists() {
        fs::create_dir_all(index_path)?;
    }

    let index = Index::open_or_create(MmapDirectory::open(index_path)?, build_schema())?;

    let reader = index
        .reader_builder()
        .reload_policy(ReloadPolicy::Manual)
        .try_into()?;

    Ok((index, reader))
}

impl CorpusStore for DiskStore {
    fn insert(&self, doc: Document) -> Result<()> {
        let record = bincode::serialize(&doc)?;

        {
            let mut writer = self
                .writer
                .lock()
                .map_err(|_| anyhow!("index writer lock poisoned"))?;
            writer.add_document(self.index_document(&doc))?;
            self.commit(&mut writer)?;
        }

        let seq = self.db.generate_id()?.to_be_bytes();
        self.documents.insert(seq, record)?;
        self.ids.insert(doc.id.as_bytes(), &seq[..])?;
        self.db.flush()?;

        tracing::debug!("已写入文档 {}", doc.id);
        Ok(())
    }

    fn ensure_text_index(&self, fields: &[Field]) -> Result<()> {
        check_text_fields(fields)?;
        let resolved = fields
            .iter()
            .filter_map(|&f| self.fields.text_field(f))
            .collect();
        *self
            .text_fields
            .write()
            .map_err(|_| anyhow!("text field lock poisoned"))? = resolved;
        Ok(())
    }

    fn find_by_query(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>> {
        let mut hits: HashMap<&str, HashSet<String>> = HashMap::new();
        for term in condition.text_terms() {
            hits.insert(term, self.text_hits(term)?);
        }
        let text_match =
            |q: &str, doc: &Document| hits.get(q).is_some_and(|ids| ids.contains(&doc.id));

        let mut results = Vec::new();
        for doc in self.scan() {
            if results.len() >= limit {
                break;
            }
            let doc = doc?;
            if condition.evaluate(&doc, &text_match) {
                results.push(doc);
            }
        }
        Ok(results)
    }

    fn find_all(&self, limit: usize) -> Result<Vec<Document>> {
        self.scan().take(limit).collect()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Document>> {
        let Some(seq) = self.ids.get(id.as_bytes())? else {
            return Ok(None);
        };
        match self.documents.get(seq)? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn delete_by_id(&self, id: &str) -> Result<usize> {
        let Some(seq) = self.ids.remove(id.as_bytes())? else {
            return Ok(0);
        };
        self.documents.remove(seq)?;
        self.db.flush()?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("index writer lock poisoned"))?;
        writer.delete_term(Term::from_field_text(self.fields.id, id));
        self.commit(&mut writer)?;

        tracing::debug!("已删除文档 {}", id);
        Ok(1)
    }

    fn aggregate_count_by_field(&self, field: Field) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for doc in self.scan() {
            for key in group_key(&doc?, field) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }
}
