// search-core/src/lib.rs
//! 文档检索引擎核心库
//!
//! 提供文档的摄取与多模式查询：
//! - PDF / DOCX / 纯文本提取（含书目元数据）
//! - 停用词过滤的词频关键词
//! - 全文、字段正则、关键词、布尔组合查询
//! - 主查询为空时的模糊匹配回退

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use query::Field;
use uuid::Uuid;

pub mod assemble;
pub mod config;
pub mod error;
pub mod extract;
pub mod fuzzy;
pub mod keywords;
pub mod models;
pub mod query_executor;
pub mod schema;
pub mod store;

// RPC 适配层（可选功能）
#[cfg(feature = "rpc-compat")]
pub mod rpc_compat;

// 重导出核心类型
pub use assemble::{DocumentAssembler, make_abstract};
pub use config::{DisplayConfig, KeywordConfig, LibraryConfig, SearchSettings, StoreConfig};
pub use error::{LibraryError, LibraryResult};
pub use extract::{ExtractedMetadata, Extraction, Extractor, extract};
pub use keywords::derive_keywords;
pub use models::{Document, FileType, SearchMode, SearchRequest, SearchResult, Stats};
pub use query_executor::{QueryContext, build_condition, execute_search};
pub use store::{CorpusStore, DiskStore, MemoryStore};

/// 文档库统一入口
///
/// 持有存储、文档组装器与检索配置，进程内共享时用 `Arc` 包装。
pub struct Library {
    store: Arc<dyn CorpusStore>,
    assembler: DocumentAssembler,
    settings: SearchSettings,
    upload_dir: std::path::PathBuf,
}

impl Library {
    /// 打开持久化文档库
    pub fn open(config: &LibraryConfig) -> anyhow::Result<Self> {
        let store = DiskStore::open(&config.store)?;
        Self::with_store(config, Arc::new(store))
    }

    /// 内存文档库，上传的原始文件仍写入 `upload_dir`
    pub fn in_memory(config: &LibraryConfig) -> anyhow::Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: &LibraryConfig, store: Arc<dyn CorpusStore>) -> anyhow::Result<Self> {
        fs::create_dir_all(&config.upload_dir)
            .with_context(|| format!("无法创建上传目录 {:?}", config.upload_dir))?;
        store.ensure_text_index(&Field::TEXT_INDEXED)?;

        Ok(Self {
            store,
            assembler: DocumentAssembler::from_config(config),
            settings: config.search.clone(),
            upload_dir: config.upload_dir.clone(),
        })
    }

    pub fn store(&self) -> &dyn CorpusStore {
        self.store.as_ref()
    }

    /// 摄取一个上传的文件
    ///
    /// 原始字节保存为 `{uuid}_{文件名}`，提取失败不影响摄取。
    pub fn ingest(&self, filename: &str, bytes: &[u8]) -> LibraryResult<Document> {
        let basename = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");

        let file_path = self
            .upload_dir
            .join(format!("{}_{}", Uuid::new_v4(), basename));
        fs::write(&file_path, bytes).with_context(|| format!("无法保存上传文件 {:?}", file_path))?;

        let extension = Path::new(basename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        let extraction = extract(bytes, extension);
        let doc = self.assembler.assemble(&file_path, basename, extraction);

        if let Err(e) = self.store.insert(doc.clone()) {
            if let Err(rm) = fs::remove_file(&file_path) {
                tracing::warn!("无法清理上传文件 {:?}: {}", file_path, rm);
            }
            return Err(e.into());
        }
        tracing::info!(
            "已摄取: {} ({}, {} 字节, {} 个关键词)",
            doc.title,
            doc.file_type,
            doc.file_size,
            doc.keywords.len()
        );
        Ok(doc)
    }

    pub fn search(&self, request: &SearchRequest) -> LibraryResult<SearchResult> {
        let ctx = QueryContext {
            store: self.store.as_ref(),
            settings: &self.settings,
        };
        execute_search(&ctx, request)
    }

    /// 列出所有文档（最多 corpus_limit 个）
    pub fn list(&self) -> LibraryResult<Vec<Document>> {
        Ok(self.store.find_all(self.settings.corpus_limit)?)
    }

    pub fn get(&self, id: &str) -> LibraryResult<Document> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    /// 删除文档，随后尽力删除保存的原始文件
    pub fn delete(&self, id: &str) -> LibraryResult<()> {
        let doc = self.get(id)?;
        if self.store.delete_by_id(id)? == 0 {
            return Err(LibraryError::NotFound(id.to_string()));
        }

        if let Err(e) = fs::remove_file(&doc.file_path) {
            tracing::warn!("无法删除原始文件 {}: {}", doc.file_path, e);
        }
        tracing::info!("已删除文档: {} ({})", doc.title, id);
        Ok(())
    }

    pub fn stats(&self) -> LibraryResult<Stats> {
        Ok(Stats {
            total_documents: self.store.count()?,
            file_type_distribution: self.store.aggregate_count_by_field(Field::FileType)?,
        })
    }
}
