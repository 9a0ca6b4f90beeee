// search-core/src/config.rs
//! 配置模块

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 文档库配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// 上传原始文件的保存目录
    pub upload_dir: PathBuf,
    pub store: StoreConfig,
    pub keywords: KeywordConfig,
    pub search: SearchSettings,
    pub display: DisplayConfig,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Tantivy 全文索引目录
    pub index_path: PathBuf,
    /// sled 文档库目录
    pub db_path: PathBuf,
    pub writer_memory: usize,
}

/// 关键词配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub max_keywords: usize,
}

/// 检索配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// 主查询返回的最大文档数
    pub corpus_limit: usize,
    /// 模糊匹配分数须严格大于该值
    pub fuzzy_threshold: u8,
    /// 模糊回退返回的最大文档数
    pub fuzzy_limit: usize,
}

/// 显示配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 摘要截取的字符数
    pub abstract_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./storage/index"),
            db_path: PathBuf::from("./storage/documents"),
            writer_memory: 50_000_000,
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self { max_keywords: 20 }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            corpus_limit: 1000,
            fuzzy_threshold: 60,
            fuzzy_limit: 50,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { abstract_length: 500 }
    }
}

impl LibraryConfig {
    /// 以 `root` 为根目录生成所有路径
    pub fn rooted_at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            upload_dir: root.join("uploads"),
            store: StoreConfig {
                index_path: root.join("index"),
                db_path: root.join("documents"),
                ..StoreConfig::default()
            },
            ..Self::default()
        }
    }
}
