// search-core/src/extract/mod.rs
//! 文本提取模块
//!
//! 根据扩展名选择提取器，提取正文与书目元数据。提取失败不会向上传播：
//! 记录 warn 日志后返回空文本和空元数据。

mod docx;
mod pdf;
mod text;

use crate::models::FileType;

pub use text::decode_text;

/// 提取器内部使用的书目元数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub keywords: Option<String>,
}

impl ExtractedMetadata {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// 提取结果
#[derive(Debug, Clone)]
pub struct Extraction {
    /// 去除首尾空白后的正文
    pub text: String,
    pub metadata: ExtractedMetadata,
    pub file_type: FileType,
}

/// 提取器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    PlainText,
    Pdf,
    Docx,
    /// 未知扩展名：尝试按文本解码
    Fallback,
}

impl Extractor {
    /// 按扩展名（不区分大小写）选择提取器
    pub fn for_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Extractor::Pdf,
            "docx" => Extractor::Docx,
            "txt" => Extractor::PlainText,
            _ => Extractor::Fallback,
        }
    }

    pub fn extract(&self, bytes: &[u8]) -> Extraction {
        let (result, declared) = match self {
            Extractor::Pdf => (pdf::extract(bytes), FileType::Pdf),
            Extractor::Docx => (docx::extract(bytes), FileType::Docx),
            Extractor::PlainText => (plain(bytes), FileType::Txt),
            Extractor::Fallback => (plain(bytes), FileType::Unknown),
        };

        match result {
            Ok((text, metadata)) => Extraction {
                text: text.trim().to_string(),
                metadata,
                file_type: match self {
                    Extractor::Fallback => FileType::Txt,
                    _ => declared,
                },
            },
            Err(e) => {
                tracing::warn!("{:?} 提取失败，内容置空: {:#}", self, e);
                Extraction {
                    text: String::new(),
                    metadata: ExtractedMetadata::default(),
                    file_type: declared,
                }
            }
        }
    }
}

fn plain(bytes: &[u8]) -> anyhow::Result<(String, ExtractedMetadata)> {
    decode_text(bytes).map(|text| (text, ExtractedMetadata::default()))
}

/// 提取原始字节的正文与元数据，永不失败
pub fn extract(bytes: &[u8], extension: &str) -> Extraction {
    let extractor = Extractor::for_extension(extension);
    tracing::debug!("使用 {:?} 提取 {} 字节", extractor, bytes.len());
    extractor.extract(bytes)
}
