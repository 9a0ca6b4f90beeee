// search-core/src/assemble.rs
//! 文档组装：合并提取结果、关键词与文件系统信息

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::config::LibraryConfig;
use crate::extract::Extraction;
use crate::keywords::derive_keywords;
use crate::models::Document;

#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    pub max_keywords: usize,
    pub abstract_length: usize,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::from_config(&LibraryConfig::default())
    }
}

impl DocumentAssembler {
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self {
            max_keywords: config.keywords.max_keywords,
            abstract_length: config.display.abstract_length,
        }
    }

    /// 组装文档
    ///
    /// 标题缺省为原始文件名，出版方取元数据中的创建程序。
    pub fn assemble(&self, file_path: &Path, original_filename: &str, extraction: Extraction) -> Document {
        let Extraction {
            text,
            metadata,
            file_type,
        } = extraction;

        let file_size = match std::fs::metadata(file_path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!("无法读取文件大小 {:?}: {}", file_path, e);
                0
            }
        };

        let keywords = derive_keywords(&text, self.max_keywords);
        let abstract_text = make_abstract(&text, self.abstract_length);

        Document {
            id: Uuid::new_v4().to_string(),
            title: metadata
                .title
                .unwrap_or_else(|| original_filename.to_string()),
            author: metadata.author.unwrap_or_default(),
            publisher: metadata.creator.unwrap_or_default(),
            keywords,
            file_type,
            file_size,
            upload_date: Utc::now(),
            content: text,
            file_path: file_path.to_string_lossy().to_string(),
            abstract_text,
        }
    }
}

/// 取前 `length` 个字符，截断时追加 "..."
pub fn make_abstract(content: &str, length: usize) -> String {
    match content.char_indices().nth(length) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedMetadata;
    use crate::models::FileType;
    use std::io::Write;

    fn extraction(text: &str, metadata: ExtractedMetadata) -> Extraction {
        Extraction {
            text: text.to_string(),
            metadata,
            file_type: FileType::Txt,
        }
    }

    #[test]
    fn test_abstract_boundaries() {
        let exact = "a".repeat(500);
        assert_eq!(make_abstract(&exact, 500), exact);

        let long = "b".repeat(501);
        let abstract_text = make_abstract(&long, 500);
        assert_eq!(abstract_text.chars().count(), 503);
        assert!(abstract_text.ends_with("..."));

        assert_eq!(make_abstract("", 500), "");
    }

    #[test]
    fn test_abstract_counts_characters() {
        let text = "é".repeat(10);
        assert_eq!(make_abstract(&text, 4), "éééé...");
    }

    #[test]
    fn test_metadata_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello there").unwrap();

        let doc = DocumentAssembler::default().assemble(
            file.path(),
            "notes.txt",
            extraction("hello there", ExtractedMetadata::default()),
        );

        assert_eq!(doc.title, "notes.txt");
        assert_eq!(doc.author, "");
        assert_eq!(doc.publisher, "");
        assert_eq!(doc.file_size, 11);
        assert_eq!(doc.abstract_text, "hello there");
        assert_eq!(doc.keywords, vec!["hello", "there"]);
        assert!(uuid::Uuid::parse_str(&doc.id).is_ok());
    }

    #[test]
    fn test_metadata_mapping() {
        let metadata = ExtractedMetadata {
            title: Some("A Title".into()),
            author: Some("An Author".into()),
            creator: Some("A Press".into()),
            producer: Some("ignored".into()),
            keywords: None,
        };
        let doc = DocumentAssembler::default().assemble(
            Path::new("/nonexistent/file.txt"),
            "file.txt",
            extraction("", metadata),
        );

        assert_eq!(doc.title, "A Title");
        assert_eq!(doc.author, "An Author");
        assert_eq!(doc.publisher, "A Press");
        assert_eq!(doc.file_size, 0);
        assert!(doc.keywords.is_empty());
        assert_eq!(doc.abstract_text, "");
    }

    #[test]
    fn test_fresh_ids() {
        let assembler = DocumentAssembler::default();
        let a = assembler.assemble(Path::new("/x"), "x", extraction("", ExtractedMetadata::default()));
        let b = assembler.assemble(Path::new("/x"), "x", extraction("", ExtractedMetadata::default()));
        assert_ne!(a.id, b.id);
    }
}
