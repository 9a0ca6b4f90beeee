// search-core/src/schema/fields.rs
//! 字段名常量定义
//!
//! 统一管理所有 Schema 字段名，避免魔法字符串

/// 文档 ID（精确匹配，唯一标识符）
pub const FIELD_ID: &str = "id";

/// 标题
pub const FIELD_TITLE: &str = "title";

/// 作者
pub const FIELD_AUTHOR: &str = "author";

/// 出版方（元数据中的创建程序）
pub const FIELD_PUBLISHER: &str = "publisher";

/// 正文（全文检索主字段）
pub const FIELD_CONTENT: &str = "content";

/// 关键词（空格分隔）
pub const FIELD_KEYWORDS: &str = "keywords";
