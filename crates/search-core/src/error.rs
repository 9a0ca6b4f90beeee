// search-core/src/error.rs
//! 库级错误类型

use query::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// 请求本身不合法（空查询、非法日期等）
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("document not found: {0}")]
    NotFound(String),

    /// 底层存储或文件系统故障
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<std::io::Error> for LibraryError {
    fn from(e: std::io::Error) -> Self {
        LibraryError::Store(e.into())
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;
