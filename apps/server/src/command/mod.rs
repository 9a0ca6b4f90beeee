mod documents;
mod ingest;
mod search;
mod serve;
mod stats;

pub use documents::{DeleteCommand, ListCommand, ShowCommand};
pub use ingest::IngestCommand;
pub use search::SearchCommand;
pub use serve::ServeCommand;
pub use stats::StatsCommand;

use crate::config::Config;
use crate::error::{Result, error};
use search_core::Library;

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// 打开配置指定的持久化文档库
///
/// sled 对数据目录加独占锁，服务运行时本地命令会在此失败。
fn open_library(config: &Config) -> Result<Library> {
    Library::open(&config.library_config())
        .map_err(|e| error!("无法打开文档库 {:?}: {:#}", config.data_dir, e))
}
