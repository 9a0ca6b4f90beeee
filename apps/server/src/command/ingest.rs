use super::{Command, open_library};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use std::path::PathBuf;
use tracing::warn;

pub struct IngestCommand {
    config: Config,
    files: Vec<PathBuf>,
}

impl IngestCommand {
    pub fn new(cfg: Config, files: Vec<PathBuf>) -> Self {
        Self { config: cfg, files }
    }
}

#[async_trait::async_trait]
impl Command for IngestCommand {
    async fn execute(&self) -> Result<()> {
        let library = open_library(&self.config)?;

        let mut failed = 0;
        for path in &self.files {
            let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("跳过无效文件名: {:?}", path);
                failed += 1;
                continue;
            };

            let bytes = tokio::fs::read(path)
                .await
                .wrap_err_with(|| format!("Failed to read {:?}", path))?;
            match library.ingest(filename, &bytes) {
                Ok(doc) => println!(
                    "{}  {}  {} keywords",
                    doc.id,
                    doc.title,
                    doc.keywords.len()
                ),
                Err(e) => {
                    warn!("摄取失败 {:?}: {}", path, e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(crate::error::error!("{} of {} files failed", failed, self.files.len()));
        }
        Ok(())
    }
}
