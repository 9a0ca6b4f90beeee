use crate::error::Result;
use config::{AppStrategy, create_strategy, resolve_dir};
use search_core::{LibraryConfig, SearchSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default = "default_config", deny_unknown_fields)]
pub struct Config {
    pub runtime_dir: PathBuf,
    /// 上传文件、全文索引与文档库的根目录
    pub data_dir: PathBuf,
    pub max_keywords: usize,
    pub corpus_limit: usize,
    /// 模糊匹配分数须严格大于该值（0-100）
    pub fuzzy_threshold: u8,
    pub fuzzy_limit: usize,
}

fn default_config() -> Config {
    let strategy = create_strategy().ok();
    let search = SearchSettings::default();

    Config {
        runtime_dir: resolve_dir("RUNTIME_DIRECTORY", strategy.as_ref(), |s| s.runtime_dir()),
        data_dir: resolve_dir("DATA_DIRECTORY", strategy.as_ref(), |s| Some(s.data_dir())),
        max_keywords: search_core::KeywordConfig::default().max_keywords,
        corpus_limit: search.corpus_limit,
        fuzzy_threshold: search.fuzzy_threshold,
        fuzzy_limit: search.fuzzy_limit,
    }
}

impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    pub fn load() -> Result<Config> {
        let strategy = create_strategy()?;
        let config_path = strategy.config_dir().join(config::constants::SERVER_CONFIG_FILE_NAME);

        match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // 配置文件不存在，创建示例配置文件
                Self::create_example_config(&config_path)?;
                Self::load_str("")
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 转换为以 data-dir 为根的文档库配置
    pub fn library_config(&self) -> LibraryConfig {
        let mut library = LibraryConfig::rooted_at(&self.data_dir);
        library.keywords.max_keywords = self.max_keywords;
        library.search = SearchSettings {
            corpus_limit: self.corpus_limit,
            fuzzy_threshold: self.fuzzy_threshold,
            fuzzy_limit: self.fuzzy_limit,
        };
        library
    }

    pub fn socket_path(&self) -> PathBuf {
        config::socket_path(&self.runtime_dir)
    }

    fn create_example_config(config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# docsearch 配置文件
#
# 此文件在首次运行时自动创建
# 配置修改后重启服务生效

# 可选：自定义运行时目录（unix socket 所在位置）
# runtime-dir = "/custom/runtime/path"

# 可选：自定义数据目录（uploads/、index/、documents/）
# data-dir = "/custom/data/path"

# 每个文档保留的关键词数
# max-keywords = 20

# 单次检索扫描的最大文档数
# corpus-limit = 1000

# 模糊回退：分数须大于阈值，最多返回 fuzzy-limit 个文档
# fuzzy-threshold = 60
# fuzzy-limit = 50
"#;

        std::fs::write(config_path, example_config)?;
        eprintln!("已创建配置文件: {:?}", config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::load_str("").unwrap();
        assert_eq!(cfg.max_keywords, 20);
        assert_eq!(cfg.corpus_limit, 1000);
        assert_eq!(cfg.fuzzy_threshold, 60);
        assert_eq!(cfg.fuzzy_limit, 50);
    }

    #[test]
    fn test_kebab_case_keys() {
        let cfg = Config::load_str(
            r#"
data-dir = "/srv/docsearch"
fuzzy-threshold = 75
max-keywords = 5
"#,
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/docsearch"));
        assert_eq!(cfg.fuzzy_threshold, 75);
        assert_eq!(cfg.max_keywords, 5);
        assert_eq!(cfg.fuzzy_limit, 50);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::load_str("watch-paths = []").is_err());
    }

    #[test]
    fn test_library_config_rooted_at_data_dir() {
        let cfg = Config::load_str(
            r#"
data-dir = "/srv/docsearch"
corpus-limit = 10
"#,
        )
        .unwrap();
        let library = cfg.library_config();
        assert_eq!(library.upload_dir, PathBuf::from("/srv/docsearch/uploads"));
        assert_eq!(library.store.index_path, PathBuf::from("/srv/docsearch/index"));
        assert_eq!(library.store.db_path, PathBuf::from("/srv/docsearch/documents"));
        assert_eq!(library.search.corpus_limit, 10);
        assert_eq!(library.search.fuzzy_threshold, 60);
    }
}
