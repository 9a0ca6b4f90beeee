pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "docsearch";
pub const APP_NAME: &str = "docsearch";

pub const SERVER_CONFIG_FILE_NAME: &str = "docsearch.toml";
pub const UNIX_SOCKET_FILE_NAME: &str = "docsearch.sock";
