use super::{Command, open_library};
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::render;

pub struct SearchCommand {
    config: Config,
    args: SearchArgs,
}

impl SearchCommand {
    pub fn new(cfg: Config, args: SearchArgs) -> Self {
        Self { config: cfg, args }
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let library = open_library(&self.config)?;
        let result = library.search(&self.args.to_request())?;

        if self.args.json {
            render::print_json(&result)
        } else {
            render::print_search_result(&result);
            Ok(())
        }
    }
}
