use super::{Command, open_library};
use crate::config::Config;
use crate::error::Result;
use crate::render;

pub struct StatsCommand {
    config: Config,
    json: bool,
}

impl StatsCommand {
    pub fn new(cfg: Config, json: bool) -> Self {
        Self { config: cfg, json }
    }
}

#[async_trait::async_trait]
impl Command for StatsCommand {
    async fn execute(&self) -> Result<()> {
        let stats = open_library(&self.config)?.stats()?;
        if self.json {
            return render::print_json(&stats);
        }
        render::print_stats(&stats);
        Ok(())
    }
}
