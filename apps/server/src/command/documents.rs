use super::{Command, open_library};
use crate::config::Config;
use crate::error::Result;
use crate::render;

pub struct ListCommand {
    config: Config,
    json: bool,
}

impl ListCommand {
    pub fn new(cfg: Config, json: bool) -> Self {
        Self { config: cfg, json }
    }
}

#[async_trait::async_trait]
impl Command for ListCommand {
    async fn execute(&self) -> Result<()> {
        let docs = open_library(&self.config)?.list()?;
        if self.json {
            return render::print_json(&docs);
        }
        render::print_documents(&docs);
        Ok(())
    }
}

pub struct ShowCommand {
    config: Config,
    id: String,
    json: bool,
}

impl ShowCommand {
    pub fn new(cfg: Config, id: String, json: bool) -> Self {
        Self { config: cfg, id, json }
    }
}

#[async_trait::async_trait]
impl Command for ShowCommand {
    async fn execute(&self) -> Result<()> {
        let doc = open_library(&self.config)?.get(&self.id)?;
        if self.json {
            return render::print_json(&doc);
        }
        render::print_document(&doc);
        Ok(())
    }
}

pub struct DeleteCommand {
    config: Config,
    id: String,
}

impl DeleteCommand {
    pub fn new(cfg: Config, id: String) -> Self {
        Self { config: cfg, id }
    }
}

#[async_trait::async_trait]
impl Command for DeleteCommand {
    async fn execute(&self) -> Result<()> {
        open_library(&self.config)?.delete(&self.id)?;
        println!("Deleted {}", self.id);
        Ok(())
    }
}
