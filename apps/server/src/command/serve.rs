use super::{Command, open_library};
use crate::config::Config;
use crate::error::Result;
use futures::{future, prelude::*};
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

use rpc::{
    DocumentService, ServiceError,
    documents::{DocumentRecord, StatsResponse},
    search::{SearchRequest, SearchResponse},
};
use tarpc::{
    context::Context,
    server::{self, Channel},
    tokio_serde::formats::Bincode,
};

use search_core::{Library, LibraryResult};

type RpcResult<T> = std::result::Result<T, ServiceError>;

async fn spawn(fut: impl Future<Output = ()> + Send + 'static) {
    tokio::spawn(fut);
}

#[derive(Clone)]
struct Server {
    library: Arc<Library>,
}

impl Server {
    fn new(library: Arc<Library>) -> Self {
        Self { library }
    }

    /// 在阻塞线程池上执行文档库操作，并转换为 RPC 错误
    async fn run<T, F>(&self, op: &'static str, f: F) -> RpcResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Library) -> LibraryResult<T> + Send + 'static,
    {
        let library = Arc::clone(&self.library);
        match tokio::task::spawn_blocking(move || f(&library)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let e = ServiceError::from(e);
                match &e {
                    ServiceError::Internal(msg) => tracing::error!("{} 失败: {}", op, msg),
                    _ => warn!("{} 被拒绝: {}", op, e),
                }
                Err(e)
            }
            Err(e) => {
                tracing::error!("{} 任务异常终止: {}", op, e);
                Err(ServiceError::Internal(e.to_string()))
            }
        }
    }
}

impl DocumentService for Server {
    async fn ping(self, _c: Context) -> String {
        "Pong".to_string()
    }

    async fn ingest(
        self,
        _c: Context,
        filename: String,
        bytes: Vec<u8>,
    ) -> RpcResult<DocumentRecord> {
        info!("收到摄取请求: {} ({} 字节)", filename, bytes.len());
        self.run("ingest", move |library| {
            library.ingest(&filename, &bytes).map(Into::into)
        })
        .await
    }

    async fn search(self, _c: Context, req: SearchRequest) -> RpcResult<SearchResponse> {
        info!("收到搜索请求: {:?} ({})", req.query, req.search_mode);
        self.run("search", move |library| {
            library.search(&req.into()).map(Into::into)
        })
        .await
    }

    async fn list_documents(self, _c: Context) -> RpcResult<Vec<DocumentRecord>> {
        self.run("list_documents", |library| {
            Ok(library.list()?.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn get_document(self, _c: Context, id: String) -> RpcResult<DocumentRecord> {
        self.run("get_document", move |library| library.get(&id).map(Into::into))
            .await
    }

    async fn delete_document(self, _c: Context, id: String) -> RpcResult<()> {
        info!("收到删除请求: {}", id);
        self.run("delete_document", move |library| library.delete(&id))
            .await
    }

    async fn stats(self, _c: Context) -> RpcResult<StatsResponse> {
        self.run("stats", |library| library.stats().map(Into::into))
            .await
    }
}

pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    pub fn new(cfg: Config) -> Self {
        Self { config: cfg }
    }
}

#[async_trait::async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        let unix_socket_path = self.config.socket_path();

        if let Some(parent) = unix_socket_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if unix_socket_path.exists() {
            fs::remove_file(&unix_socket_path)?;
        }

        info!("正在打开文档库 {:?}", self.config.data_dir);
        let library = Arc::new(open_library(&self.config)?);
        info!("文档库就绪，共 {} 个文档", library.stats()?.total_documents);
        info!("监听 {:?}", unix_socket_path);

        let mut listener =
            tarpc::serde_transport::unix::listen(&unix_socket_path, Bincode::default).await?;
        listener.config_mut().max_frame_length(usize::MAX);

        let server = Server::new(library);

        listener
            .filter_map(|r| future::ready(r.ok()))
            .map(server::BaseChannel::with_defaults)
            .map(|channel| {
                let server = server.clone();
                channel.execute(server.serve()).for_each(spawn)
            })
            .buffer_unordered(10)
            .for_each(|_| async {})
            .await;

        Ok(())
    }
}
