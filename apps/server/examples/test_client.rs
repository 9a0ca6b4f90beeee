//! 测试客户端 - 演示文档服务 API
//!
//! 运行方式:
//! 1. 先启动服务: cargo run -p docsearch -- serve
//! 2. 运行客户端: cargo run -p docsearch --example test_client

use config::AppStrategy;
use rpc::{
    DocumentServiceClient,
    search::{SearchMode, SearchRequest},
};
use tarpc::{client, context, tokio_serde::formats::Bincode};

const SAMPLE: &str = "Test Document for API Testing\n\
    This document is used for testing the search API. More testing and search.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 获取 socket 路径
    let strategy = config::create_strategy().ok();
    let runtime_dir = config::resolve_dir("RUNTIME_DIRECTORY", strategy.as_ref(), |s| {
        s.runtime_dir()
    });
    let socket_path = config::socket_path(&runtime_dir);

    println!("连接到: {:?}", socket_path);

    let transport = tarpc::serde_transport::unix::connect(&socket_path, Bincode::default).await?;
    let client = DocumentServiceClient::new(client::Config::default(), transport).spawn();

    println!("\n=== 测试 ping ===");
    let response = client.ping(context::current()).await?;
    println!("Ping 响应: {}", response);

    println!("\n=== 上传文档 ===");
    let doc = match client
        .ingest(context::current(), "test_document.txt".into(), SAMPLE.as_bytes().to_vec())
        .await?
    {
        Ok(doc) => doc,
        Err(e) => anyhow::bail!("上传失败: {}", e),
    };
    println!("✓ {} ({}), 关键词: {:?}", doc.title, doc.file_type, doc.keywords);

    let queries = [
        ("全文检索", SearchRequest::new("test")),
        ("布尔 AND", SearchRequest {
            boolean_mode: true,
            ..SearchRequest::new("test AND document")
        }),
        ("布尔 OR", SearchRequest {
            boolean_mode: true,
            ..SearchRequest::new("test OR nonexistentterm")
        }),
        ("模糊回退", SearchRequest::new("documnt")),
        ("关键词", SearchRequest {
            search_mode: SearchMode::Keywords,
            ..SearchRequest::new("testing")
        }),
    ];

    for (label, req) in queries {
        println!("\n=== {}: {:?} ===", label, req.query);
        match client.search(context::current(), req).await? {
            Ok(resp) => {
                println!("✓ {} 个结果 ({:.3}s)", resp.total_count, resp.search_time);
                for (i, hit) in resp.documents.iter().enumerate() {
                    println!("  [{}] {} {}", i + 1, hit.id, hit.title);
                }
            }
            Err(e) => println!("✗ 搜索失败: {}", e),
        }
    }

    println!("\n=== 统计 ===");
    match client.stats(context::current()).await? {
        Ok(stats) => println!("{} 个文档: {:?}", stats.total_documents, stats.file_type_distribution),
        Err(e) => println!("✗ 统计失败: {}", e),
    }

    println!("\n=== 删除 ===");
    client.delete_document(context::current(), doc.id.clone()).await??;
    match client.get_document(context::current(), doc.id).await? {
        Ok(_) => println!("✗ 文档仍然存在"),
        Err(e) => println!("✓ {}", e),
    }

    println!("\n=== 测试完成 ===");
    Ok(())
}
