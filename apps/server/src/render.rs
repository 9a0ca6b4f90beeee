//! 终端输出格式

use search_core::{Document, SearchResult, Stats};

use crate::error::Result;

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 单行摘要：ID、类型、标题、作者
pub fn summary_line(doc: &Document) -> String {
    let mut line = format!("{}  {:<7} {}", doc.id, doc.file_type.as_str(), doc.title);
    if !doc.author.is_empty() {
        line.push_str(&format!(" ({})", doc.author));
    }
    line
}

pub fn print_documents(docs: &[Document]) {
    for doc in docs {
        println!("{}", summary_line(doc));
    }
}

pub fn print_search_result(result: &SearchResult) {
    println!(
        "{} documents ({:.3}s)",
        result.total_count, result.search_time
    );
    for (i, doc) in result.documents.iter().enumerate() {
        println!("[{}] {}", i + 1, summary_line(doc));
        if !doc.keywords.is_empty() {
            println!("    keywords: {}", doc.keywords.join(", "));
        }
    }
}

pub fn print_document(doc: &Document) {
    println!("id:         {}", doc.id);
    println!("title:      {}", doc.title);
    println!("author:     {}", doc.author);
    println!("publisher:  {}", doc.publisher);
    println!("type:       {}", doc.file_type);
    println!("size:       {} bytes", doc.file_size);
    println!("uploaded:   {}", doc.upload_date.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("stored at:  {}", doc.file_path);
    println!("keywords:   {}", doc.keywords.join(", "));
    println!();
    println!("{}", doc.abstract_text);
}

pub fn print_stats(stats: &Stats) {
    println!("total documents: {}", stats.total_documents);
    for (file_type, count) in &stats.file_type_distribution {
        println!("  {:<8} {}", file_type, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use search_core::FileType;

    fn document(author: &str) -> Document {
        Document {
            id: "42".into(),
            title: "Field Notes".into(),
            author: author.into(),
            publisher: String::new(),
            keywords: vec![],
            file_type: FileType::Pdf,
            file_size: 10,
            upload_date: Utc::now(),
            content: String::new(),
            file_path: "/tmp/42_notes.pdf".into(),
            abstract_text: String::new(),
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(&document("")), "42  PDF     Field Notes");
        assert_eq!(
            summary_line(&document("R. Wallace")),
            "42  PDF     Field Notes (R. Wallace)"
        );
    }
}
