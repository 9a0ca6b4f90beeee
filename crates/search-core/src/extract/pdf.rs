// search-core/src/extract/pdf.rs
//! PDF 提取：lopdf 读取信息字典，pdf-extract 按页提取正文

use anyhow::{Context, Result};
use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::{Dictionary, Document, Object};

use super::ExtractedMetadata;

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

pub(super) fn extract(bytes: &[u8]) -> Result<(String, ExtractedMetadata)> {
    let doc = Document::load_mem(bytes).context("无法解析 PDF")?;

    let metadata = info_dictionary(&doc)
        .map(|info| ExtractedMetadata {
            title: info_string(info, b"Title"),
            author: info_string(info, b"Author"),
            creator: info_string(info, b"Creator"),
            producer: info_string(info, b"Producer"),
            keywords: info_string(info, b"Keywords"),
        })
        .unwrap_or_default();

    let pages = match extract_pages(bytes) {
        Some(pages) => pages,
        None => extract_pages_lopdf(&doc),
    };

    let text = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!("PDF 提取完成: {} 页, {} 字符", pages.len(), text.len());
    Ok((text, metadata))
}

/// pdf-extract 在损坏的文件上可能 panic，需要隔离
fn extract_pages(bytes: &[u8]) -> Option<Vec<String>> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => Some(pages),
        Ok(Err(e)) => {
            tracing::debug!("pdf-extract 失败，改用 lopdf 逐页提取: {}", e);
            None
        }
        Err(_) => {
            tracing::debug!("pdf-extract panic，改用 lopdf 逐页提取");
            None
        }
    }
}

/// 逐页提取，跳过失败的页面
fn extract_pages_lopdf(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .keys()
        .filter_map(|&page_number| match doc.extract_text(&[page_number]) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("跳过第 {} 页: {}", page_number, e);
                None
            }
        })
        .collect()
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    info.as_dict().ok()
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let raw = info.get(key).ok()?.as_str().ok()?;
    let value = decode_pdf_string(raw);
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// 带 BOM 的 UTF-16BE，否则按 PDFDocEncoding（以 Windows-1252 近似）
fn decode_pdf_string(raw: &[u8]) -> String {
    match raw.strip_prefix(&UTF16_BOM) {
        Some(utf16) => UTF_16BE.decode_without_bom_handling(utf16).0.into_owned(),
        None => WINDOWS_1252.decode_without_bom_handling(raw).0.into_owned(),
    }
}
