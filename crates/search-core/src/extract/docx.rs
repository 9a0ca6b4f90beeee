// search-core/src/extract/docx.rs
//! DOCX 提取：docx-rs 读取段落，zip 读取 docProps 中的核心属性

use std::io::{Cursor, Read};

use anyhow::{Result, anyhow};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use super::ExtractedMetadata;

const CORE_PROPERTIES: &str = "docProps/core.xml";
const APP_PROPERTIES: &str = "docProps/app.xml";

static DC_TITLE: Lazy<Regex> = Lazy::new(|| element_pattern("dc:title"));
static DC_CREATOR: Lazy<Regex> = Lazy::new(|| element_pattern("dc:creator"));
static CP_KEYWORDS: Lazy<Regex> = Lazy::new(|| element_pattern("cp:keywords"));
static APPLICATION: Lazy<Regex> = Lazy::new(|| element_pattern("Application"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|lt|gt|quot|apos|amp);").expect("entity pattern is valid")
});

fn element_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).expect("element pattern is valid")
}

pub(super) fn extract(bytes: &[u8]) -> Result<(String, ExtractedMetadata)> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| anyhow!("docx 解析错误: {:?}", e))?;

    let text = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    let metadata = read_properties(bytes).unwrap_or_else(|e| {
        tracing::debug!("无法读取 docProps: {:#}", e);
        ExtractedMetadata::default()
    });

    Ok((text, metadata))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut parts = Vec::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    parts.push(t.text.as_str());
                }
            }
        }
    }
    parts.concat()
}

/// 读取核心属性（标题、作者、关键词）与创建程序
pub(super) fn read_properties(bytes: &[u8]) -> Result<ExtractedMetadata> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let core = read_entry(&mut archive, CORE_PROPERTIES);
    let app = read_entry(&mut archive, APP_PROPERTIES);

    let from = |xml: &Option<String>, re: &Regex| xml.as_deref().and_then(|xml| element_text(xml, re));

    Ok(ExtractedMetadata {
        title: from(&core, &DC_TITLE),
        author: from(&core, &DC_CREATOR),
        creator: from(&app, &APPLICATION),
        producer: None,
        keywords: from(&core, &CP_KEYWORDS),
    })
}

fn read_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Option<String> {
    let mut entry = archive.by_name(name).ok()?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml).ok()?;
    Some(xml)
}

fn element_text(xml: &str, re: &Regex) -> Option<String> {
    let raw = re.captures(xml)?.get(1)?.as_str();
    let value = unescape_xml(raw.trim());
    (!value.is_empty()).then_some(value)
}

/// 一次替换完成，`&amp;lt;` 解码为 `&lt;`；无效的字符引用原样保留
fn unescape_xml(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
