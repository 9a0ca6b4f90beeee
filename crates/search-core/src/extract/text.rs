// search-core/src/extract/text.rs
//! 纯文本解码（自动检测编码）

use anyhow::{Result, bail};
use chardetng::EncodingDetector;

/// 智能解码文本（自动检测编码）
///
/// 先尝试 UTF-8，否则用 chardetng 猜测编码。包含 NUL 字节或解码出错时视为二进制数据。
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if bytes.contains(&0) {
        bail!("包含 NUL 字节，判定为二进制数据");
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        tracing::debug!("文本使用 UTF-8 编码");
        return Ok(text.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let detected_encoding = detector.guess(None, true);

    tracing::debug!("检测到文本编码: {}", detected_encoding.name());

    let (decoded, encoding_used, had_errors) = detected_encoding.decode(bytes);
    if had_errors {
        bail!("使用 {} 解码时出错", encoding_used.name());
    }

    Ok(decoded.into_owned())
}
