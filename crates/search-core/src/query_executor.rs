// search-core/src/query_executor.rs
//! 查询执行器
//!
//! 将搜索请求编译为与存储无关的谓词树 [`Condition`]，交给存储执行。
//! 主查询为空且开启模糊匹配时，对整个语料库做近似匹配打分作为回退。

use std::time::Instant;

use query::{
    BooleanQuery, Condition, Field, Filters, Operator, ValidationError, ValidationErrorKind,
    parse_boolean, validate_filters, validate_query_text,
};
use regex::{Regex, RegexBuilder};

use crate::config::SearchSettings;
use crate::error::LibraryResult;
use crate::fuzzy::partial_ratio;
use crate::models::{Document, SearchMode, SearchRequest, SearchResult};
use crate::store::CorpusStore;

/// 查询执行上下文
pub struct QueryContext<'a> {
    pub store: &'a dyn CorpusStore,
    pub settings: &'a SearchSettings,
}

/// 执行搜索
///
/// 搜索策略：
/// 1. 校验查询文本与过滤条件（在访问存储之前）
/// 2. 按布尔模式或搜索模式构建谓词树，与过滤条件合取
/// 3. 主查询为空时按需执行模糊回退
pub fn execute_search(ctx: &QueryContext, request: &SearchRequest) -> LibraryResult<SearchResult> {
    let started = Instant::now();

    let query_text = validate_query_text(&request.query)?;
    let filters = validate_filters(&request.filters)?;
    let condition = build_condition(query_text, request, &filters)?;

    tracing::debug!("查询条件: {:?}", condition);

    let mut documents = ctx.store.find_by_query(&condition, ctx.settings.corpus_limit)?;

    if should_fall_back(request, documents.is_empty()) {
        tracing::debug!("主查询无结果，执行模糊回退: '{}'", query_text);
        documents = fuzzy_fallback(ctx, query_text, request.search_mode)?;
    }

    let total_count = documents.len();
    let search_time = started.elapsed().as_secs_f64();
    tracing::info!(
        "搜索 '{}' ({}) 返回 {} 个结果，耗时 {:.3}s",
        query_text,
        request.search_mode,
        total_count,
        search_time
    );

    Ok(SearchResult {
        documents,
        total_count,
        search_time,
    })
}

/// 构建查询谓词树：先看布尔模式，再看搜索模式，最后合取过滤条件
pub fn build_condition(
    query_text: &str,
    request: &SearchRequest,
    filters: &Filters,
) -> Result<Condition, ValidationError> {
    let mode_condition = if request.boolean_mode {
        match parse_boolean(query_text) {
            BooleanQuery::All(terms) => Condition::all(terms.into_iter().map(Condition::text).collect()),
            BooleanQuery::Any(terms) => Condition::any(terms.into_iter().map(Condition::text).collect()),
            BooleanQuery::Plain(text) => Condition::text(text),
        }
    } else if let Some(field) = request.search_mode.metadata_field() {
        let anchored = !request.fuzzy;
        Condition::field(field, Operator::Matches(case_insensitive(query_text, anchored)?))
    } else {
        match request.search_mode {
            SearchMode::Content => {
                Condition::field(Field::Content, Operator::Matches(case_insensitive(query_text, false)?))
            }
            SearchMode::Keywords => {
                Condition::field(Field::Keywords, Operator::AnyOf(vec![query_text.to_string()]))
            }
            _ => Condition::text(query_text),
        }
    };

    let mut conditions = vec![mode_condition];
    conditions.extend(filter_conditions(filters));
    Ok(Condition::all(conditions))
}

fn filter_conditions(filters: &Filters) -> Vec<Condition> {
    let mut conditions = Vec::new();
    if let Some(file_type) = &filters.file_type {
        conditions.push(Condition::field(Field::FileType, Operator::Equals(file_type.clone())));
    }
    if let Some(from) = filters.date_from {
        conditions.push(Condition::field(Field::UploadDate, Operator::AtOrAfter(from)));
    }
    if let Some(to) = filters.date_to {
        conditions.push(Condition::field(Field::UploadDate, Operator::AtOrBefore(to)));
    }
    conditions
}

/// 转义查询文本后构建不区分大小写的正则
fn case_insensitive(query_text: &str, anchored: bool) -> Result<Regex, ValidationError> {
    let escaped = regex::escape(query_text);
    let pattern = if anchored {
        format!("^{escaped}$")
    } else {
        escaped
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidPattern {
                pattern,
                reason: e.to_string(),
            })
        })
}

fn should_fall_back(request: &SearchRequest, primary_empty: bool) -> bool {
    request.fuzzy && primary_empty && request.search_mode != SearchMode::Content
}

/// 模糊回退：对语料库中每个文档打分，保留分数高于阈值的文档
fn fuzzy_fallback(ctx: &QueryContext, query_text: &str, mode: SearchMode) -> LibraryResult<Vec<Document>> {
    let fields = mode.fuzzy_fields();
    if fields.is_empty() {
        return Ok(Vec::new());
    }

    let needle = query_text.to_lowercase();
    let corpus = ctx.store.find_all(ctx.settings.corpus_limit)?;

    let mut scored: Vec<(u8, Document)> = corpus
        .into_iter()
        .filter_map(|doc| {
            let score = fields
                .iter()
                .map(|&field| partial_ratio(&needle, &field_text(&doc, field).to_lowercase()))
                .max()
                .unwrap_or(0);
            (score > ctx.settings.fuzzy_threshold).then_some((score, doc))
        })
        .collect();

    // 稳定排序，同分保持语料库顺序
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(ctx.settings.fuzzy_limit);

    tracing::debug!("模糊回退命中 {} 个文档", scored.len());
    Ok(scored.into_iter().map(|(_, doc)| doc).collect())
}

fn field_text(doc: &Document, field: Field) -> &str {
    match field {
        Field::Title => &doc.title,
        Field::Author => &doc.author,
        Field::Publisher => &doc.publisher,
        _ => "",
    }
}
