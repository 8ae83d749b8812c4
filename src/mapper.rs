// src/mapper.rs

use crate::{
    constants::api::fields,
    error::{AppError, AppResult},
    models::{QueryMode, Record, api::LookupEntry},
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// 首字母大写，其余字符保持不变
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 把接口返回的 JSON 转换为记录列表。
///
/// 要么全部成功，要么返回 `MalformedResponse`，不会产出部分结果。
pub fn map(mode: QueryMode, raw: &Value) -> AppResult<Vec<Record>> {
    let malformed = |reason: String| AppError::MalformedResponse { mode, reason };

    let results = raw
        .get(fields::RESULTS)
        .ok_or_else(|| malformed(format!("响应中缺少 '{}' 字段", fields::RESULTS)))?
        .as_array()
        .ok_or_else(|| malformed(format!("'{}' 字段不是数组", fields::RESULTS)))?;

    let records = results
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let entry = LookupEntry::deserialize(item)
                .map_err(|e| malformed(format!("第 {} 条结果无法解析: {}", index + 1, e)))?;
            to_record(mode, entry)
                .map_err(|field| malformed(format!("第 {} 条结果缺少 '{}' 字段", index + 1, field)))
        })
        .collect::<AppResult<Vec<_>>>()
        .inspect_err(|e| warn!("映射 {} 结果失败: {}", mode, e))?;

    debug!("{} 模式共映射 {} 条记录", mode, records.len());
    Ok(records)
}

fn to_record(mode: QueryMode, entry: LookupEntry) -> Result<Record, &'static str> {
    let last = if mode.is_repeater() {
        entry.frequency.ok_or(fields::FREQUENCY)?
    } else {
        entry.surname.ok_or(fields::SURNAME)?
    };
    Ok(Record::new(
        mode,
        [
            entry.callsign,
            entry.id.to_string(),
            capitalize(&entry.city),
            entry.state,
            capitalize(&entry.country),
            last,
        ],
    ))
}
