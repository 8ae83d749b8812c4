// src/query.rs

use crate::{
    constants::WILDCARD,
    error::{AppError, AppResult},
    models::{ActiveQuery, FilterSelection, RequestDescriptor},
};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// 保留通配符和常见的安全字符，其余全部编码
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(WILDCARD as u8)
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// 把 ActiveQuery 转换为请求描述。不会重新校验过滤值。
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
    encode_values: bool,
}

impl QueryBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            encode_values: false,
        }
    }

    /// 开启后对参数值做百分号编码（`%` 通配符除外）
    pub fn encode_values(mut self, enabled: bool) -> Self {
        self.encode_values = enabled;
        self
    }

    pub fn build(&self, query: &ActiveQuery) -> AppResult<RequestDescriptor> {
        let mode = query.mode;
        if !mode.filter_kinds().contains(&query.primary.kind) {
            return Err(AppError::InvalidQuery(format!(
                "{} 模式不支持按 {} 过滤",
                mode, query.primary.kind
            )));
        }

        let mut params = vec![self.param(&query.primary)];
        if let Some(secondary) = &query.secondary {
            if secondary.kind == query.primary.kind {
                return Err(AppError::InvalidQuery(format!(
                    "主过滤与次过滤不能使用同一维度 ({})",
                    secondary.kind
                )));
            }
            if !mode.filter_kinds().contains(&secondary.kind) {
                return Err(AppError::InvalidQuery(format!(
                    "{} 模式不支持按 {} 过滤",
                    mode, secondary.kind
                )));
            }
            params.push(self.param(secondary));
        }

        let descriptor = RequestDescriptor {
            path: format!("{}{}", self.base_url, mode.base_path()),
            params,
        };
        debug!("构建请求: {}", descriptor.url());
        Ok(descriptor)
    }

    fn param(&self, selection: &FilterSelection) -> (String, String) {
        let value = if self.encode_values {
            utf8_percent_encode(&selection.raw_value, VALUE_ENCODE_SET).to_string()
        } else {
            selection.raw_value.clone()
        };
        (selection.kind.param_name().to_string(), value)
    }
}
