// src/directory.rs

use crate::{
    client::RobustClient,
    config::AppConfig,
    error::AppResult,
    mapper,
    models::{ActiveQuery, RequestDescriptor, ResultSet},
    query::QueryBuilder,
};
use log::info;
use std::sync::Arc;

/// 查询流程：构建请求 → HTTP GET → 映射结果
#[derive(Clone)]
pub struct DirectoryService {
    builder: QueryBuilder,
    http_client: Arc<RobustClient>,
}

impl DirectoryService {
    pub fn new(config: &AppConfig, http_client: Arc<RobustClient>) -> Self {
        Self {
            builder: QueryBuilder::new(config.base_url.clone()).encode_values(config.encode_values),
            http_client,
        }
    }

    pub fn describe(&self, query: &ActiveQuery) -> AppResult<RequestDescriptor> {
        self.builder.build(query)
    }

    pub async fn search(&self, query: &ActiveQuery) -> AppResult<ResultSet> {
        let request = self.builder.build(query)?;
        let url = request.url();
        info!("发起查询: {}", url);
        let raw = self.http_client.fetch_json(url.as_str()).await?;
        let records = mapper::map(query.mode, &raw)?;
        info!("查询完成，共 {} 条结果", records.len());
        Ok(ResultSet {
            mode: query.mode,
            records,
        })
    }
}
