// src/client.rs

use crate::{config::AppConfig, error::*};
use log::{debug, warn};
use reqwest::{IntoUrl, Response};
use serde_json::Value;
use std::sync::Arc;

/// 对 reqwest::Client 的薄封装。失败不自动重试，错误原样交给调用方。
#[derive(Clone)]
pub struct RobustClient {
    pub client: reqwest::Client,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let url = url.into_url()?;
        debug!("GET {}", url);
        let res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!("请求 {} 返回状态 {}", url, status);
            return Err(AppError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(res)
    }

    pub async fn fetch_json<T: IntoUrl>(&self, url: T) -> AppResult<Value> {
        let res = self.get(url).await?;
        Ok(res.json().await?)
    }
}
