// src/error.rs

use crate::models::{FilterKind, QueryMode};
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("输入校验失败: {kind} 不接受 '{value}'")]
    Validation { kind: FilterKind, value: String },
    #[error("无效的查询: {0}")]
    InvalidQuery(String),
    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("服务器返回错误状态 {status}: {url}")]
    HttpStatus { status: StatusCode, url: String },
    #[error("无法解析 {mode} 模式的API响应: {reason}")]
    MalformedResponse { mode: QueryMode, reason: String },
    #[error("下载 '{}' 在第 {offset} 字节处失败: {reason}", path.display())]
    DownloadFailed {
        path: PathBuf,
        offset: u64,
        reason: String,
    },
    #[error("导出失败: {found} 模式的记录不能按 {expected} 模式导出")]
    ExportModeMismatch { expected: QueryMode, found: QueryMode },
    #[error("CSV 写入错误: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("用户中断")]
    UserInterrupt,
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
