// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod directory;
pub mod downloader;
pub mod error;
pub mod export;
pub mod mapper;
pub mod models;
pub mod query;
pub mod registry;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod validator;
mod workflows;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    directory::DirectoryService,
    error::AppResult,
};
use log::debug;
use std::sync::{Arc, atomic::AtomicBool};

/// 执行上下文，包含各流程共用的配置与客户端
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<RobustClient>,
    pub directory: DirectoryService,
    pub args: Arc<Cli>,
    pub cancellation_token: Arc<AtomicBool>,
}

impl AppContext {
    pub fn new(
        config: Arc<AppConfig>,
        args: Arc<Cli>,
        cancellation_token: Arc<AtomicBool>,
    ) -> AppResult<Self> {
        let http_client = Arc::new(RobustClient::new(config.clone())?);
        let directory = DirectoryService::new(&config, http_client.clone());
        Ok(Self {
            config,
            http_client,
            directory,
            args,
            cancellation_token,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>, cancellation_token: Arc<AtomicBool>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    if args.list_assets {
        let config = AppConfig::new(&args)?;
        workflows::list_assets(&config);
        return Ok(());
    }

    let config = Arc::new(AppConfig::new(&args)?);
    let context = AppContext::new(config, args.clone(), cancellation_token)?;

    if args.interactive {
        workflows::run_interactive(&context).await
    } else if let Some(asset) = args.download {
        workflows::run_download(&context, asset).await
    } else {
        workflows::run_search(&context).await
    }
}
