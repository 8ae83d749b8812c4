// src/cli.rs

use crate::{downloader::Asset, export::ExportFormat, models::{FilterSelection, QueryMode}};
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn parse_filter(s: &str) -> Result<FilterSelection, String> {
    s.parse().map_err(|e: crate::error::AppError| e.to_string())
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("action")
        .required(true)
        .args(&["search", "interactive", "download", "list_assets"]),
))]
pub struct Cli {
    // --- 运行模式 (Action) ---
    /// 按 --filter 指定的条件查询一次
    #[arg(short, long, action = clap::ArgAction::SetTrue, requires = "filter", help_heading = "Action")]
    pub search: bool,
    /// 启动交互式会话，逐步选择模式与过滤条件
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Action")]
    pub interactive: bool,
    /// 下载 RadioID 静态数据文件到数据目录
    #[arg(short, long, value_enum, value_name = "ASSET", help_heading = "Action")]
    pub download: Option<Asset>,
    /// 列出可下载的静态数据文件
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Action")]
    pub list_assets: bool,

    // --- 查询选项 (Query) ---
    /// 查询模式
    #[arg(short, long, value_enum, default_value_t = QueryMode::DmrUser, help_heading = "Query")]
    pub mode: QueryMode,
    /// 过滤条件 KIND=VALUE (KIND: id, callsign, city, country)，最多两个，第一个为主过滤
    #[arg(short, long, value_name = "KIND=VALUE", value_parser = parse_filter, num_args = 1, action = clap::ArgAction::Append, help_heading = "Query")]
    pub filter: Vec<FilterSelection>,
    /// 将结果导出到文件 (缺少扩展名时自动补全)
    #[arg(short, long, value_name = "FILE", help_heading = "Query")]
    pub export: Option<PathBuf>,
    /// 导出格式，默认根据文件扩展名判断，无法判断时使用 csv
    #[arg(long, value_enum, help_heading = "Query")]
    pub format: Option<ExportFormat>,
    /// 对查询参数做百分号编码 (保留 % 通配符)
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Query")]
    pub encode_values: bool,

    // --- 通用选项 (Options) ---
    /// 覆盖已存在的文件而不再询问
    #[arg(short = 'y', long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub yes: bool,
    /// 数据文件保存目录
    #[arg(long, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
    /// API 基础地址
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub base_url: Option<String>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterKind;

    #[test]
    fn test_filters_keep_command_line_order() {
        let cli = Cli::parse_from([
            "radioid-finder", "-s", "-m", "dmr-repeater", "-f", "id=1234", "-f", "country=France",
        ]);
        assert_eq!(cli.mode, QueryMode::DmrRepeater);
        let kinds: Vec<_> = cli.filter.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FilterKind::Id, FilterKind::Country]);
    }

    #[test]
    fn test_invalid_filter_value_is_rejected() {
        let res = Cli::try_parse_from(["radioid-finder", "-s", "-f", "callsign=f4abc"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_search_requires_filter() {
        assert!(Cli::try_parse_from(["radioid-finder", "-s"]).is_err());
    }

    #[test]
    fn test_download_asset_names() {
        let cli = Cli::parse_from(["radioid-finder", "-d", "rptrs.json", "-y"]);
        assert_eq!(cli.download, Some(Asset::RptrsJson));
        assert!(cli.yes);
    }
}
