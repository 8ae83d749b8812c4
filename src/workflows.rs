// src/workflows.rs

use crate::{
    AppContext,
    config::AppConfig,
    downloader::{Asset, ChunkedDownloader, DownloadEvent, DownloadState},
    error::{AppError, AppResult},
    export::ExportFormat,
    models::{ActiveQuery, FilterKind, FilterSelection, QueryMode, ResultSet},
    symbols, ui, utils,
};
use colored::*;
use log::{error, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 运行单次查询（--search）
pub(crate) async fn run_search(context: &AppContext) -> AppResult<()> {
    let query = query_from_args(context.args.mode, &context.args.filter)?;
    let result = search_and_render(context, &query).await?;

    if let Some(path) = &context.args.export {
        let format = context
            .args
            .format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or(ExportFormat::Csv);
        export_results(&result, path, format, context.args.yes)?;
    }
    Ok(())
}

/// 第一个过滤条件为主过滤，第二个为次过滤
fn query_from_args(mode: QueryMode, filters: &[FilterSelection]) -> AppResult<ActiveQuery> {
    match filters {
        [primary] => Ok(ActiveQuery::new(mode, primary.clone())),
        [primary, secondary] => {
            Ok(ActiveQuery::new(mode, primary.clone()).with_secondary(secondary.clone()))
        }
        [] => Err(AppError::UserInputError("至少需要一个 --filter 条件。".into())),
        _ => Err(AppError::UserInputError(format!(
            "最多只能同时使用两个过滤条件，当前为 {} 个。",
            filters.len()
        ))),
    }
}

async fn search_and_render(context: &AppContext, query: &ActiveQuery) -> AppResult<ResultSet> {
    let request = context.directory.describe(query)?;
    println!("\n{} 查询已发出: {}", *symbols::SEARCH, request.url());

    let result = context.directory.search(query).await?;
    if result.is_empty() {
        ui::warn(&format!("{} 模式下没有匹配的结果。", result.mode));
    } else {
        ui::print_results_table(&result);
    }
    println!(
        "\n{} 查询成功，共 {} 条结果。",
        *symbols::OK,
        result.len()
    );
    Ok(result)
}

fn export_results(
    result: &ResultSet,
    path: &Path,
    format: ExportFormat,
    overwrite: bool,
) -> AppResult<()> {
    let path = format.ensure_extension(path);
    let overwrite = overwrite
        || !path.exists()
        || ui::confirm(&format!("文件 '{}' 已存在，是否覆盖?", path.display()), false);
    if !utils::prepare_destination(&path, overwrite)? {
        ui::info("已取消导出。");
        return Ok(());
    }

    let content = format.render(result.mode, &result.records)?;
    fs::write(&path, content)?;
    info!("已导出 {} 条记录到 {}", result.len(), path.display());
    println!(
        "{} 已将 {} 条记录导出到: {}",
        *symbols::OK,
        result.len(),
        path.display()
    );
    Ok(())
}

/// 运行交互模式
pub(crate) async fn run_interactive(context: &AppContext) -> AppResult<()> {
    ui::print_header("交互模式");
    ui::plain(&format!(
        "依次选择查询模式和过滤条件，值中可使用 % 作为通配符。按 {} 可随时退出。",
        *symbols::CTRL_C
    ));

    loop {
        let query = prompt_query()?;
        match search_and_render(context, &query).await {
            Ok(result) => {
                if !result.is_empty() {
                    prompt_export(&result)?;
                }
            }
            Err(e) => {
                error!("交互模式查询失败: {}", e);
                ui::error(&friendly_error(&e));
            }
        }
        if !ui::confirm("继续查询?", true) {
            break;
        }
    }

    ui::plain("");
    ui::info("退出交互模式。");
    Ok(())
}

fn prompt_query() -> AppResult<ActiveQuery> {
    let mode_options: Vec<String> = QueryMode::ALL.iter().map(|m| m.title().to_string()).collect();
    let mode = QueryMode::ALL[ui::choose_one(&mode_options, "选择查询模式", "1")?];

    let primary_kind = prompt_kind(mode, mode.filter_kinds(), "选择主过滤条件")?;
    let primary = prompt_value(primary_kind)?;
    let mut query = ActiveQuery::new(mode, primary);

    if ui::confirm("是否添加第二个过滤条件?", false) {
        let secondary_kinds = mode.secondary_kinds(primary_kind);
        let secondary_kind = prompt_kind(mode, &secondary_kinds, "选择第二个过滤条件")?;
        query = query.with_secondary(prompt_value(secondary_kind)?);
    }
    Ok(query)
}

fn prompt_kind(mode: QueryMode, kinds: &[FilterKind], title: &str) -> AppResult<FilterKind> {
    let labels: Vec<String> = kinds.iter().map(|k| mode.filter_label(*k).to_string()).collect();
    Ok(kinds[ui::choose_one(&labels, title, "1")?])
}

/// 反复提示直到输入通过校验
fn prompt_value(kind: FilterKind) -> AppResult<FilterSelection> {
    loop {
        let input = ui::prompt(&format!("请输入 {}", kind.placeholder()), None)
            .map_err(|_| AppError::UserInterrupt)?;
        match FilterSelection::new(kind, &input) {
            Ok(selection) => return Ok(selection),
            Err(e) => ui::warn(&e.to_string()),
        }
    }
}

fn prompt_export(result: &ResultSet) -> AppResult<()> {
    let input = ui::prompt("导出结果到文件 (.csv / .json，直接回车跳过)", None)
        .map_err(|_| AppError::UserInterrupt)?;
    if input.is_empty() {
        return Ok(());
    }
    let path = PathBuf::from(input);
    let format = ExportFormat::from_path(&path).unwrap_or(ExportFormat::Csv);
    if let Err(e) = export_results(result, &path, format, false) {
        error!("导出失败: {}", e);
        ui::error(&format!("导出失败: {}", e));
    }
    Ok(())
}

fn friendly_error(e: &AppError) -> String {
    match e {
        AppError::Transport(req_err) if req_err.is_timeout() => "网络连接超时。".to_string(),
        AppError::Transport(req_err) if req_err.is_connect() => "无法连接到服务器。".to_string(),
        AppError::HttpStatus { status, .. } => format!("服务器返回了一个错误: {}", status),
        _ => format!("处理时发生错误: {}", e),
    }
}

/// 下载一个静态数据文件，进度条由下载事件驱动
pub(crate) async fn run_download(context: &AppContext, asset: Asset) -> AppResult<()> {
    let destination = asset.destination(&context.config.data_dir);
    let overwrite = context.args.yes
        || !destination.exists()
        || ui::confirm(
            &format!(
                "文件 {} 已存在于 {}，是否更新?",
                asset.file_name(),
                context.config.data_dir.display()
            ),
            false,
        );
    if !utils::prepare_destination(&destination, overwrite)? {
        ui::info("保留现有文件，已取消下载。");
        return Ok(());
    }

    let save_dir = dunce::canonicalize(&context.config.data_dir)?;
    ui::plain("");
    ui::info(&format!("文件将保存到目录: \"{}\"", save_dir.display()));

    let url = asset.url(&context.config.static_base_url);
    let downloader = ChunkedDownloader::new(context.http_client.clone(), context.config.chunk_size);
    let mut handle =
        downloader.start_with_cancellation(&url, &destination, context.cancellation_token.clone());

    let mut pbar = None;
    while let Some(event) = handle.next_event().await {
        match event {
            DownloadEvent::TotalKnown(total) => {
                pbar = Some(ui::new_bytes_progress_bar(total, "下载"));
            }
            DownloadEvent::Progress(bytes) => {
                if let Some(p) = &pbar {
                    p.set_position(bytes);
                }
            }
            DownloadEvent::Done => {
                if let Some(p) = &pbar {
                    p.finish_and_clear();
                }
            }
            DownloadEvent::Failed(_) | DownloadEvent::Cancelled => {
                if let Some(p) = &pbar {
                    p.abandon();
                }
            }
        }
    }

    let task = handle.wait().await?;
    match task.state {
        DownloadState::Cancelled => {
            warn!("下载被用户取消: {}", destination.display());
            println!(
                "\n{} 下载已取消，已写入 {} 字节的部分文件保留在 {}",
                *symbols::WARN,
                task.bytes_transferred,
                destination.display()
            );
            Err(AppError::UserInterrupt)
        }
        _ => {
            println!(
                "{} {} 下载成功 ({})",
                *symbols::OK,
                destination.display(),
                indicatif::HumanBytes(task.bytes_transferred)
            );
            Ok(())
        }
    }
}

/// 列出可下载的静态数据文件及其本地状态
pub(crate) fn list_assets(config: &AppConfig) {
    let lines: Vec<String> = Asset::ALL
        .iter()
        .map(|asset| {
            let local = asset.destination(&config.data_dir);
            let status = if local.exists() {
                "已下载".green()
            } else {
                "未下载".yellow()
            };
            format!(
                "{:<12} {}  [{}]",
                asset.file_name(),
                asset.url(&config.static_base_url),
                status
            )
        })
        .collect();
    ui::box_message(
        "可下载的数据文件",
        &lines.iter().map(String::as_str).collect::<Vec<_>>(),
        |s| s.cyan(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(kind: FilterKind, value: &str) -> FilterSelection {
        FilterSelection::new(kind, value).unwrap()
    }

    #[test]
    fn test_query_from_args() {
        let q = query_from_args(QueryMode::NxdnUser, &[sel(FilterKind::Callsign, "F4%")]).unwrap();
        assert_eq!(q.mode, QueryMode::NxdnUser);
        assert!(q.secondary.is_none());

        let q = query_from_args(
            QueryMode::DmrRepeater,
            &[sel(FilterKind::Id, "1234"), sel(FilterKind::Country, "France")],
        )
        .unwrap();
        assert_eq!(q.secondary.unwrap().kind, FilterKind::Country);

        assert!(query_from_args(QueryMode::DmrUser, &[]).is_err());
        let three = [
            sel(FilterKind::Id, "1"),
            sel(FilterKind::City, "Paris"),
            sel(FilterKind::Country, "France"),
        ];
        assert!(matches!(
            query_from_args(QueryMode::DmrUser, &three),
            Err(AppError::UserInputError(_))
        ));
    }
}
