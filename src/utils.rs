// src/utils.rs

use crate::error::AppResult;
use log::info;
use std::{fs, path::Path};

/// 终端显示宽度：ASCII 计 1，其余计 2
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    format!("{}...", &text[..end_pos])
}

/// 目标文件已存在时根据 `overwrite` 决定是否删除旧文件。
/// 返回 false 表示调用方应放弃写入。
pub fn prepare_destination(path: &Path, overwrite: bool) -> AppResult<bool> {
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        return Ok(true);
    }
    if !overwrite {
        return Ok(false);
    }
    info!("删除旧文件: {}", path.display());
    fs::remove_file(path)?;
    Ok(true)
}
