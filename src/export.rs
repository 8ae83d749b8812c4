// src/export.rs

use crate::{
    error::{AppError, AppResult},
    models::{QueryMode, Record},
};
use clap::ValueEnum;
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// 导出格式
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// 根据文件扩展名推断格式，无法识别时返回 None
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        [ExportFormat::Csv, ExportFormat::Json]
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// 文件名缺少对应扩展名时自动补上
    pub fn ensure_extension(&self, path: &Path) -> PathBuf {
        if ExportFormat::from_path(path) == Some(*self) {
            return path.to_path_buf();
        }
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }

    pub fn render(&self, mode: QueryMode, records: &[Record]) -> AppResult<String> {
        match self {
            ExportFormat::Csv => to_csv(mode, records),
            ExportFormat::Json => to_json(mode, records),
        }
    }
}

/// 所有记录必须属于 `mode`，否则字段名会错位
fn check_modes(mode: QueryMode, records: &[Record]) -> AppResult<()> {
    match records.iter().find(|r| r.mode() != mode) {
        Some(record) => Err(AppError::ExportModeMismatch {
            expected: mode,
            found: record.mode(),
        }),
        None => Ok(()),
    }
}

/// 表头为模式的 6 个字段名，其后每条记录一行
pub fn to_csv(mode: QueryMode, records: &[Record]) -> AppResult<String> {
    check_modes(mode, records)?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(mode.schema())?;
    for record in records {
        writer.write_record(record.values())?;
    }

    let buf = writer.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(buf).map_err(|e| AppError::Other(e.into()))
}

#[derive(Serialize)]
struct UsersDocument<'a> {
    users: Vec<BTreeMap<&'static str, &'a str>>,
}

/// `{"users": [...]}`，记录内的键按字典序排列，非 ASCII 字符原样输出
pub fn to_json(mode: QueryMode, records: &[Record]) -> AppResult<String> {
    check_modes(mode, records)?;

    let document = UsersDocument {
        users: records.iter().map(|record| record.fields().collect()).collect(),
    };

    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| AppError::Other(e.into()))
}
