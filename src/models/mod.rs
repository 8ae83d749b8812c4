// src/models/mod.rs

pub mod api;

use crate::{constants::api::params, error::AppError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// 1. 查询模式：同一时刻只有一个处于激活状态
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    #[default]
    #[value(name = "dmr-user")]
    DmrUser,
    #[value(name = "dmr-repeater")]
    DmrRepeater,
    #[value(name = "nxdn-user")]
    NxdnUser,
    #[value(name = "cplus-user")]
    CplusUser,
}

impl QueryMode {
    pub const ALL: [QueryMode; 4] = [
        QueryMode::DmrUser,
        QueryMode::DmrRepeater,
        QueryMode::NxdnUser,
        QueryMode::CplusUser,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            QueryMode::DmrUser => "DMR user",
            QueryMode::DmrRepeater => "DMR repeater",
            QueryMode::NxdnUser => "NXDN user",
            QueryMode::CplusUser => "C+ user",
        }
    }

    pub fn is_repeater(&self) -> bool {
        matches!(self, QueryMode::DmrRepeater)
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// 2. 过滤维度，每种维度对应一个 URL 参数名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Id,
    Callsign,
    City,
    Country,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Id,
        FilterKind::Callsign,
        FilterKind::City,
        FilterKind::Country,
    ];

    pub fn param_name(&self) -> &'static str {
        match self {
            FilterKind::Id => params::ID,
            FilterKind::Callsign => params::CALLSIGN,
            FilterKind::City => params::CITY,
            FilterKind::Country => params::COUNTRY,
        }
    }

    /// 输入框的占位提示
    pub fn placeholder(&self) -> &'static str {
        match self {
            FilterKind::Id => "ID",
            FilterKind::Callsign => "CALLSIGN",
            FilterKind::City => "CITY",
            FilterKind::Country => "COUNTRY",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

impl FromStr for FilterKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|k| k.param_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::UserInputError(format!(
                    "未知的过滤维度 '{}'，可选: id, callsign, city, country",
                    s
                ))
            })
    }
}

// 3. 一个已激活的过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub kind: FilterKind,
    pub raw_value: String,
}

impl FromStr for FilterSelection {
    type Err = AppError;

    /// 解析 `KIND=VALUE` 形式的命令行参数，并立即进行校验
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s.split_once('=').ok_or_else(|| {
            AppError::UserInputError(format!("过滤条件 '{}' 应为 KIND=VALUE 格式", s))
        })?;
        FilterSelection::new(kind.parse()?, value)
    }
}

// 4. 一次完整的查询：模式 + 主过滤 + 可选的次过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuery {
    pub mode: QueryMode,
    pub primary: FilterSelection,
    pub secondary: Option<FilterSelection>,
}

impl ActiveQuery {
    pub fn new(mode: QueryMode, primary: FilterSelection) -> Self {
        Self {
            mode,
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: FilterSelection) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

/// QueryBuilder 的输出：完整路径和有序的查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// 按 `path?p1=v1&p2=v2` 的形式拼接，参数值原样写入
    pub fn url(&self) -> String {
        let mut url = self.path.clone();
        for (i, (name, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
        url
    }
}

// 5. 一行结果，字段顺序由模式决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    mode: QueryMode,
    values: [String; 6],
}

impl Record {
    pub fn new(mode: QueryMode, values: [String; 6]) -> Self {
        Self { mode, values }
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn values(&self) -> &[String; 6] {
        &self.values
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.mode
            .schema()
            .iter()
            .position(|f| *f == field)
            .map(|i| self.values[i].as_str())
    }

    /// 按模式的字段顺序返回 (字段名, 值)
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.mode
            .schema()
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

/// 一次成功查询的完整结果，宿主每次整体替换
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    pub mode: QueryMode,
    pub records: Vec<Record>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
