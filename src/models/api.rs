// src/models/api.rs

use serde::Deserialize;
use serde_json::Number;
use std::fmt;

// --- RadioID 查询接口的单条结果 ---

/// `id` 字段在不同接口中可能是数字也可能是字符串
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IdValue {
    Number(Number),
    Text(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Number(n) => write!(f, "{}", n),
            IdValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LookupEntry {
    pub callsign: String,
    pub id: IdValue,
    pub city: String,
    pub state: String,
    pub country: String,
    // 用户模式才有
    pub surname: Option<String>,
    // 中继台模式才有
    pub frequency: Option<String>,
}
