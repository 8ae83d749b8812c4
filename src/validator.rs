// src/validator.rs

use crate::{
    error::{AppError, AppResult},
    models::{FilterKind, FilterSelection},
};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9%]{1,7}$").unwrap());
static CALLSIGN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9A-Z%]{1,20}$").unwrap());
// 城市与国家共用同一规则
static PLACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z \-%]{1,20}$").unwrap());

fn pattern_for(kind: FilterKind) -> &'static Regex {
    match kind {
        FilterKind::Id => &ID_RE,
        FilterKind::Callsign => &CALLSIGN_RE,
        FilterKind::City | FilterKind::Country => &PLACE_RE,
    }
}

/// 检查用户输入是否符合该维度的字符集与长度要求
pub fn validate(kind: FilterKind, raw: &str) -> bool {
    pattern_for(kind).is_match(raw)
}

impl FilterSelection {
    /// 只有通过校验的输入才能构造出 FilterSelection
    pub fn new(kind: FilterKind, raw: &str) -> AppResult<Self> {
        if !validate(kind, raw) {
            debug!("过滤值 '{}' 未通过 {} 校验", raw, kind);
            return Err(AppError::Validation {
                kind,
                value: raw.to_string(),
            });
        }
        Ok(Self {
            kind,
            raw_value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_length_boundaries() {
        assert!(!validate(FilterKind::Id, ""));
        assert!(validate(FilterKind::Id, "1"));
        assert!(validate(FilterKind::Id, "1234567"));
        assert!(!validate(FilterKind::Id, "12345678"));
        assert!(validate(FilterKind::Id, "302%"));
        assert!(validate(FilterKind::Id, "%"));
    }

    #[test]
    fn test_id_rejects_non_digits() {
        assert!(!validate(FilterKind::Id, "30a1"));
        assert!(!validate(FilterKind::Id, " 3021"));
        assert!(!validate(FilterKind::Id, "-1"));
    }

    #[test]
    fn test_text_length_boundaries() {
        let twenty = "A".repeat(20);
        let twenty_one = "A".repeat(21);
        for kind in [FilterKind::Callsign, FilterKind::City, FilterKind::Country] {
            assert!(!validate(kind, ""), "{kind} 应拒绝空串");
            assert!(validate(kind, "A"), "{kind} 应接受 1 个字符");
            assert!(validate(kind, &twenty), "{kind} 应接受 20 个字符");
            assert!(!validate(kind, &twenty_one), "{kind} 应拒绝 21 个字符");
        }
    }

    #[test]
    fn test_callsign_charset() {
        assert!(validate(FilterKind::Callsign, "F4ABC"));
        assert!(validate(FilterKind::Callsign, "F4%"));
        assert!(!validate(FilterKind::Callsign, "f4abc"));
        assert!(!validate(FilterKind::Callsign, "F4-ABC"));
        assert!(!validate(FilterKind::Callsign, "F4 ABC"));
    }

    #[test]
    fn test_place_charset() {
        for kind in [FilterKind::City, FilterKind::Country] {
            assert!(validate(kind, "Saint-Etienne"));
            assert!(validate(kind, "united kingdom"));
            assert!(validate(kind, "Fr%"));
            assert!(!validate(kind, "Paris 75"));
            assert!(!validate(kind, "Paris!"));
            assert!(!validate(kind, "Zürich"));
        }
    }

    #[test]
    fn test_filter_selection_requires_valid_input() {
        assert!(FilterSelection::new(FilterKind::Id, "3021").is_ok());
        let err = FilterSelection::new(FilterKind::Callsign, "f4abc").unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation { kind: FilterKind::Callsign, ref value } if value == "f4abc"
        ));
    }
}
