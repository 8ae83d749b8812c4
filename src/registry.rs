// src/registry.rs

//! 查询模式注册表：每种模式可选的过滤维度、结果字段和接口路径。
//! 全部是编译期常量表，运行时不可变。

use crate::{
    constants::api::{fields, paths},
    models::{FilterKind, QueryMode},
};

const USER_SCHEMA: [&str; 6] = [
    fields::CALLSIGN,
    fields::ID,
    fields::CITY,
    fields::STATE,
    fields::COUNTRY,
    fields::SURNAME,
];

const REPEATER_SCHEMA: [&str; 6] = [
    fields::CALLSIGN,
    fields::ID,
    fields::CITY,
    fields::STATE,
    fields::COUNTRY,
    fields::FREQUENCY,
];

const USER_COLUMNS: [&str; 6] = ["Callsign", "ID", "City", "State", "Country", "Surname"];
const REPEATER_COLUMNS: [&str; 6] = ["Callsign", "ID", "City", "State", "Country", "Frequency"];

impl QueryMode {
    /// 该模式下可选的过滤维度，顺序与菜单一致
    pub fn filter_kinds(&self) -> &'static [FilterKind] {
        &FilterKind::ALL
    }

    /// 结果行的字段名，导出时也使用这组字段
    pub fn schema(&self) -> &'static [&'static str; 6] {
        if self.is_repeater() {
            &REPEATER_SCHEMA
        } else {
            &USER_SCHEMA
        }
    }

    /// 结果表格的列标题
    pub fn column_labels(&self) -> &'static [&'static str; 6] {
        if self.is_repeater() {
            &REPEATER_COLUMNS
        } else {
            &USER_COLUMNS
        }
    }

    pub fn base_path(&self) -> &'static str {
        match self {
            QueryMode::DmrUser => paths::DMR_USER,
            QueryMode::DmrRepeater => paths::DMR_REPEATER,
            QueryMode::NxdnUser => paths::NXDN_USER,
            QueryMode::CplusUser => paths::CPLUS_USER,
        }
    }

    /// 过滤维度在该模式下的显示名称
    pub fn filter_label(&self, kind: FilterKind) -> &'static str {
        match (self.is_repeater(), kind) {
            (false, FilterKind::Id) => "DMR ID of a user",
            (false, FilterKind::Callsign) => "DMR user callsign",
            (false, FilterKind::City) => "City",
            (false, FilterKind::Country) => "Country",
            (true, FilterKind::Id) => "DMR Repeater ID",
            (true, FilterKind::Callsign) => "Repeater callsign",
            (true, FilterKind::City) => "Repeater city",
            (true, FilterKind::Country) => "Repeater country",
        }
    }

    /// 次过滤可选的维度：全部维度去掉主过滤已占用的那一个
    pub fn secondary_kinds(&self, primary: FilterKind) -> Vec<FilterKind> {
        self.filter_kinds()
            .iter()
            .copied()
            .filter(|k| *k != primary)
            .collect()
    }
}

pub fn filter_kinds_for(mode: QueryMode) -> &'static [FilterKind] {
    mode.filter_kinds()
}

pub fn schema_for(mode: QueryMode) -> &'static [&'static str; 6] {
    mode.schema()
}

pub fn base_path_for(mode: QueryMode) -> &'static str {
    mode.base_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_per_mode() {
        for mode in [QueryMode::DmrUser, QueryMode::NxdnUser, QueryMode::CplusUser] {
            assert_eq!(
                schema_for(mode),
                &["callsign", "id", "city", "state", "country", "surname"]
            );
        }
        assert_eq!(
            schema_for(QueryMode::DmrRepeater),
            &["callsign", "id", "city", "state", "country", "frequency"]
        );
    }

    #[test]
    fn test_base_paths() {
        assert_eq!(base_path_for(QueryMode::DmrUser), "dmr/user/");
        assert_eq!(base_path_for(QueryMode::DmrRepeater), "dmr/repeater/");
        assert_eq!(base_path_for(QueryMode::NxdnUser), "nxdn/user/");
        assert_eq!(base_path_for(QueryMode::CplusUser), "cplus/user/");
    }

    #[test]
    fn test_every_mode_offers_all_four_kinds() {
        for mode in QueryMode::ALL {
            assert_eq!(filter_kinds_for(mode), &FilterKind::ALL);
        }
        // 中继台只是显示名称不同
        assert_eq!(QueryMode::DmrRepeater.filter_label(FilterKind::City), "Repeater city");
        assert_eq!(QueryMode::NxdnUser.filter_label(FilterKind::City), "City");
    }

    #[test]
    fn test_secondary_kinds_excludes_primary() {
        for mode in QueryMode::ALL {
            for primary in FilterKind::ALL {
                let secondary = mode.secondary_kinds(primary);
                assert_eq!(secondary.len(), 3);
                assert!(!secondary.contains(&primary));
            }
        }
        assert_eq!(
            QueryMode::DmrUser.secondary_kinds(FilterKind::Callsign),
            vec![FilterKind::Id, FilterKind::City, FilterKind::Country]
        );
    }
}
