// src/downloader/assets.rs

use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// RadioID 提供的四个静态数据文件
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Asset {
    #[value(name = "users.json")]
    UsersJson,
    #[value(name = "user.csv")]
    UsersCsv,
    #[value(name = "rptrs.json")]
    RptrsJson,
    #[value(name = "dmrid.dat")]
    DmridDat,
}

impl Asset {
    pub const ALL: [Asset; 4] = [
        Asset::UsersJson,
        Asset::UsersCsv,
        Asset::RptrsJson,
        Asset::DmridDat,
    ];

    /// `static_base_url` 需以 `/` 结尾
    pub fn url(&self, static_base_url: &str) -> String {
        format!("{}{}", static_base_url, self.file_name())
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Asset::UsersJson => "users.json",
            Asset::UsersCsv => "user.csv",
            Asset::RptrsJson => "rptrs.json",
            Asset::DmridDat => "dmrid.dat",
        }
    }

    pub fn destination(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_urls() {
        let base = crate::constants::DEFAULT_STATIC_BASE_URL;
        assert_eq!(Asset::UsersJson.url(base), "https://radioid.net/static/users.json");
        assert_eq!(Asset::UsersCsv.url(base), "https://radioid.net/static/user.csv");
        assert_eq!(Asset::RptrsJson.url(base), "https://radioid.net/static/rptrs.json");
        assert_eq!(Asset::DmridDat.url(base), "https://radioid.net/static/dmrid.dat");
        assert_eq!(
            Asset::UsersCsv.destination(Path::new("data_files")),
            PathBuf::from("data_files/user.csv")
        );
    }
}
