// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_BASE_URL: &str = "https://radioid.net/api/";
pub const DEFAULT_STATIC_BASE_URL: &str = "https://radioid.net/static/";
pub const DEFAULT_DATA_DIR: &str = "data_files";
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());

/// 通配符，由 RadioID API 解释为模糊匹配
pub const WILDCARD: char = '%';

pub mod api {
    pub mod paths {
        pub const DMR_USER: &str = "dmr/user/";
        pub const DMR_REPEATER: &str = "dmr/repeater/";
        pub const NXDN_USER: &str = "nxdn/user/";
        pub const CPLUS_USER: &str = "cplus/user/";
    }
    pub mod params {
        pub const ID: &str = "id";
        pub const CALLSIGN: &str = "callsign";
        pub const CITY: &str = "city";
        pub const COUNTRY: &str = "country";
    }
    pub mod fields {
        pub const RESULTS: &str = "results";
        pub const CALLSIGN: &str = "callsign";
        pub const ID: &str = "id";
        pub const CITY: &str = "city";
        pub const STATE: &str = "state";
        pub const COUNTRY: &str = "country";
        pub const SURNAME: &str = "surname";
        pub const FREQUENCY: &str = "frequency";
    }
}
