// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

// 每个测试使用独立的 HOME，避免读写真实的配置文件
fn main_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .current_dir(home.path());
    cmd
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"))
        .stdout(predicate::str::contains("-s -f id=3021"));
}

#[test]
fn test_missing_action_shows_help() {
    let home = tempdir().unwrap();
    main_command(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: radioid-finder"));
}

#[test]
fn test_search_requires_filter() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--filter <KIND=VALUE>"));
}

#[test]
fn test_invalid_filter_is_rejected_before_any_request() {
    let home = tempdir().unwrap();
    main_command(&home)
        .args(["-s", "-f", "id=12345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("输入校验失败"));
}

#[test]
fn test_third_filter_is_rejected() {
    let home = tempdir().unwrap();
    main_command(&home)
        .args(["-s", "-f", "id=1", "-f", "city=Paris", "-f", "country=France"])
        .args(["--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("最多只能同时使用两个过滤条件"));
}

#[test]
fn test_list_assets_creates_default_config() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--list-assets")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://radioid.net/static/users.json"))
        .stdout(predicate::str::contains("dmrid.dat"));

    let config_path = home.path().join(".radioid-finder").join("config.json");
    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("https://radioid.net/api/"));
}

// --- 测试核心分发逻辑 ---

#[test]
fn test_search_dispatch_and_export() {
    let home = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let body = fs::read_to_string("tests/fixtures/dmr_user_response.json").unwrap();
    let mock = server
        .mock("GET", "/dmr/user/")
        .match_query(Matcher::UrlEncoded("id".into(), "3021".into()))
        .with_status(200)
        .with_body(body)
        .create();

    main_command(&home)
        .args(["-s", "-f", "id=3021", "-e", "results", "--format", "json"])
        .args(["--base-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("F4ABC"))
        .stdout(predicate::str::contains("共 2 条结果"));

    mock.assert();
    let exported = fs::read_to_string(home.path().join("results.json")).unwrap();
    assert!(exported.starts_with("{\n    \"users\": ["));
    assert!(exported.contains("\"surname\": \"Doe\""));
}

#[test]
fn test_search_server_error_exits_with_failure() {
    let home = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/dmr/repeater/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    main_command(&home)
        .args(["-s", "-m", "dmr-repeater", "-f", "country=France"])
        .args(["--base-url", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("500"));
}

#[test]
fn test_download_dispatch_uses_configured_static_url() {
    let home = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/static/rptrs.json")
        .with_status(200)
        .with_body("{\"rptrs\": []}")
        .create();

    let config_dir = home.path().join(".radioid-finder");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.json"),
        format!(
            "{{\"network\": {{\"static_base_url\": \"{}/static\"}}, \"chunk_size\": 4}}",
            server.url()
        ),
    )
    .unwrap();

    let data_dir = home.path().join("downloads");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("rptrs.json"), "stale").unwrap();

    main_command(&home)
        .args(["-d", "rptrs.json", "-y", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("下载成功"));

    mock.assert();
    // 覆盖时先删除旧文件，再以追加方式写入
    let content = fs::read_to_string(data_dir.join("rptrs.json")).unwrap();
    assert_eq!(content, "{\"rptrs\": []}");
}
