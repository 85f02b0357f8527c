//! Drives the command-line entry point against a mocked statistics API

use playtrack_lib::{Host, run};
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct CaptureHost {
    output: Vec<u8>,
    error: Vec<u8>,
    exit_code: Option<i32>,
}

impl Host for CaptureHost {
    fn output(&mut self) -> impl Write {
        &mut self.output
    }

    fn error(&mut self) -> impl Write {
        &mut self.error
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

impl CaptureHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

fn write_config(dir: &Path, api: &str, games: &[u64]) -> String {
    let path = dir.join("playtrack.toml");
    let data_dir = dir.join("data");
    let games: Vec<String> = games.iter().map(ToString::to_string).collect();
    std::fs::write(
        &path,
        format!(
            "tracked_games = [{}]\napi_base_url = '{api}'\ndata_dir = '{}'\n",
            games.join(", "),
            data_dir.display()
        ),
    )
    .expect("write config");
    path.to_string_lossy().into_owned()
}

async fn mock_game(server: &MockServer, id: u64, visits: u64, playing: u64) {
    Mock::given(method("GET"))
        .and(query_param("universeIds", id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"visits": visits, "playing": playing}]})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_poll_then_show() {
    let api = MockServer::start().await;
    mock_game(&api, 111, 100, 10).await;

    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write_config(tmp.path(), &api.uri(), &[111]);

    let mut host = CaptureHost::default();
    run(&mut host, ["playtrack", "poll", "-c", &config, "--log-level", "none"])
        .await
        .expect("poll succeeds");
    assert!(host.output_str().contains("Recorded 1 of 1"));
    assert!(tmp.path().join("data").join("111.json").exists());

    let mut host = CaptureHost::default();
    run(&mut host, ["playtrack", "show", "111", "-c", &config, "--log-level", "none"])
        .await
        .expect("show succeeds");
    let history: Value = serde_json::from_str(&host.output_str()).expect("JSON output");
    assert_eq!(history.as_array().expect("array").len(), 1);
    assert_eq!(history[0]["visits"], 100);

    let mut host = CaptureHost::default();
    run(&mut host, ["playtrack", "show", "111", "--growth", "-c", &config, "--log-level", "none"])
        .await
        .expect("show succeeds");
    let growth: Value = serde_json::from_str(&host.output_str()).expect("JSON output");
    assert_eq!(growth[0].as_object().expect("object").len(), 3);
}

#[tokio::test]
async fn test_poll_reports_failed_games() {
    let api = MockServer::start().await;
    mock_game(&api, 111, 100, 10).await;
    Mock::given(method("GET"))
        .and(query_param("universeIds", "222"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;

    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write_config(tmp.path(), &api.uri(), &[111, 222]);

    let mut host = CaptureHost::default();
    let result = run(&mut host, ["playtrack", "poll", "-c", &config, "--log-level", "none"]).await;

    assert!(result.is_err());
    assert!(host.output_str().contains("Recorded 1 of 2"));
    assert!(tmp.path().join("data").join("111.json").exists());
    assert!(!tmp.path().join("data").join("222.json").exists());
}

#[tokio::test]
async fn test_show_untracked_game_fails() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write_config(tmp.path(), "http://127.0.0.1:9", &[111]);

    let mut host = CaptureHost::default();
    let result = run(&mut host, ["playtrack", "show", "999", "-c", &config, "--log-level", "none"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_poll_requires_games() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write_config(tmp.path(), "http://127.0.0.1:9", &[]);

    let mut host = CaptureHost::default();
    let result = run(&mut host, ["playtrack", "poll", "-c", &config, "--log-level", "none"]).await;
    assert!(result.is_err());
    assert!(host.exit_code.is_none());
}
