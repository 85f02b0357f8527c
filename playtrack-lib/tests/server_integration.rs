//! Runs the full server, pollers included, against a mocked statistics API

use core::time::Duration;
use playtrack_lib::commands::{Config, run_server};
use playtrack_lib::poller::{DEFAULT_FETCH_TIMEOUT, RemoteClient, SystemClock};
use playtrack_lib::samples::TrackedKey;
use playtrack_lib::store::SampleStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(id: u64) -> TrackedKey {
    TrackedKey::new(id).expect("non-zero key")
}

async fn wait_for_samples(client: &reqwest::Client, url: &str, count: usize) -> Value {
    for _ in 0..100 {
        let body: Value = client.get(url).send().await.expect("request").json().await.expect("json body");
        if body.as_array().is_some_and(|samples| samples.len() >= count) {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("timed out waiting for {count} sample(s) at {url}");
}

#[tokio::test]
async fn test_server_polls_and_serves() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("universeIds", "111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"visits": 100, "playing": 10}]})))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(query_param("universeIds", "222"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;

    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let store = SampleStore::new(tmp.path());
    let config = Config {
        tracked_games: vec![key(111), key(222)],
        api_base_url: api.uri(),
        ..Config::default()
    };
    let source = RemoteClient::new(&config.api_base_url, DEFAULT_FETCH_TIMEOUT).expect("valid client");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("local address"));

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        run_server(&config, store, listener, Arc::new(source), Arc::new(SystemClock), async {
            let _ = stop_rx.await;
        })
        .await
    });

    let client = reqwest::Client::new();
    let history = wait_for_samples(&client, &format!("{base}/api/data/111"), 1).await;
    assert_eq!(history[0]["visits"], 100);
    assert_eq!(history[0]["playing"], 10);
    assert_eq!(history[0]["visitsGrowth"], 0.0);

    let resp = client.get(format!("{base}/api/data/222")).send().await.expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.expect("json body"), json!([]));

    let all: Value = client.get(format!("{base}/api/data")).send().await.expect("request").json().await.expect("json body");
    assert!(all.get("111").is_some());
    assert!(all.get("222").is_some());

    let resp = client.get(format!("{base}/api/data/999")).send().await.expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    stop_tx.send(()).expect("server still running");
    server.await.expect("server task").expect("server exits cleanly");
}
