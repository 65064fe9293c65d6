use tokio::net::TcpListener;

use lemmata::config::Config;
use lemmata::startup::build_app;

use super::harness::TestCorpus;

/// Start a server over `corpus` with an optional config tweak, returning the base URL.
pub async fn start_test_server_with(corpus: &TestCorpus, tweak: impl FnOnce(&mut Config)) -> String {
    let mut config = corpus.config();
    tweak(&mut config);

    let app = build_app(config).expect("failed to build app");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Start a server over `corpus` with its default config.
pub async fn start_test_server(corpus: &TestCorpus) -> String {
    start_test_server_with(corpus, |_| {}).await
}

/// GET `/search` with the given raw query pairs.
pub async fn search(base_url: &str, params: &[(&str, &str)]) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .get(format!("{base_url}/search"))
        .query(params)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}
