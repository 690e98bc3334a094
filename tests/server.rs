//! End-to-end test over a real TCP listener.

use std::time::Duration;
use tokio::net::TcpListener;

use travel_companion::http::HttpServer;
use travel_companion::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_serves_and_shuts_down_gracefully() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(common::test_config()).unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.wait()));

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{}/routes/classify?path=/dashboard/trip", addr))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("x-request-id"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["owner"], "USER");

    drop(client);
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}
