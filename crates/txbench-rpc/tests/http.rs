use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use txbench_common::BenchError;
use txbench_rpc::{HttpRpc, NodeRpc};

#[derive(Clone, Default)]
struct FakeNode {
    txs: Arc<Mutex<Vec<String>>>,
}

async fn broadcast(State(node): State<FakeNode>, Query(q): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let tx = q.get("tx").cloned().unwrap_or_default();
    node.txs.lock().unwrap().push(tx);
    Json(serde_json::json!({"jsonrpc": "2.0", "id": "", "result": {"code": 0}}))
}

async fn num_unconfirmed(State(node): State<FakeNode>) -> Json<serde_json::Value> {
    let n = node.txs.lock().unwrap().len();
    Json(serde_json::json!({"jsonrpc": "2.0", "id": "", "result": {"n_txs": n.to_string(), "txs": null}}))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap(); });
    format!("http://{}:{}", addr.ip(), addr.port())
}

#[tokio::test]
async fn broadcast_and_status_round_trip() {
    let node = FakeNode::default();
    let app = Router::new()
        .route("/broadcast_tx_async", get(broadcast))
        .route("/num_unconfirmed_txs", get(num_unconfirmed))
        .with_state(node.clone());
    let rpc = HttpRpc::new(spawn(app).await);

    rpc.broadcast_tx_async("1700000000000000000042").await.unwrap();
    assert_eq!(node.txs.lock().unwrap().as_slice(), ["\"1700000000000000000042\""]);

    let body = rpc.num_unconfirmed_txs().await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["result"]["n_txs"], "1");
}

#[tokio::test]
async fn error_status_is_transport_error() {
    let app = Router::new().route("/broadcast_tx_async", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let rpc = HttpRpc::new(spawn(app).await);
    let err = rpc.broadcast_tx_async("1").await.unwrap_err();
    assert!(matches!(err, BenchError::Transport { .. }));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let rpc = HttpRpc::new(format!("http://{}:{}", addr.ip(), addr.port()));
    match rpc.num_unconfirmed_txs().await {
        Err(BenchError::Transport { url, .. }) => assert!(url.ends_with("/num_unconfirmed_txs")),
        other => panic!("expected transport error, got {other:?}"),
    }
}
