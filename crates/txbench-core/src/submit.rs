use std::time::{SystemTime, UNIX_EPOCH};

use txbench_rpc::NodeRpc;

/// Epoch nanoseconds followed by the index. The time part stays 19 digits
/// wide until 2286, so two payloads can't collide by concatenation.
pub fn payload(epoch_nanos: u128, n: u64) -> String {
    format!("{epoch_nanos}{n}")
}

pub fn fresh_payload(n: u64) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    payload(nanos, n)
}

/// Broadcast one transaction for index `n`. Failures are logged and dropped;
/// only the final drain poll tells whether submissions landed.
pub async fn submit_tx<R: NodeRpc>(rpc: &R, n: u64) {
    let tx = fresh_payload(n);
    if let Err(e) = rpc.broadcast_tx_async(&tx).await {
        tracing::warn!(target: "rpc", n, error = %e, "broadcast failed");
    }
}
