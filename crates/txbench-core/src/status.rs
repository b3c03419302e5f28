//! Decoding of the `num_unconfirmed_txs` reply and the drained check built on it.

use serde::Deserialize;
use txbench_common::{BenchError, Result};
use txbench_rpc::NodeRpc;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub jsonrpc: String,
    /// Nodes send either a string or a number here.
    pub id: serde_json::Value,
    pub result: StatusResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusResult {
    /// Pending transaction count, as a decimal string.
    pub n_txs: String,
    pub txs: Option<serde_json::Value>,
}

impl StatusResponse {
    pub fn decode(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn pending_count(&self) -> Result<u64> {
        self.result.n_txs.parse().map_err(|source| BenchError::PendingCount {
            value: self.result.n_txs.clone(),
            source,
        })
    }
}

pub fn pending_count(body: &[u8]) -> Result<u64> {
    StatusResponse::decode(body)?.pending_count()
}

/// True only when the body positively reports zero pending transactions.
/// Anything unreadable counts as still pending.
pub fn is_drained(body: &[u8]) -> bool {
    match pending_count(body) {
        Ok(n) => n == 0,
        Err(e) => {
            tracing::warn!(
                target: "poller",
                error = %e,
                body = %String::from_utf8_lossy(body),
                "cannot read pending count"
            );
            false
        }
    }
}

pub async fn poll_drained<R: NodeRpc>(rpc: &R, with_log: bool) -> bool {
    let body = match rpc.num_unconfirmed_txs().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(target: "poller", error = %e, "status query failed");
            return false;
        }
    };
    if with_log {
        tracing::info!(target: "poller", body = %String::from_utf8_lossy(&body), "has unconfirmed txs");
    }
    is_drained(&body)
}
