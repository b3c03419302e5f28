use tokio::time;
use txbench_common::config::DrainConfig;
use txbench_rpc::NodeRpc;

use crate::status::poll_drained;

/// Block until the node reports no pending transactions. Returns the number
/// of status polls it took.
///
/// There is no upper bound: a node that never reports zero, or a status
/// endpoint that keeps returning garbage, keeps this loop spinning.
pub async fn wait_for_drain<R: NodeRpc>(rpc: &R, cfg: &DrainConfig) -> u64 {
    time::sleep(cfg.initial_delay()).await;
    let mut polls = 1;
    while !poll_drained(rpc, false).await {
        time::sleep(cfg.poll_interval()).await;
        polls += 1;
    }
    tracing::debug!(target: "poller", polls, "drained");
    polls
}
