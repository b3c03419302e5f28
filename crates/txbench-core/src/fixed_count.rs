//! Fire a fixed number of transactions from concurrent workers and time how
//! long the node takes to absorb them.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::time::Instant;
use txbench_common::config::{DrainConfig, FixedCountConfig};
use txbench_rpc::NodeRpc;

use crate::chunk::plan_chunks;
use crate::drain::wait_for_drain;
use crate::pace::achieved_rate;
use crate::submit::submit_tx;

#[derive(Debug, Clone)]
pub struct FixedCountReport {
    pub total: u64,
    pub workers: usize,
    /// Submissions the workers had finished when the node reported drained.
    pub submitted: u64,
    pub elapsed: Duration,
}

impl FixedCountReport {
    pub fn throughput(&self) -> f64 {
        achieved_rate(self.total, self.elapsed)
    }
}

/// Completion counter shared by all workers.
#[derive(Debug, Clone)]
pub struct Progress {
    done: Arc<AtomicU64>,
    step: u64,
}

impl Progress {
    pub fn new(step: u64) -> Self {
        Self { done: Arc::new(AtomicU64::new(0)), step: step.max(1) }
    }

    pub fn record(&self) -> u64 {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.step == 0 {
            tracing::info!(target: "fixed_count", done, "already done");
        }
        done
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

pub async fn run_fixed_count<R>(rpc: R, cfg: &FixedCountConfig, drain: &DrainConfig) -> FixedCountReport
where
    R: NodeRpc + Clone + 'static,
{
    let chunks = plan_chunks(cfg.total_requests, cfg.worker_chunks());
    let progress = Progress::new(cfg.log_step);
    let start = Instant::now();

    // Handles are dropped on purpose: the drain-wait is the only join point.
    for chunk in chunks.iter().copied() {
        let rpc = rpc.clone();
        let progress = progress.clone();
        tokio::spawn(async move {
            tracing::info!(target: "fixed_count", from = chunk.from, to = chunk.to - 1, "tx range");
            for n in chunk.indices() {
                submit_tx(&rpc, n).await;
                progress.record();
            }
        });
    }

    wait_for_drain(&rpc, drain).await;

    FixedCountReport {
        total: cfg.total_requests,
        workers: chunks.len(),
        submitted: progress.done(),
        elapsed: start.elapsed(),
    }
}
