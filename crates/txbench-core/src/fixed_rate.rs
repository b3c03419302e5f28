//! Submit one transaction per tick at a fixed rate until the run times out.

use std::time::Duration;

use tokio::time::{self, Instant};
use txbench_common::config::{DrainConfig, FixedRateConfig};
use txbench_rpc::NodeRpc;

use crate::drain::wait_for_drain;
use crate::pace::{achieved_rate, tick_interval};
use crate::status::poll_drained;
use crate::submit::submit_tx;

#[derive(Debug, Clone)]
pub struct FixedRateReport {
    pub iterations: u64,
    /// Sum of per-round times (tick wait plus submission).
    pub round_time_total: Duration,
    /// Wall-clock length of the submission loop, drain excluded.
    pub elapsed: Duration,
}

impl FixedRateReport {
    pub fn achieved_rate(&self) -> f64 {
        achieved_rate(self.iterations, self.elapsed)
    }
}

pub async fn run_fixed_rate<R: NodeRpc>(rpc: &R, cfg: &FixedRateConfig, drain: &DrainConfig) -> FixedRateReport {
    let rate = cfg.target_rate.max(1);
    let health_every = rate.saturating_mul(10);

    let deadline = time::sleep(cfg.timeout());
    tokio::pin!(deadline);
    let period = tick_interval(rate);

    let mut i: u64 = 0;
    let mut round_time_total = Duration::ZERO;
    let main_start = Instant::now();
    // First submission one period in. Each later one is due a full period
    // after the previous one started, so a late round is never made up.
    let mut next_tick = main_start + period;

    loop {
        let round_start = Instant::now();
        tokio::select! {
            biased;
            _ = &mut deadline => break,
            _ = time::sleep_until(next_tick) => {
                next_tick = Instant::now() + period;
                submit_tx(rpc, i).await;
            }
        }
        let end = Instant::now();
        let round_time = end - round_start;
        round_time_total += round_time;

        if i % rate == 0 {
            let elapsed = end - main_start;
            tracing::info!(
                target: "fixed_rate",
                round = i,
                ?round_time,
                ?elapsed,
                rps = achieved_rate(i + 1, elapsed),
                "round report"
            );
        }
        if i % health_every == 0 {
            poll_drained(rpc, true).await;
        }
        i += 1;
    }
    let elapsed = main_start.elapsed();

    wait_for_drain(rpc, drain).await;

    FixedRateReport { iterations: i, round_time_total, elapsed }
}
