//! Client side of the two node RPC calls the benchmarks issue.

use std::future::Future;

use txbench_common::{BenchError, Result};

pub const BROADCAST_PATH: &str = "/broadcast_tx_async";
pub const STATUS_PATH: &str = "/num_unconfirmed_txs";

/// `<base>/broadcast_tx_async?tx="<payload>"`; the payload is sent as a quoted literal.
pub fn broadcast_url(base: &str, payload: &str) -> String {
    format!("{}{}?tx=\"{}\"", base.trim_end_matches('/'), BROADCAST_PATH, payload)
}

pub fn status_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), STATUS_PATH)
}

pub trait NodeRpc: Send + Sync {
    /// Fire one transaction. The response body is not inspected.
    fn broadcast_tx_async(&self, tx: &str) -> impl Future<Output = Result<()>> + Send;
    /// Raw body of the pending-transactions query.
    fn num_unconfirmed_txs(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpRpc {
    client: reqwest::Client,
    base: String,
}

impl HttpRpc {
    pub fn new(base: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base: base.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }
}

impl NodeRpc for HttpRpc {
    async fn broadcast_tx_async(&self, tx: &str) -> Result<()> {
        let url = broadcast_url(&self.base, tx);
        let resp = self.client.get(&url).send().await.map_err(|e| BenchError::transport(&url, e))?;
        let resp = resp.error_for_status().map_err(|e| BenchError::transport(&url, e))?;
        // read to the end so the connection goes back to the pool
        resp.bytes().await.map_err(|e| BenchError::transport(&url, e))?;
        tracing::trace!(target: "rpc", %url, "broadcast ok");
        Ok(())
    }

    async fn num_unconfirmed_txs(&self) -> Result<Vec<u8>> {
        let url = status_url(&self.base);
        let resp = self.client.get(&url).send().await.map_err(|e| BenchError::transport(&url, e))?;
        let body = resp.bytes().await.map_err(|e| BenchError::transport(&url, e))?;
        Ok(body.to_vec())
    }
}

#[cfg(feature = "mock")]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    /// In-memory node. Status bodies are served from a script first; once
    /// it runs dry the node reports `expected - submitted` pending txs.
    #[derive(Clone, Default)]
    pub struct MockRpc {
        state: Arc<Mutex<State>>,
    }

    #[derive(Default)]
    struct State {
        submitted: Vec<String>,
        script: VecDeque<Vec<u8>>,
        expected: u64,
        status_calls: usize,
        fail_broadcasts: bool,
    }

    pub fn status_body(pending: u64) -> String {
        format!(r#"{{"jsonrpc":"2.0","id":"","result":{{"n_txs":"{pending}","txs":null}}}}"#)
    }

    impl MockRpc {
        pub fn new() -> Self { Self::default() }

        pub fn draining(expected: u64) -> Self {
            let rpc = Self::new();
            rpc.lock().expected = expected;
            rpc
        }

        pub fn scripted<I, S>(bodies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<Vec<u8>>,
        {
            let rpc = Self::new();
            rpc.lock().script = bodies.into_iter().map(Into::into).collect();
            rpc
        }

        pub fn failing_broadcasts(self) -> Self {
            self.lock().fail_broadcasts = true;
            self
        }

        pub fn submitted(&self) -> Vec<String> { self.lock().submitted.clone() }

        pub fn status_calls(&self) -> usize { self.lock().status_calls }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl NodeRpc for MockRpc {
        async fn broadcast_tx_async(&self, tx: &str) -> Result<()> {
            let mut st = self.lock();
            if st.fail_broadcasts {
                return Err(BenchError::transport(broadcast_url("mock://node", tx), "connection refused"));
            }
            st.submitted.push(tx.to_string());
            Ok(())
        }

        async fn num_unconfirmed_txs(&self) -> Result<Vec<u8>> {
            let mut st = self.lock();
            st.status_calls += 1;
            if let Some(body) = st.script.pop_front() {
                return Ok(body);
            }
            let pending = st.expected.saturating_sub(st.submitted.len() as u64);
            Ok(status_body(pending).into_bytes())
        }
    }
}
