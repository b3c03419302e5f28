//! Load drivers for a transaction-broadcasting node: a fixed-count burst
//! and a fixed-rate stream, both finishing with a drain-wait on the node's
//! pending-transaction count.

pub mod chunk;
pub mod drain;
pub mod fixed_count;
pub mod fixed_rate;
pub mod pace;
pub mod status;
pub mod submit;

pub use fixed_count::{run_fixed_count, FixedCountReport};
pub use fixed_rate::{run_fixed_rate, FixedRateReport};
