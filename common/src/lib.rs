pub mod metrics;
pub mod tracer;

use clap::Args;
use std::net::SocketAddr;

pub type Real = f64;
pub type HitCount = u32;
pub type Version = u64;

/// Any value below this magnitude is treated as zero when used as a divisor.
pub const EPSILON: Real = 1e-10;

#[derive(Clone, Debug, Args)]
pub struct CommonOpts {
    /// Endpoint on which Prometheus metrics are served, metrics are not exported if omitted
    #[clap(long, env = "PROBESCOPE_OBSERVABILITY_ADDRESS")]
    pub observability_address: Option<SocketAddr>,

    /// Disable ANSI colour codes in the log output
    #[clap(long, env = "PROBESCOPE_NO_ANSI")]
    pub no_ansi: bool,
}
