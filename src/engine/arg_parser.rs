use clap::Parser;

use crate::utils::config::ScanConsts;

/// Parallel keyword scanner for remote content catalogs.
#[derive(Clone, Parser)]
#[command(name = "catscan")]
#[command(about = "Scan a catalog for items whose titles match a keyword list.")]
pub struct Cli {
    /// Catalog host or base URL, e.g. catalog.example.org or https://catalog.example.org
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Catalog username. Prompted for when omitted.
    #[arg(long, short)]
    pub user: Option<String>,

    /// Number of date-range partitions for enumeration.
    #[arg(long, short = 'p', default_value_t = ScanConsts::DEFAULT_PARTITIONS)]
    pub partitions: usize,

    /// Worker threads per pool. Default: one per host core.
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Per-item metadata fetch deadline in seconds.
    #[arg(long, short = 't', default_value_t = ScanConsts::FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,

    /// Earliest creation date to enumerate (YYYY-MM-DD). Default: catalog launch.
    #[arg(long)]
    pub from_date: Option<String>,

    /// Extra keywords appended to the built-in list. Can specify multiple: -k kw1 kw2
    #[arg(long, short = 'k', num_args = 1..)]
    pub keywords: Vec<String>,

    /// Hide the per-stage progress counters.
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
