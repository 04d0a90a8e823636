use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scantrace")]
#[command(about = "Launch remote security scans and watch the agent work", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Job service base URL (overrides env and config file)")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Launch a scan and watch it until it finishes")]
    Scan {
        #[arg(help = "Local checkout whose 'origin' remote is the scan target")]
        path: Option<PathBuf>,

        #[arg(long, help = "Repository URL to scan (takes precedence over [PATH])")]
        repo: Option<String>,

        #[arg(long, help = "Agent profile to run the scan with")]
        agent: Option<String>,

        #[arg(long, help = "Suppress live output and emit one JSON document at the end")]
        json: bool,

        #[arg(long, help = "Plain line-oriented output without ANSI color")]
        ci: bool,

        #[arg(
            long,
            help = "Detach after this many seconds; the scan keeps running remotely"
        )]
        timeout: Option<u64>,
    },

    #[command(about = "Attach to an existing scan and stream its trace")]
    Watch {
        #[arg(help = "Scan identifier, as printed at launch")]
        scan_id: String,

        #[arg(long, help = "Suppress live output and emit one JSON document at the end")]
        json: bool,

        #[arg(long, help = "Plain line-oriented output without ANSI color")]
        ci: bool,

        #[arg(
            long,
            help = "Detach after this many seconds; the scan keeps running remotely"
        )]
        timeout: Option<u64>,
    },
}
