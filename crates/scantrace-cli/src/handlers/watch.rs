use super::WatchOpts;
use crate::config::Settings;
use anyhow::{Context, Result};
use scantrace_client::HttpTransport;
use scantrace_types::ScanId;

pub fn handle(settings: &Settings, scan_id: String, opts: WatchOpts) -> Result<i32> {
    let transport = HttpTransport::new(&settings.api_url, settings.api_key.clone())
        .context("failed to build HTTP client")?;
    let scan_id = ScanId::new(scan_id);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(super::run_watch(&transport, &scan_id, &opts))
}
