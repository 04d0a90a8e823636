use super::args::{Cli, Commands};
use super::config::Settings;
use super::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<i32> {
    let settings = Settings::resolve(cli.api_url)?;

    match cli.command {
        Commands::Scan {
            path,
            repo,
            agent,
            json,
            ci,
            timeout,
        } => handlers::scan::handle(
            &settings,
            handlers::scan::ScanArgs {
                path,
                repo,
                agent,
                watch: handlers::WatchOpts { json, ci, timeout },
            },
        ),

        Commands::Watch {
            scan_id,
            json,
            ci,
            timeout,
        } => handlers::watch::handle(&settings, scan_id, handlers::WatchOpts { json, ci, timeout }),
    }
}
