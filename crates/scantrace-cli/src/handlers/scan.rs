use super::WatchOpts;
use crate::config::Settings;
use crate::presentation::ConsoleView;
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use scantrace_client::transport::{LaunchRequest, ScanTransport};
use scantrace_client::HttpTransport;
use std::path::PathBuf;

pub struct ScanArgs {
    pub path: Option<PathBuf>,
    pub repo: Option<String>,
    pub agent: Option<String>,
    pub watch: WatchOpts,
}

pub fn handle(settings: &Settings, args: ScanArgs) -> Result<i32> {
    let repo_url = resolve_repo_url(args.repo, args.path)?;
    let transport = HttpTransport::new(&settings.api_url, settings.api_key.clone())
        .context("failed to build HTTP client")?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let launch = transport
            .launch(&LaunchRequest {
                repo_url: repo_url.clone(),
                agent: args.agent,
            })
            .await
            .context("failed to launch scan")?;

        if !args.watch.json {
            let view = ConsoleView::new(args.watch.ci);
            view.render_launch(&repo_url, &launch.scan_id, launch.project_id.as_deref());
        }

        super::run_watch(&transport, &launch.scan_id, &args.watch).await
    })
}

static URL_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^url\s*=\s*(.+)$").expect("valid regex"));

/// Explicit `--repo` wins; otherwise the target is the `origin` remote of
/// the checkout at `path` (default: current directory).
fn resolve_repo_url(repo: Option<String>, path: Option<PathBuf>) -> Result<String> {
    if let Some(url) = repo {
        return Ok(url);
    }

    let root = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let git_config = root.join(".git").join("config");
    let content = std::fs::read_to_string(&git_config).with_context(|| {
        format!(
            "no --repo given and {} is not a git checkout",
            root.display()
        )
    })?;

    match parse_origin_url(&content) {
        Some(url) => Ok(url),
        None => bail!("no 'origin' remote found in {}", git_config.display()),
    }
}

fn parse_origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;
    for line in config.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            in_origin = trimmed == r#"[remote "origin"]"#;
            continue;
        }
        if in_origin
            && let Some(caps) = URL_LINE.captures(trimmed)
        {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}
