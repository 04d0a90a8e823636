use chrono::TimeZone;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use scantrace_client::ScanSnapshot;
use scantrace_types::{Action, ActionPayload, Report, ScanId, single_line, truncate};

/// Line-oriented console renderer for live scan traces.
///
/// One line per action as it arrives, a summary block at the end. Color is
/// dropped in `--ci` mode and whenever stdout is not a terminal.
pub struct ConsoleView {
    color: bool,
    width: usize,
}

impl ConsoleView {
    pub fn new(ci: bool) -> Self {
        let color = !ci && std::io::stdout().is_terminal();
        let width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(100);
        Self { color, width }
    }

    pub fn render_launch(&self, repo_url: &str, scan_id: &ScanId, project_id: Option<&str>) {
        println!("Scanning {}", self.bold(repo_url));
        println!("  scan id: {}", scan_id);
        if let Some(project) = project_id {
            println!("  project: {}", project);
        }
        println!();
    }

    /// Print actions the previous call has not rendered yet. Returns the new
    /// rendered count. The buffer only grows, so `from` is a plain index.
    pub fn render_actions_from(&self, snapshot: &ScanSnapshot, from: usize) -> usize {
        for action in snapshot.actions.iter().skip(from) {
            println!("{}", self.action_line(action));
        }
        snapshot.actions.len()
    }

    fn action_line(&self, action: &Action) -> String {
        let ts = self.format_timestamp(action.timestamp);
        // Clamp free text before styling so ANSI sequences are never cut
        let avail = self.width.saturating_sub(16).max(24);
        let clamp = |s: &str| truncate(&single_line(s), avail);

        let body = match &action.payload {
            ActionPayload::Reasoning(text) => {
                format!("{} {}", self.accent("●"), self.accent(&clamp(&text.render())))
            }
            ActionPayload::ToolCall(call) => {
                let name = call.tool.as_deref().unwrap_or("tool");
                let summary = call.summary.as_deref().map(&clamp).unwrap_or_default();
                format!("{} {} {}", self.dim("→"), self.emph(name), summary)
            }
            ActionPayload::ToolResult(result) => {
                let summary = result
                    .summary
                    .as_deref()
                    .or(result.content.as_deref())
                    .map(&clamp)
                    .unwrap_or_else(|| "done".to_string());
                format!("{} {}", self.dim("←"), self.dim(&summary))
            }
            ActionPayload::Observation(text) => {
                format!("{} {}", self.dim("·"), clamp(&text.render()))
            }
            ActionPayload::Report(_) => self.emph("report submitted"),
            ActionPayload::HumanInputRequest(request) => {
                let question = request.question.as_deref().unwrap_or("input requested");
                format!("{} {}", self.warn("⚑ input needed:"), self.warn(&clamp(question)))
            }
            ActionPayload::Unknown { kind, .. } => self.dim(&format!("? {}", kind)),
        };

        format!("{} {}", self.dim(&ts), body)
    }

    pub fn render_summary(&self, snapshot: &ScanSnapshot) {
        let Some(stats) = &snapshot.stats else {
            return;
        };
        println!();
        println!(
            "{}  turns: {}  files read: {}  searches: {}  screenshots: {}  browser: {}  duration: {}",
            self.bold("Summary"),
            stats.turns,
            stats.files_read,
            stats.searches,
            stats.screenshots,
            stats.browser_actions,
            stats.duration_label,
        );
    }

    pub fn render_report(&self, report: Option<&Report>) {
        println!();
        let Some(report) = report else {
            println!("Scan completed. No report was produced.");
            return;
        };

        println!("{}", self.bold("Scan completed."));
        if let Some(summary) = &report.summary {
            println!("{}", summary);
        }
        if report.findings.is_empty() {
            println!("{}", self.ok("No findings."));
            return;
        }

        println!();
        for finding in &report.findings {
            let severity = finding.severity.as_deref().unwrap_or("unknown");
            let title = finding.title.as_deref().unwrap_or("(untitled)");
            println!("  {} {}", self.severity_label(severity), title);
            if let Some(description) = &finding.description {
                println!("      {}", self.dim(&single_line(description)));
            }
        }
    }

    pub fn render_failure(&self, error: &str) {
        eprintln!();
        eprintln!("{} {}", self.err("Scan failed:"), error);
    }

    pub fn render_detached(&self, scan_id: &ScanId, reason: &str) {
        println!();
        println!(
            "Detached ({}). The scan is still running remotely.",
            reason
        );
        println!("Re-attach with: scantrace watch {}", scan_id);
    }

    fn format_timestamp(&self, ms: i64) -> String {
        match chrono::Utc.timestamp_millis_opt(ms).single() {
            Some(ts) => ts
                .with_timezone(&chrono::Local)
                .format("[%H:%M:%S]")
                .to_string(),
            None => "[--:--:--]".to_string(),
        }
    }

    fn severity_label(&self, severity: &str) -> String {
        let label = format!("[{}]", severity.to_ascii_lowercase());
        if !self.color {
            return label;
        }
        match severity.to_ascii_lowercase().as_str() {
            "critical" | "high" => label.red().bold().to_string(),
            "medium" => label.yellow().to_string(),
            _ => label.dimmed().to_string(),
        }
    }

    fn bold(&self, s: &str) -> String {
        if self.color { s.bold().to_string() } else { s.to_string() }
    }

    fn emph(&self, s: &str) -> String {
        if self.color { s.cyan().to_string() } else { s.to_string() }
    }

    fn accent(&self, s: &str) -> String {
        if self.color { s.yellow().to_string() } else { s.to_string() }
    }

    fn warn(&self, s: &str) -> String {
        if self.color { s.yellow().bold().to_string() } else { s.to_string() }
    }

    fn ok(&self, s: &str) -> String {
        if self.color { s.green().to_string() } else { s.to_string() }
    }

    fn err(&self, s: &str) -> String {
        if self.color { s.red().bold().to_string() } else { s.to_string() }
    }

    fn dim(&self, s: &str) -> String {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }
}
