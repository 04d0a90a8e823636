use serde::{Deserialize, Serialize};

/// Semantic bucket for a tool call, used by stats aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolBucket {
    /// File reads (source inspection)
    FilesRead,
    /// Code and content searches
    Searches,
    /// Page screenshots
    Screenshots,
    /// Browser interaction (navigation, clicks, input)
    BrowserActions,
}

struct ToolSpec {
    name: &'static str,
    bucket: ToolBucket,
}

impl ToolSpec {
    const fn new(name: &'static str, bucket: ToolBucket) -> Self {
        Self { name, bucket }
    }
}

/// Registry of worker tools the client knows how to count.
///
/// This table is the single source of truth for classification. Stats and
/// any future presentation code must look tools up here rather than keeping
/// their own name lists.
const SCAN_TOOLS: &[ToolSpec] = &[
    // Source inspection
    ToolSpec::new("read_file", ToolBucket::FilesRead),
    // Search
    ToolSpec::new("search_code", ToolBucket::Searches),
    // Browser capture
    ToolSpec::new("screenshot", ToolBucket::Screenshots),
    // Browser interaction
    ToolSpec::new("browser_navigate", ToolBucket::BrowserActions),
    ToolSpec::new("browser_click", ToolBucket::BrowserActions),
    ToolSpec::new("browser_type", ToolBucket::BrowserActions),
    ToolSpec::new("browser_scroll", ToolBucket::BrowserActions),
    ToolSpec::new("browser_wait", ToolBucket::BrowserActions),
];

/// Classify a tool name into a stats bucket.
///
/// Unknown tools return `None` and are counted nowhere; the worker's tool
/// set evolves ahead of the client.
pub fn classify_tool(tool_name: &str) -> Option<ToolBucket> {
    SCAN_TOOLS
        .iter()
        .find(|t| t.name == tool_name)
        .map(|t| t.bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tools_classify() {
        assert_eq!(classify_tool("read_file"), Some(ToolBucket::FilesRead));
        assert_eq!(classify_tool("search_code"), Some(ToolBucket::Searches));
        assert_eq!(classify_tool("screenshot"), Some(ToolBucket::Screenshots));
        assert_eq!(
            classify_tool("browser_click"),
            Some(ToolBucket::BrowserActions)
        );
    }

    #[test]
    fn test_unknown_tool_classifies_nowhere() {
        assert_eq!(classify_tool("decompile_firmware"), None);
        assert_eq!(classify_tool(""), None);
    }
}
