//! Post-processing of raw LLM output.
//!
//! Model responses mix prose with fenced code blocks. Downstream consumers
//! want the code without the fence delimiters, so we strip the ``` markers
//! and keep everything in between. This is a lightweight regex transform,
//! not a markdown parser; unclosed fences pass through untouched.

use regex::Regex;
use std::sync::LazyLock;

/// Matches one fenced block: the opening ```` ```lang ```` line, the enclosed
/// content (non-greedy), and the closing fence.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+#.-]*[ \t]*\r?\n?(.*?)\r?\n?```").unwrap()
});

/// Remove markdown code-fence delimiters from `text`, keeping the enclosed
/// code and all surrounding prose, then trim the result.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "${1}").trim().to_string()
}

/// Pull the code block following a "Recommended Fix:" heading out of a
/// structured debug report.
///
/// Returns `None` when the heading or a following fence is absent. When
/// several fences follow the heading, the first one wins.
pub fn extract_recommended_fix(report: &str) -> Option<String> {
    let start = report.find("Recommended Fix")?;
    let rest = &report[start..];
    let captures = FENCE_RE.captures(rest)?;
    Some(captures[1].trim().to_string())
}
