//! Frontmost Safari tab lookup (macOS, via `osascript`).

use crate::error::{FlowError, Result};
use crate::process;

const FRONT_URL_SCRIPT: &str = r#"tell application "System Events"
	set safariRunning to (name of processes) contains "Safari"
end tell
if not safariRunning then error "Safari is not running"
tell application "Safari"
	if not (exists front document) then error "Safari has no front document"
	return URL of front document
end tell"#;

/// URL of Safari's front document.
pub fn safari_front_url() -> Result<String> {
    process::find_program("osascript")?;
    let output = process::run_capture("osascript", &["-e", FRONT_URL_SCRIPT], None)?;
    non_empty_url(&output)
}

fn non_empty_url(output: &str) -> Result<String> {
    let url = output.trim();
    if url.is_empty() {
        return Err(FlowError::ToolError(
            "front Safari tab URL is empty".to_string(),
        ));
    }
    Ok(url.to_string())
}
