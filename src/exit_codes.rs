//! Exit code constants for the flow CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad branch spec, invalid state)
//! - 2: Configuration error
//! - 3: Git operation failure
//! - 4: External tool failure (yt-dlp, osascript, task, clipboard, editor)
//! - 5: Completion API failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unparseable branch spec, or invalid state.
pub const USER_ERROR: i32 = 1;

/// Configuration file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 2;

/// Git operation failure: fetch, checkout, clone, commit, push errors.
pub const GIT_FAILURE: i32 = 3;

/// An external helper program is missing or exited unsuccessfully.
pub const TOOL_FAILURE: i32 = 4;

/// The commit message completion request failed.
pub const API_FAILURE: i32 = 5;
