//! Remote selection.

use super::error::ResolveError;

/// Default preferred remote name.
pub const DEFAULT_REMOTE: &str = "origin";

/// Choose the remote to fetch from.
///
/// A pinned remote must be configured; it is never swapped for another one.
/// Without a pin, `preferred` wins if configured, otherwise the first remote
/// in the order `git remote` listed them (not alphabetical).
pub fn select_remote(
    remotes: &[String],
    pinned: Option<&str>,
    preferred: &str,
) -> Result<String, ResolveError> {
    if remotes.is_empty() {
        return Err(ResolveError::NoRemotesConfigured);
    }

    if let Some(pinned) = pinned {
        return remotes
            .iter()
            .find(|remote| remote.as_str() == pinned)
            .cloned()
            .ok_or_else(|| ResolveError::RemoteNotFound {
                remote: pinned.to_string(),
            });
    }

    Ok(remotes
        .iter()
        .find(|remote| remote.as_str() == preferred)
        .unwrap_or(&remotes[0])
        .clone())
}
