//! Classification of user-supplied branch specs.
//!
//! A spec is one of:
//! - a bare branch name (`feature/login-fix`)
//! - `remote/branch` shorthand (`upstream/main`), pinned only when the prefix
//!   names a configured remote
//! - a GitHub tree URL (`https://github.com/<owner>/<repo>/tree/<branch-path>`)
//!
//! GitHub tree URLs do not mark where the branch name ends and the file path
//! begins, so a URL expands to an ordered list of candidates instead of a
//! single name.

use super::error::ResolveError;
use std::collections::HashSet;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Ordered, de-duplicated, non-empty list of plausible branch names.
///
/// The first entry is the most authoritative interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCandidates(Vec<String>);

impl BranchCandidates {
    /// Build from candidates in priority order.
    ///
    /// Empty strings, names git would read as an option, and later duplicates
    /// are dropped. Returns `None` if nothing is left.
    pub fn from_ordered<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let ordered: Vec<String> = candidates
            .into_iter()
            .filter(|candidate| !candidate.is_empty())
            .filter(|candidate| {
                let usable = !looks_like_option(candidate);
                if !usable {
                    log::debug!("Dropping branch candidate '{}'", candidate);
                }
                usable
            })
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();

        if ordered.is_empty() {
            None
        } else {
            Some(Self(ordered))
        }
    }

    /// A single, already-decided branch name.
    pub(crate) fn single(branch: String) -> Self {
        Self(vec![branch])
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Git never accepts a branch name starting with `-`; on a command line such
/// a name would be parsed as an option.
pub(crate) fn looks_like_option(name: &str) -> bool {
    name.starts_with('-')
}

/// A classified branch spec, before remotes are consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefSpec {
    /// A branch name, possibly with a `remote/` prefix.
    Direct(String),
    /// A GitHub tree URL expanded into candidates.
    TreeUrl(BranchCandidates),
}

impl RefSpec {
    /// Classify raw user input.
    ///
    /// Input is trimmed first; an empty spec fails before anything touches
    /// git or the network.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResolveError::EmptyBranchName);
        }

        if input.starts_with("http://") || input.starts_with("https://") {
            return parse_github_tree_url(input).map(RefSpec::TreeUrl);
        }

        Ok(RefSpec::Direct(input.to_string()))
    }
}

/// Split a direct spec into `(pinned_remote, branch)`.
///
/// The prefix before the first `/` pins a remote only if it is one of
/// `remotes` and the remainder is non-empty. Otherwise the whole spec is the
/// branch name: `nonexistent/foo` is a branch called `nonexistent/foo`.
pub fn split_remote_prefix(spec: &str, remotes: &[String]) -> (Option<String>, String) {
    if let Some((prefix, remainder)) = spec.split_once('/')
        && !prefix.is_empty()
        && !remainder.is_empty()
        && remotes.iter().any(|remote| remote == prefix)
    {
        return (Some(prefix.to_string()), remainder.to_string());
    }

    (None, spec.to_string())
}

/// Parse a GitHub tree URL into branch candidates.
///
/// Candidates are the `ref` query parameter (if any) followed by every
/// prefix of the path after `tree/`, shortest first.
pub fn parse_github_tree_url(raw: &str) -> Result<BranchCandidates, ResolveError> {
    let url = SplitUrl::parse(raw)?;

    let host = url.host.to_ascii_lowercase();
    if !GITHUB_HOSTS.contains(&host.as_str()) {
        return Err(ResolveError::UnsupportedHost {
            host: url.host.to_string(),
        });
    }

    let trimmed = url.path.trim_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() < 4 || !parts[2].eq_ignore_ascii_case("tree") {
        return Err(ResolveError::UnsupportedPath {
            path: if url.path.is_empty() {
                "/".to_string()
            } else {
                url.path.to_string()
            },
        });
    }

    let branch_parts = &parts[3..];
    let mut candidates = Vec::with_capacity(branch_parts.len() + 1);

    if let Some(reference) = url.query.and_then(|query| query_param(query, "ref")) {
        candidates.push(reference);
    }

    for len in 1..=branch_parts.len() {
        let joined = branch_parts[..len].join("/");
        match percent_decode(&joined) {
            Some(decoded) => candidates.push(decoded),
            None => log::debug!("Skipping undecodable branch candidate '{}'", joined),
        }
    }

    BranchCandidates::from_ordered(candidates).ok_or(ResolveError::NoBranchCandidates)
}

/// The pieces of an `http(s)://` URL that tree resolution cares about.
struct SplitUrl<'a> {
    host: &'a str,
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> SplitUrl<'a> {
    fn parse(raw: &'a str) -> Result<Self, ResolveError> {
        let invalid = |reason: &str| ResolveError::InvalidUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("contains whitespace or control characters"));
        }

        let rest = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"))
            .ok_or_else(|| invalid("expected an http:// or https:// scheme"))?;

        // Fragment is ignored entirely.
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (rest, query) = match rest.split_once('?') {
            Some((before, query)) => (before, Some(query)),
            None => (rest, None),
        };
        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        // Userinfo is allowed by URL syntax but irrelevant here.
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
        let host = match host_port.split_once(':') {
            Some((host, port)) => {
                if !port.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid("port is not a number"));
                }
                host
            }
            None => host_port,
        };

        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        if !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        {
            return Err(invalid("host contains invalid characters"));
        }

        Ok(Self { host, path, query })
    }
}

/// First non-empty value of `key` in a query string, form-decoded.
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(name)? == key).then(|| form_decode(value))?
        })
        .find(|value| !value.is_empty())
}

fn form_decode(raw: &str) -> Option<String> {
    percent_decode(&raw.replace('+', " "))
}

/// Strict percent-decoding: malformed escapes and invalid UTF-8 both fail.
fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let well_formed = bytes.len() > idx + 2
                && bytes[idx + 1].is_ascii_hexdigit()
                && bytes[idx + 2].is_ascii_hexdigit();
            if !well_formed {
                return None;
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }

    urlencoding::decode(raw).ok().map(|decoded| decoded.into_owned())
}
