//! Implementation of the `flow youtubeToSound` command.

use crate::browser::safari_front_url;
use crate::cli::YoutubeToSoundArgs;
use crate::config::types::COOKIES_DISABLED;
use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use crate::events::{Event, EventAction, record_event};
use crate::process;
use serde_json::json;
use std::fs;
use std::path::Path;

const DOWNLOADER: &str = "yt-dlp";

/// Execute the `flow youtubeToSound` command.
///
/// The first argument is the video URL (frontmost Safari tab when absent);
/// the rest are passed through to yt-dlp.
pub fn cmd_youtube_to_sound(ctx: &FlowContext, args: YoutubeToSoundArgs) -> Result<()> {
    let mut args = args.args.into_iter();

    let url = match args.next() {
        Some(url) => url.trim().to_string(),
        None => safari_front_url()?,
    };
    if url.is_empty() {
        return Err(FlowError::UserError(
            "youtube url cannot be empty".to_string(),
        ));
    }
    validate_video_url(&url)?;

    process::find_program(DOWNLOADER)?;

    let target_dir = ctx.youtube_sound_dir();
    fs::create_dir_all(&target_dir).map_err(|e| {
        FlowError::UserError(format!(
            "failed to create directory '{}': {}",
            target_dir.display(),
            e
        ))
    })?;

    let extra: Vec<String> = args.collect();
    let argv = build_yt_dlp_args(
        &target_dir,
        &extra,
        &ctx.config.youtube_cookies_browser,
        &url,
    );
    process::run_streaming(DOWNLOADER, &argv, None)?;

    println!("✔️ Audio saved to {}", target_dir.display());

    record_event(
        ctx,
        Event::new(EventAction::YoutubeToSound)
            .with_details(json!({"url": url, "dir": target_dir.display().to_string()})),
    );

    Ok(())
}

/// Require an absolute URL with a scheme and a host.
fn validate_video_url(url: &str) -> Result<()> {
    let invalid = |reason: &str| {
        FlowError::UserError(format!("invalid url '{}': {}", url, reason))
    };

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("contains whitespace"));
    }

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| invalid("missing scheme"))?;

    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return Err(invalid("malformed scheme"));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(invalid("missing host"));
    }

    Ok(())
}

/// yt-dlp argv: fixed audio options, trimmed extra args, cookies, then the URL.
///
/// `--cookies-from-browser <browser>` is added unless `browser` is `none`
/// or the caller already passed a `--cookies*` option.
fn build_yt_dlp_args(target_dir: &Path, extra: &[String], browser: &str, url: &str) -> Vec<String> {
    let template = target_dir.join("%(title)s.%(ext)s");

    let mut argv: Vec<String> = [
        "--extract-audio",
        "--audio-format",
        "mp3",
        "--audio-quality",
        "0",
        "--no-playlist",
        "-o",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    argv.push(template.to_string_lossy().to_string());

    argv.extend(
        extra
            .iter()
            .map(|arg| arg.trim())
            .filter(|arg| !arg.is_empty())
            .map(str::to_string),
    );

    let browser = browser.trim();
    if !browser.is_empty()
        && !browser.eq_ignore_ascii_case(COOKIES_DISABLED)
        && !has_cookies_arg(&argv)
    {
        argv.push("--cookies-from-browser".to_string());
        argv.push(browser.to_string());
    }

    argv.push(url.to_string());
    argv
}

fn has_cookies_arg(args: &[String]) -> bool {
    args.iter().any(|arg| arg.starts_with("--cookies"))
}
