use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::info::VideoInfo;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("yt-dlp not found. Install it: https://github.com/yt-dlp/yt-dlp")]
    YtDlpNotFound,
    #[error("yt-dlp failed: {0}")]
    YtDlpFailed(String),
    #[error("could not extract video ID from: {0}")]
    InvalidUrl(String),
    #[error("metadata parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Extract the video ID from a YouTube URL or bare ID.
pub fn extract_video_id(url: &str) -> Result<String, FetchError> {
    // Already a bare ID (no slashes, no dots)
    if !url.contains('/') && !url.contains('.') {
        return Ok(url.to_string());
    }

    // watch?v=<id> style links
    if let Some(pos) = url.find("v=") {
        let id = &url[pos + 2..];
        let id = id.split(['&', '#']).next().unwrap_or(id);
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }

    // youtu.be/<id> short links
    if let Some(pos) = url.find("youtu.be/") {
        let id = &url[pos + 9..];
        let id = id.split(['?', '&', '#']).next().unwrap_or(id);
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }

    Err(FetchError::InvalidUrl(url.to_string()))
}

/// Build a full YouTube URL from a URL or bare video ID.
fn to_full_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://www.youtube.com/watch?v={url}")
    }
}

fn check_yt_dlp() -> Result<(), FetchError> {
    let result = Command::new("which").arg("yt-dlp").output();
    match result {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err(FetchError::YtDlpNotFound),
    }
}

/// Fetch video metadata as a single JSON document, without downloading media.
pub fn fetch_video_info(url: &str) -> Result<VideoInfo, FetchError> {
    check_yt_dlp()?;

    let full_url = to_full_url(url);
    log::debug!("fetching metadata for {full_url}");

    let output = Command::new("yt-dlp")
        .args(["--dump-single-json", "--no-warnings", "--skip-download"])
        .arg(&full_url)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::YtDlpFailed(stderr.into_owned()));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Fetch the auto-generated caption track as raw WebVTT markup.
///
/// yt-dlp writes the subtitle file into a temporary staging directory that is
/// removed when this function returns, on success and failure alike. Returns
/// `Ok(None)` when the tool succeeds but the video simply has no captions in
/// `lang` — distinct from a failed invocation, which is an error.
pub fn fetch_caption_markup(url: &str, lang: &str) -> Result<Option<String>, FetchError> {
    check_yt_dlp()?;

    let full_url = to_full_url(url);
    let staging = tempfile::tempdir()?;
    let output_template = staging.path().join("captions.%(ext)s");

    log::debug!("fetching {lang} captions for {full_url}");

    let output = Command::new("yt-dlp")
        .args(["--skip-download", "--write-auto-subs", "--sub-langs"])
        .arg(lang)
        .args(["--sub-format", "vtt", "--no-warnings", "--output"])
        .arg(output_template.to_str().unwrap_or_default())
        .arg(&full_url)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::YtDlpFailed(stderr.into_owned()));
    }

    match find_vtt(staging.path())? {
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

fn find_vtt(dir: &Path) -> Result<Option<PathBuf>, FetchError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "vtt") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
