use serde::Deserialize;

/// Subset of yt-dlp's `--dump-single-json` document that the CLI displays.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

/// Format a duration in seconds as H:MM:SS, or M:SS under an hour.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Turn yt-dlp's YYYYMMDD upload date into YYYY-MM-DD. Anything else passes
/// through unchanged.
pub fn format_upload_date(date: &str) -> String {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}
