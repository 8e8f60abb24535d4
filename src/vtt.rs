use std::sync::LazyLock;

use regex::Regex;

// YouTube timing lines look like "00:00:01.000 --> 00:00:03.000 align:start".
static TIMING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}:\d{2}:\d{2})\.\d{3} -->").expect("timing pattern"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

/// One caption cue: start time (truncated to whole seconds) plus cleaned text.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSegment {
    pub time: String,
    pub text: String,
}

/// Parse WebVTT markup into timed segments.
///
/// Timing lines open a segment; blank lines, the WEBVTT header, NOTE lines and
/// bare cue numbers are skipped; everything else is caption text and gets
/// space-joined into the open segment. Lines that only look almost like timing
/// lines are treated as text. Never fails: unparseable input yields no segments.
pub fn parse(markup: &str) -> Vec<TimedSegment> {
    let mut segments = Vec::new();
    let mut current_time: Option<String> = None;
    let mut buffer = String::new();

    for line in markup.lines() {
        if let Some(caps) = TIMING_RE.captures(line) {
            finalize(&mut segments, current_time.as_deref(), &buffer);
            buffer.clear();
            current_time = Some(caps[1].to_string());
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty()
            || line.starts_with("WEBVTT")
            || line.starts_with("NOTE")
            || is_cue_number(line)
        {
            continue;
        }

        if current_time.is_some() {
            buffer.push(' ');
            buffer.push_str(trimmed);
        }
    }

    finalize(&mut segments, current_time.as_deref(), &buffer);
    segments
}

/// Strip markup from the accumulated text and emit it if anything is left.
fn finalize(segments: &mut Vec<TimedSegment>, time: Option<&str>, raw: &str) {
    let Some(time) = time else { return };
    if raw.is_empty() {
        return;
    }

    let stripped = TAG_RE.replace_all(raw, "");
    let text = stripped.trim();
    if !text.is_empty() {
        segments.push(TimedSegment {
            time: time.to_string(),
            text: text.to_string(),
        });
    }
}

fn is_cue_number(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}
