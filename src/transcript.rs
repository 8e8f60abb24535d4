use crate::merge;
use crate::vtt::{self, TimedSegment};

/// Fold restatement runs into single segments, preserving input order.
///
/// Each run keeps the timestamp of its first cue; the run's text is replaced
/// wholesale on every merge. One linear pass, no backtracking across runs.
pub fn collapse(segments: Vec<TimedSegment>) -> Vec<TimedSegment> {
    let mut iter = segments.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if merge::is_restatement(&current, &next) {
            current.text = merge::merge_texts(&current.text, &next.text);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);
    merged
}

/// Render segments as "[HH:MM:SS] text" lines.
pub fn render(segments: &[TimedSegment]) -> String {
    segments
        .iter()
        .map(|seg| format!("[{}] {}", seg.time, seg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full pipeline over raw caption markup: parse, collapse, render.
///
/// `None` means the markup yielded no segments ("no transcript"), which is a
/// valid outcome, not an error.
pub fn clean(markup: &str) -> Option<String> {
    let segments = vtt::parse(markup);
    if segments.is_empty() {
        return None;
    }

    let before = segments.len();
    let merged = collapse(segments);
    log::debug!("collapsed {before} cue(s) into {} segment(s)", merged.len());

    Some(render(&merged))
}
