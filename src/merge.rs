use crate::vtt::TimedSegment;

// Auto-captions scroll by re-emitting overlapping word windows. Two cues no
// more than this many seconds apart are candidates for being the same
// utterance restated.
const MERGE_WINDOW_SECS: i64 = 2;

// ── Overlap classifier ──────────────────────────────────────────────────

/// Decide whether `b` restates `a` (and should be merged into its run).
///
/// Cues more than 2 seconds apart never match. Within the window, full
/// case-insensitive containment wins outright; otherwise at least half of the
/// shorter cue's tokens must also occur in the other cue.
pub fn is_restatement(a: &TimedSegment, b: &TimedSegment) -> bool {
    if (time_to_seconds(&b.time) - time_to_seconds(&a.time)).abs() > MERGE_WINDOW_SECS {
        return false;
    }

    let lower_a = a.text.to_lowercase();
    let lower_b = b.text.to_lowercase();
    if lower_a.contains(&lower_b) || lower_b.contains(&lower_a) {
        return true;
    }

    let words_a: Vec<&str> = lower_a.split_whitespace().collect();
    let words_b: Vec<&str> = lower_b.split_whitespace().collect();
    let shared = words_a.iter().filter(|w| words_b.contains(w)).count();
    shared * 2 >= words_a.len().min(words_b.len())
}

/// Seconds since midnight for an "HH:MM:SS" stamp. Total: unparseable fields
/// count as zero.
fn time_to_seconds(time: &str) -> i64 {
    let mut parts = time.split(':');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (next(), next(), next());
    hours * 3600 + minutes * 60 + seconds
}

// ── Text merger ─────────────────────────────────────────────────────────

/// Combine two overlapping cue texts into one.
///
/// Containment keeps the superset. Failing that, a token-level LCS covering at
/// least half of the shorter text means the cues say the same thing, and the
/// earlier text is kept as-is. Weakly overlapping pairs are concatenated so no
/// words are lost.
pub fn merge_texts(text1: &str, text2: &str) -> String {
    let lower1 = text1.to_lowercase();
    let lower2 = text2.to_lowercase();
    if lower1.contains(&lower2) {
        return text1.to_string();
    }
    if lower2.contains(&lower1) {
        return text2.to_string();
    }

    let words1: Vec<&str> = text1.split_whitespace().collect();
    let words2: Vec<&str> = text2.split_whitespace().collect();
    let common = longest_common_subsequence(&words1, &words2);
    if common.len() * 2 >= words1.len().min(words2.len()) {
        return text1.to_string();
    }

    format!("{text1} {text2}")
}

// ── Longest common subsequence ──────────────────────────────────────────

/// Order-preserving LCS over tokens, case-insensitive. Classic DP table with
/// backtracking; callers only consume the length.
fn longest_common_subsequence<'a>(words1: &[&'a str], words2: &[&str]) -> Vec<&'a str> {
    let lower1: Vec<String> = words1.iter().map(|w| w.to_lowercase()).collect();
    let lower2: Vec<String> = words2.iter().map(|w| w.to_lowercase()).collect();

    let mut table = vec![vec![0usize; words2.len() + 1]; words1.len() + 1];
    for i in 1..=words1.len() {
        for j in 1..=words2.len() {
            table[i][j] = if lower1[i - 1] == lower2[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut subsequence = Vec::new();
    let (mut i, mut j) = (words1.len(), words2.len());
    while i > 0 && j > 0 {
        if lower1[i - 1] == lower2[j - 1] {
            subsequence.push(words1[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] > table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    subsequence.reverse();
    subsequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(time: &str, text: &str) -> TimedSegment {
        TimedSegment {
            time: time.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn identical_texts_are_restatements_and_merge_to_themselves() {
        let a = seg("00:00:01", "same words here");
        let b = seg("00:00:02", "same words here");
        assert!(is_restatement(&a, &b));
        assert_eq!(merge_texts(&a.text, &b.text), "same words here");
    }

    #[test]
    fn two_seconds_apart_is_still_inside_the_window() {
        let a = seg("00:00:01", "hello world");
        let b = seg("00:00:03", "hello world");
        assert!(is_restatement(&a, &b));
    }

    #[test]
    fn three_seconds_apart_is_outside_the_window() {
        let a = seg("00:00:01", "hello world");
        let b = seg("00:00:04", "hello world");
        assert!(!is_restatement(&a, &b));
    }

    #[test]
    fn window_spans_minute_and_hour_boundaries() {
        let a = seg("00:59:59", "carry over");
        let b = seg("01:00:01", "carry over");
        assert!(is_restatement(&a, &b));
    }

    #[test]
    fn containment_counts_as_restatement() {
        let a = seg("00:00:01", "the quick brown");
        let b = seg("00:00:02", "the quick brown fox jumps");
        assert!(is_restatement(&a, &b));
    }

    #[test]
    fn containment_is_case_insensitive() {
        let a = seg("00:00:01", "Hello World");
        let b = seg("00:00:02", "hello world again");
        assert!(is_restatement(&a, &b));
    }

    #[test]
    fn half_shared_vocabulary_is_enough() {
        // two of the shorter cue's three tokens occur in the other cue
        let a = seg("00:00:01", "alpha beta gamma");
        let b = seg("00:00:02", "beta gamma delta epsilon");
        assert!(is_restatement(&a, &b));
    }

    #[test]
    fn disjoint_vocabulary_is_not_a_restatement() {
        let a = seg("00:00:01", "entirely different words");
        let b = seg("00:00:02", "nothing in common here");
        assert!(!is_restatement(&a, &b));
    }

    #[test]
    fn merge_keeps_the_containing_text() {
        assert_eq!(merge_texts("hello world", "hello"), "hello world");
        assert_eq!(merge_texts("hello", "hello world"), "hello world");
    }

    #[test]
    fn merge_keeps_earlier_text_on_strong_lcs_overlap() {
        // no containment, but "quick brown fox" is common in order
        let merged = merge_texts("the quick brown fox", "quick brown fox jumps high");
        assert_eq!(merged, "the quick brown fox");
    }

    #[test]
    fn merge_concatenates_on_weak_overlap() {
        let merged = merge_texts("one two three", "four five six");
        assert_eq!(merged, "one two three four five six");
    }

    #[test]
    fn shared_words_out_of_order_fall_back_to_concatenation() {
        // token membership passes (cats/bite/dogs all occur in both) but the
        // ordered LCS is a single token, below half of the shorter text
        let a = seg("00:00:01", "stray cats bite dogs");
        let b = seg("00:00:02", "dogs bite cats");
        assert!(is_restatement(&a, &b));
        assert_eq!(
            merge_texts(&a.text, &b.text),
            "stray cats bite dogs dogs bite cats"
        );
    }

    #[test]
    fn lcs_length_ignores_case_and_gaps() {
        let words1: Vec<&str> = "The Quick brown fox".split_whitespace().collect();
        let words2: Vec<&str> = "the slow quick red fox".split_whitespace().collect();
        let common = longest_common_subsequence(&words1, &words2);
        assert_eq!(common, vec!["The", "Quick", "fox"]);
    }

    #[test]
    fn lcs_of_disjoint_sequences_is_empty() {
        let words1: Vec<&str> = "a b c".split_whitespace().collect();
        let words2: Vec<&str> = "x y z".split_whitespace().collect();
        assert!(longest_common_subsequence(&words1, &words2).is_empty());
    }
}
