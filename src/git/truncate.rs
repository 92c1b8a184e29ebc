//! Size-bounded diff truncation.

/// Result of bounding a diff to a character budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedDiff {
    pub content: String,
    pub truncated: bool,
    /// Number of original lines replaced by the elision marker.
    pub omitted_lines: usize,
}

/// Marker appended after the last kept line, leading newline included.
pub fn elision_marker(remaining_lines: usize) -> String {
    format!("\n... [DIFF TRUNCATED - {} more lines] ...", remaining_lines)
}

/// Truncate a diff to at most `max_chars` characters, cutting on line boundaries.
///
/// Diffs already within budget are returned unchanged. Otherwise whole lines
/// are kept while both the line and the elision marker still fit, and the
/// marker reports how many lines were dropped. The cut can land mid-hunk.
///
/// Lengths are counted in chars. The `max_chars` bound holds only when the
/// budget can fit the marker; a smaller budget returns the marker alone, which
/// is longer than `max_chars`.
pub fn truncate_diff(diff: &str, max_chars: usize) -> TruncatedDiff {
    if diff.chars().count() <= max_chars {
        return TruncatedDiff {
            content: diff.to_string(),
            truncated: false,
            omitted_lines: 0,
        };
    }

    let lines: Vec<&str> = diff.split('\n').collect();
    let total = lines.len();

    let mut kept: Vec<&str> = Vec::new();
    let mut current_size = 0usize;

    for line in &lines {
        let line_size = line.chars().count() + 1;
        let remaining_after = total - kept.len() - 1;
        let marker_size = elision_marker(remaining_after).chars().count();
        if current_size + line_size + marker_size > max_chars {
            break;
        }
        kept.push(line);
        current_size += line_size;
    }

    let omitted_lines = total - kept.len();
    let mut content = kept.join("\n");
    if !kept.is_empty() {
        content.push('\n');
    }
    content.push_str(&elision_marker(omitted_lines));

    TruncatedDiff {
        content,
        truncated: true,
        omitted_lines,
    }
}
