use std::ops::Range;

/// Maximum lines returned by the keyword phase.
pub const KEYWORD_WINDOW_LINES: usize = 15;

/// Lines of leading context the keyword phase may pull in.
const KEYWORD_CONTEXT_BEFORE: usize = 2;

/// A line containing a colon is only treated as the *next* heading
/// when it is shorter than this (in characters).
const NEXT_HEADING_MAX_CHARS: usize = 50;

/// Locate the block of `lines` that belongs to a section described by
/// `keywords`.
///
/// Two phases, the first preferred:
/// 1. A line mentioning a keyword that looks like a heading (has a colon or
///    is all caps). The block runs up to, not including, the next line that
///    looks like a heading.
/// 2. Any line mentioning a keyword. The block is its paragraph: up to two
///    non-blank lines before it and the non-blank lines after it, capped at
///    [`KEYWORD_WINDOW_LINES`].
///
/// In both phases the first line in document order wins, whatever the
/// keyword order.
pub fn locate_section(lines: &[&str], keywords: &[&str]) -> Option<Range<usize>> {
    if keywords.is_empty() {
        return None;
    }
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
    let mentions = |i: usize| keywords.iter().any(|k| lowered[i].contains(k.as_str()));

    if let Some(start) = (0..lines.len()).find(|&i| mentions(i) && is_heading(lines[i])) {
        let end = (start + 1..lines.len())
            .find(|&j| is_next_heading(lines[j]))
            .unwrap_or(lines.len());
        return Some(start..end);
    }

    let hit = (0..lines.len()).find(|&i| mentions(i))?;
    Some(paragraph_window(lines, hit))
}

/// [`locate_section`] over raw text, returning the joined block.
pub fn find_section(text: &str, keywords: &[&str]) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    locate_section(&lines, keywords).map(|range| lines[range].join("\n"))
}

fn paragraph_window(lines: &[&str], hit: usize) -> Range<usize> {
    let floor = hit.saturating_sub(KEYWORD_CONTEXT_BEFORE);
    let mut start = hit;
    while start > floor && !is_blank(lines[start - 1]) {
        start -= 1;
    }

    let mut end = hit;
    while end + 1 < lines.len() && !is_blank(lines[end + 1]) {
        end += 1;
    }

    start..(end + 1).min(start + KEYWORD_WINDOW_LINES)
}

/// Heading shape for the line that opens a section. A trailing colon
/// is covered by the colon test.
fn is_heading(line: &str) -> bool {
    line.contains(':') || is_all_caps(line)
}

/// Heading shape for the line that closes the current section. Any
/// non-blank line without lower-case letters qualifies, so rules like
/// `-----` and bare numbers end a section too.
fn is_next_heading(line: &str) -> bool {
    (line.contains(':') && line.chars().count() < NEXT_HEADING_MAX_CHARS)
        || (!is_blank(line) && !has_lowercase(line))
}

/// At least one upper-case letter and no lower-case ones.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !has_lowercase(line)
}

fn has_lowercase(line: &str) -> bool {
    line.chars().any(char::is_lowercase)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
