/// Split `text` into overlapping character windows.
///
/// Windows start every `size - overlap` characters and hold at most `size`
/// characters; the last one may be shorter. Empty text gives no windows.
/// Offsets count chars, not bytes, so multi-byte text is never split inside
/// a character.
pub fn split_into_windows(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || size == 0 {
        return Vec::new();
    }
    let step = size.saturating_sub(overlap).max(1);
    let chars: Vec<char> = text.chars().collect();

    (0..chars.len())
        .step_by(step)
        .map(|start| chars[start..(start + size).min(chars.len())].iter().collect())
        .collect()
}
