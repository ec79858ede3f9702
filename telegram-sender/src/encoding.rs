//! Text preparation for `sendMessage`: splitting into API-sized chunks and query-string encoding.

/// Telegram's maximum text length for one message, in characters.
pub const MAX_TEXT_LEN: usize = 4096;

/// Percent-encodes `text` for a URL query value.
///
/// Works on the UTF-8 bytes: RFC 3986 unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass
/// through, every other byte becomes `%XX` with uppercase hex. No byte is ever dropped.
pub fn percent_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Splits `text` into consecutive slices of at most `max_chars` characters.
///
/// Boundaries fall on `char` boundaries, never inside a multi-byte sequence. Concatenating
/// the result gives back `text`. Empty input yields no chunks.
pub fn split_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let end = byte_index_after_n_chars(remaining, max_chars);
        let (chunk, rest) = remaining.split_at(end);
        chunks.push(chunk);
        remaining = rest;
    }
    chunks
}

fn byte_index_after_n_chars(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}
