//! UTF-8 byte utilities
//!
//! Work on raw byte buffers so that scanners (the trie matcher, word helpers)
//! can step codepoint by codepoint without decoding. A malformed sequence is
//! reported as a zero-length span; callers treat that as "no more characters".

/// Byte length of the codepoint that starts at `pos`.
///
/// Returns 0 when `pos` is out of range, the leading byte is not a valid
/// UTF-8 lead byte, or the sequence is truncated or has a bad continuation.
pub fn char_len_at(bytes: &[u8], pos: usize) -> usize {
    let Some(&lead) = bytes.get(pos) else {
        return 0;
    };

    let len = match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return 0,
    };

    if pos + len > bytes.len() {
        return 0;
    }
    if bytes[pos + 1..pos + len].iter().all(|b| is_continuation(*b)) {
        len
    } else {
        0
    }
}

/// Byte length of the codepoint that ends right before `end`.
///
/// Scans backward over continuation bytes (0x80-0xBF), then validates the
/// sequence forward. Returns 0 at the start of the buffer or on malformed input.
pub fn last_char_len(bytes: &[u8], end: usize) -> usize {
    if end == 0 || end > bytes.len() {
        return 0;
    }

    let mut start = end - 1;
    while start > 0 && is_continuation(bytes[start]) && end - start < 4 {
        start -= 1;
    }

    let len = char_len_at(bytes, start);
    if len == end - start {
        len
    } else {
        0
    }
}

/// Copy the codepoint starting at `pos` into a fixed 4-byte buffer.
///
/// Unused trailing bytes are zero. Returns the buffer and the span length
/// (0 on malformed input, in which case the buffer is all zeros).
pub fn char_bytes_at(bytes: &[u8], pos: usize) -> ([u8; 4], usize) {
    let mut buf = [0u8; 4];
    let len = char_len_at(bytes, pos);
    if len > 0 {
        buf[..len].copy_from_slice(&bytes[pos..pos + len]);
    }
    (buf, len)
}

/// Count non-zero bytes in a 4-byte codepoint buffer.
pub fn count_non_zero(buf: &[u8; 4]) -> usize {
    buf.iter().filter(|b| **b != 0).count()
}

fn is_continuation(b: u8) -> bool {
    (0x80..=0xBF).contains(&b)
}
