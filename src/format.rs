// File: src/format.rs
//! Text renderings of generated bytes. Pure formatting, no hardware access.

/// Encodes each byte as two lowercase hex digits, no separators.
pub fn to_hex_string(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Lays bytes out as hex for terminal display: a line break after every
/// `per_line` bytes and a single space after every `per_group` bytes that
/// do not end a line.
///
/// A zero `per_line` or `per_group` disables that break.
pub fn to_grouped_hex(bytes: &[u8], per_line: usize, per_group: usize) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    let mut start = 0;
    for n in 1..=bytes.len() {
        let separator = if per_line != 0 && n % per_line == 0 {
            '\n'
        } else if per_group != 0 && n % per_group == 0 {
            ' '
        } else {
            continue;
        };
        out.push_str(&hex::encode(&bytes[start..n]));
        out.push(separator);
        start = n;
    }
    out.push_str(&hex::encode(&bytes[start..]));
    out
}
