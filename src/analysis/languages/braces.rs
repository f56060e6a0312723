//! Delimiter-depth scanning for C-family source text.
//!
//! Delimiters inside string literals (`'`, `"`), template literals
//! (`` ` ``), line comments and block comments are ignored.
//! Regular-expression literals are not recognized, and a template literal
//! nesting another template inside `${...}` ends early.

/// Byte offset of the `}` closing the `{` at `open`.
///
/// Returns `None` if `open` is not a `{` or the block is never closed.
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    matching(text, open, b'{', b'}')
}

/// Byte offset of the `)` closing the `(` at `open`.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    matching(text, open, b'(', b')')
}

fn matching(text: &str, open: usize, opener: u8, closer: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&opener) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            c if c == opener => depth += 1,
            c if c == closer => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Brace nesting depth at byte offset `offset` of `text`, counted from the
/// start of `text`.
pub fn depth_at(text: &str, offset: usize) -> usize {
    DepthCursor::new(text).depth_at(offset)
}

/// Incremental [`depth_at`] for offsets queried in increasing order.
pub struct DepthCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> DepthCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    /// Depth at `offset`. An offset behind an earlier query answers with the
    /// depth already reached.
    pub fn depth_at(&mut self, offset: usize) -> usize {
        let bytes = self.bytes;
        let limit = offset.min(bytes.len());
        while self.pos < limit {
            let i = self.pos;
            match bytes[i] {
                b'{' => self.depth += 1,
                b'}' => self.depth = self.depth.saturating_sub(1),
                b'"' | b'\'' | b'`' => {
                    self.pos = skip_string(bytes, i);
                    continue;
                }
                b'/' => {
                    if let Some(end) = skip_comment(bytes, i) {
                        self.pos = end;
                        continue;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        self.depth
    }
}

/// Spans `(start, end)` of every block comment, `end` just past the `*/`.
/// Comment openers inside strings and line comments are not counted.
pub fn block_comments(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    if bytes[i + 1] == b'*' {
                        spans.push((i, end));
                    }
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    spans
}

/// Offset just past the string literal opening at `start`. Single- and
/// double-quoted strings also end at a newline.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i + 1,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Offset just past the comment starting at `start`, if one starts there.
fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start + 1) {
        Some(b'/') => {
            let end = bytes[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| start + p + 1);
            Some(end)
        }
        Some(b'*') => {
            let end = bytes[start + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |p| start + 2 + p + 2);
            Some(end)
        }
        _ => None,
    }
}
