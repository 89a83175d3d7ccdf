//! Splits rule-file text into logical lines, and scans a single line
//! character by character.

use std::borrow::Cow;

/// One logical line of input, always terminated by `\n`.
#[derive(Debug, PartialEq)]
pub struct Line<'text> {
    /// 1-based number of the first physical line this line came from.
    pub number: usize,
    pub text: Cow<'text, str>,
}

/// Yields logical lines: CRLF is normalized, backslash-newline joins the next
/// physical line, and a missing final newline is supplied.
pub struct LineReader<'text> {
    buf: &'text str,
    ofs: usize,
    line: usize,
}

impl<'text> LineReader<'text> {
    pub fn new(buf: &'text str) -> Self {
        LineReader {
            buf,
            ofs: 0,
            line: 1,
        }
    }
}

impl<'text> Iterator for LineReader<'text> {
    type Item = Line<'text>;

    fn next(&mut self) -> Option<Line<'text>> {
        if self.ofs >= self.buf.len() {
            return None;
        }
        let number = self.line;
        let mut joined: Option<String> = None;
        loop {
            let rest = &self.buf[self.ofs..];
            let (physical, newline) = match rest.find('\n') {
                Some(end) => (&rest[..end], true),
                None => (rest, false),
            };
            self.ofs += physical.len() + usize::from(newline);
            self.line += 1;

            let stripped = physical.strip_suffix('\r').unwrap_or(physical);
            if let Some(head) = stripped.strip_suffix('\\') {
                if newline && self.ofs < self.buf.len() {
                    let text = joined.get_or_insert_with(String::new);
                    text.push_str(head);
                    text.push(' ');
                    continue;
                }
            }

            let text = match joined {
                // Fast path: the line is usable as-is, newline included.
                None if newline && stripped.len() == physical.len() => {
                    Cow::Borrowed(&rest[..=physical.len()])
                }
                None => {
                    let mut text = String::with_capacity(stripped.len() + 1);
                    text.push_str(stripped);
                    text.push('\n');
                    Cow::Owned(text)
                }
                Some(mut text) => {
                    text.push_str(stripped);
                    text.push('\n');
                    Cow::Owned(text)
                }
            };
            return Some(Line { number, text });
        }
    }
}

/// Whitespace as the rule grammar sees it.  Note this includes `\n`.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Scans one logical line.  Reading past the end yields `'\0'`.
pub struct Scanner<'a> {
    buf: &'a str,
    pub ofs: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a str) -> Self {
        Scanner { buf, ofs: 0 }
    }

    /// Only ever called with offsets of ASCII delimiters, which are always
    /// char boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.buf[start..end]
    }

    /// The unscanned remainder of the line.
    pub fn rest(&self) -> &'a str {
        self.buf.get(self.ofs..).unwrap_or("")
    }

    pub fn peek(&self) -> char {
        match self.buf.as_bytes().get(self.ofs) {
            Some(&b) => b as char,
            None => '\0',
        }
    }

    pub fn at_end(&self) -> bool {
        matches!(self.peek(), '\n' | '\0')
    }

    pub fn next(&mut self) {
        if self.ofs < self.buf.len() {
            self.ofs += 1;
        }
    }

    pub fn read(&mut self) -> char {
        let c = self.peek();
        self.next();
        c
    }

    pub fn skip(&mut self, ch: char) -> bool {
        if self.peek() == ch {
            self.next();
            return true;
        }
        false
    }

    /// Skip whitespace, stopping at the end of the line.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && is_space(self.peek()) {
            self.next();
        }
    }

    /// Read a run of characters up to whitespace or any of `stops`.
    pub fn read_token(&mut self, stops: &[char]) -> Option<&'a str> {
        let start = self.ofs;
        loop {
            let c = self.peek();
            if c == '\0' || is_space(c) || stops.contains(&c) {
                break;
            }
            self.next();
        }
        if self.ofs == start {
            return None;
        }
        Some(self.slice(start, self.ofs))
    }
}
