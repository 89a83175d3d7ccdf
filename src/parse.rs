//! Parser for rule files.
//!
//! Each logical line is classified as a rule, a command for the preceding
//! rule, or a blank/comment line.  Whether an indented line is a command
//! depends on what came before it, so the parser tracks whether it is
//! currently collecting commands.
//!
//! Statements borrow from the line being parsed, so each must be consumed
//! before the next call to `read`.

use crate::error::{Error, Result};
use crate::scanner::{is_space, Line, LineReader, Scanner};

/// `targets: prereqs [; command]`
#[derive(Debug, PartialEq)]
pub struct Rule<'line> {
    pub line: usize,
    pub targets: Vec<&'line str>,
    pub prereqs: Vec<&'line str>,
    /// Text after a `;`, if any.
    pub command: Option<&'line str>,
}

#[derive(Debug, PartialEq)]
pub enum Statement<'line> {
    /// Starts a new current target set.
    Rule(Rule<'line>),
    /// A command for the current target set.
    Command(&'line str),
    /// A blank or comment line that ended the current target set.
    End,
}

/// What a line is, given the parser's state.
enum Kind {
    Skip,
    End,
    Rule,
    Command,
    Malformed,
}

/// True for lines that are empty, all whitespace, or whose first non-space
/// character starts a comment.
fn is_blank(text: &str) -> bool {
    match text.chars().find(|&c| !is_space(c)) {
        None => true,
        Some(c) => c == '#',
    }
}

fn all_whitespace(text: &str) -> bool {
    text.chars().all(is_space)
}

/// True if `text` has the shape `target... : ...`: it starts with a target
/// character and has a `:` before any `#`.
fn is_rule(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        None => return false,
        Some(c) if is_space(c) || c == ':' || c == '#' => return false,
        Some(_) => {}
    }
    for c in chars {
        match c {
            ':' => return true,
            '#' => return false,
            _ => {}
        }
    }
    false
}

/// The text of a command: from its first non-space character up to the
/// newline.  None if there is no such character.
fn command_text(text: &str) -> Option<&str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let start = text.find(|c: char| !is_space(c))?;
    Some(&text[start..])
}

pub struct Parser<'text> {
    lines: LineReader<'text>,
    line: Option<Line<'text>>,
    /// Set after a rule line; indented lines are then commands.
    in_rule: bool,
}

impl<'text> Parser<'text> {
    pub fn new(text: &'text str) -> Self {
        Parser {
            lines: LineReader::new(text),
            line: None,
            in_rule: false,
        }
    }

    fn classify(&self, text: &str) -> Kind {
        if is_blank(text) {
            if self.in_rule && !all_whitespace(text) && !text.starts_with('#') {
                // An indented comment is a command like any other.
                return Kind::Command;
            }
            return if self.in_rule { Kind::End } else { Kind::Skip };
        }
        if self.in_rule && text.starts_with(is_space) {
            return Kind::Command;
        }
        if is_rule(text) {
            return Kind::Rule;
        }
        Kind::Malformed
    }

    /// Read the next statement, or None at end of input.
    pub fn read(&mut self) -> Result<Option<Statement<'_>>> {
        let (kind, line) = loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line,
            };
            match self.classify(&line.text) {
                Kind::Skip => continue,
                Kind::End => {
                    self.in_rule = false;
                    return Ok(Some(Statement::End));
                }
                Kind::Malformed => {
                    return Err(Error::MalformedRule {
                        line: line.number,
                        text: line.text.trim_end_matches('\n').to_owned(),
                    })
                }
                kind => break (kind, line),
            }
        };

        self.in_rule = true;
        let line = self.line.insert(line);
        Ok(Some(match kind {
            Kind::Rule => Statement::Rule(read_rule(line.number, &line.text)),
            // Lines that look blank only get here as indented comments, so
            // there is always some text.
            _ => Statement::Command(command_text(&line.text).unwrap_or("")),
        }))
    }
}

/// Split a line already known to satisfy `is_rule`.
fn read_rule(number: usize, text: &str) -> Rule<'_> {
    let mut scanner = Scanner::new(text);
    let mut targets = Vec::new();
    loop {
        scanner.skip_spaces();
        match scanner.read_token(&[':']) {
            Some(target) => targets.push(target),
            None => break,
        }
    }
    scanner.skip(':');

    let mut prereqs = Vec::new();
    let mut command = None;
    loop {
        scanner.skip_spaces();
        match scanner.peek() {
            // Trailing comment; nothing after it counts, not even a ';'.
            '#' => break,
            ';' => {
                scanner.next();
                command = command_text(scanner.rest());
                break;
            }
            _ => {}
        }
        match scanner.read_token(&[';', '#']) {
            Some(prereq) => prereqs.push(prereq),
            None => break,
        }
    }

    Rule {
        line: number,
        targets,
        prereqs,
        command,
    }
}
