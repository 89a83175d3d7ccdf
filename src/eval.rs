//! Expansion of the automatic macros in command text, e.g. `cc -o $@ $^`.
//!
//! `$@` is expanded once, when a command is attached to its target, using
//! `TargetVars`.  `$^` and `$?` are expanded when the command is emitted,
//! using `PrereqVars`.  A `$` that doesn't start a macro the current `Env`
//! knows about is passed through untouched.

use crate::graph::Prereq;
use std::borrow::Cow;

/// One token of command text, either literal text or a macro reference.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalPart<'a> {
    Literal(&'a str),
    VarRef(char),
}

fn is_macro(c: u8) -> bool {
    matches!(c, b'@' | b'^' | b'?')
}

/// Splits command text into `EvalPart`s.
pub struct EvalParser<'a> {
    text: &'a str,
    ofs: usize,
}

impl<'a> EvalParser<'a> {
    pub fn new(text: &'a str) -> Self {
        EvalParser { text, ofs: 0 }
    }
}

impl<'a> Iterator for EvalParser<'a> {
    type Item = EvalPart<'a>;

    fn next(&mut self) -> Option<EvalPart<'a>> {
        let bytes = self.text.as_bytes();
        let start = self.ofs;
        if start >= bytes.len() {
            return None;
        }
        if bytes[start] == b'$' {
            if let Some(&c) = bytes.get(start + 1) {
                if is_macro(c) {
                    self.ofs += 2;
                    return Some(EvalPart::VarRef(c as char));
                }
            }
        }
        // A lone '$' is literal, so the search for the next one starts after it.
        let from = start + self.text[start..].chars().next().map_or(1, char::len_utf8);
        let end = match self.text[from..].find('$') {
            Some(pos) => from + pos,
            None => bytes.len(),
        };
        self.ofs = end;
        Some(EvalPart::Literal(&self.text[start..end]))
    }
}

/// A source of macro values.
pub trait Env {
    fn get_var(&self, var: char) -> Option<Cow<str>>;
}

/// Expand `text` against `env`.  Macros the env doesn't define are kept as
/// written, so a later pass can expand them.
pub fn evaluate(text: &str, env: &dyn Env) -> String {
    let mut result = String::with_capacity(text.len());
    for part in EvalParser::new(text) {
        match part {
            EvalPart::Literal(s) => result.push_str(s),
            EvalPart::VarRef(v) => match env.get_var(v) {
                Some(val) => result.push_str(&val),
                None => {
                    result.push('$');
                    result.push(v);
                }
            },
        }
    }
    result
}

/// `$@`: the name of the target owning the command.
pub struct TargetVars<'a> {
    pub name: &'a str,
}

impl<'a> Env for TargetVars<'a> {
    fn get_var(&self, var: char) -> Option<Cow<str>> {
        match var {
            '@' => Some(Cow::Borrowed(self.name)),
            _ => None,
        }
    }
}

/// `$^` and `$?`: all prerequisites, and only those that contributed to the
/// rebuild, in the order they were listed.
pub struct PrereqVars<'a> {
    pub prereqs: &'a [Prereq],
}

impl<'a> PrereqVars<'a> {
    fn name_list(&self, contributed_only: bool) -> String {
        let mut out = String::new();
        for prereq in self.prereqs {
            if contributed_only && !prereq.contributed {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&prereq.name);
        }
        out
    }
}

impl<'a> Env for PrereqVars<'a> {
    fn get_var(&self, var: char) -> Option<Cow<str>> {
        match var {
            '^' => Some(Cow::Owned(self.name_list(false))),
            '?' => Some(Cow::Owned(self.name_list(true))),
            _ => None,
        }
    }
}
