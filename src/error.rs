//! Fatal errors, and the non-fatal warnings reported along the way.

use std::fmt;
use thiserror::Error;

/// Conditions that abort the whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed invocation, e.g. `-f` with no file name.
    #[error("{0}")]
    Usage(String),

    /// A rule-file line that is neither a rule nor a command in context.
    /// `text` is the line as read, without its newline.
    #[error("malformed rule {text}")]
    MalformedRule { line: usize, text: String },

    /// A needed name has no rule and no file on disk.
    #[error("no rule for {0}")]
    NoRule(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that are reported while the run carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The rule file couldn't be read; the graph starts out empty.
    MissingRuleFile(String),
    /// A target got a second command block, replacing the first.
    DuplicateCommands(String),
    /// Resolution came back around to a target already being resolved.
    DependsOnItself(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingRuleFile(path) => write!(f, "unable to open {}", path),
            Warning::DuplicateCommands(name) => write!(f, "{} has two commands", name),
            Warning::DependsOnItself(name) => write!(f, "{} depends on itself", name),
        }
    }
}
