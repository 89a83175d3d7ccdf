//! Reporting of commands and diagnostics, for the purpose of display to the
//! user.

use crate::error::Warning;
use crate::eval::{self, PrereqVars};
use crate::graph::{Graph, TargetId};

/// Trait for build progress notifications.
pub trait Progress {
    /// Called once per command line of a target being rebuilt, after macro
    /// expansion.
    fn command(&mut self, cmdline: &str);

    /// Called for a non-fatal problem.
    fn warning(&mut self, warning: &Warning);

    /// Called when a requested target needed no work.
    fn up_to_date(&mut self, name: &str);
}

/// Emit every command of `id`, expanding `$^` and `$?` against its current
/// prerequisite list.
pub fn emit_commands(graph: &Graph, id: TargetId, progress: &mut dyn Progress) {
    let target = graph.target(id);
    let env = PrereqVars {
        prereqs: target.prereqs(),
    };
    for command in target.commands() {
        progress.command(&eval::evaluate(command, &env));
    }
}

/// Progress implementation for the console: commands and status on stdout,
/// warnings on stderr.
#[derive(Default)]
pub struct ConsoleProgress {}

impl ConsoleProgress {
    pub fn new() -> Self {
        ConsoleProgress {}
    }
}

impl Progress for ConsoleProgress {
    fn command(&mut self, cmdline: &str) {
        println!("{}", cmdline);
    }

    fn warning(&mut self, warning: &Warning) {
        eprintln!("nmake: {}", warning);
    }

    fn up_to_date(&mut self, name: &str) {
        println!("nmake: '{}' is up to date.", name);
    }
}
