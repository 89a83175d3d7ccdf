//! Graph loading: runs rule-file parsing and constructs the rule graph from it.

use crate::error::{Result, Warning};
use crate::eval::{self, TargetVars};
use crate::fs::FileSystem;
use crate::graph::{Graph, TargetId};
use crate::parse::{self, Statement};
use crate::progress::Progress;
use crate::trace;
use tracing::debug;

/// Internal state used while loading.
struct Loader<'a> {
    graph: Graph,
    /// Targets named by the most recent rule; commands attach to these.
    current: Vec<TargetId>,
    progress: &'a mut dyn Progress,
}

impl<'a> Loader<'a> {
    fn new(progress: &'a mut dyn Progress) -> Self {
        Loader {
            graph: Graph::new(),
            current: Vec::new(),
            progress,
        }
    }

    fn add_rule(&mut self, rule: parse::Rule) {
        debug!(line = rule.line, targets = ?rule.targets, prereqs = ?rule.prereqs, "rule");
        self.current.clear();
        for name in &rule.targets {
            let id = self.graph.declare(name);
            if !self.current.contains(&id) {
                self.current.push(id);
            }
        }
        for name in &rule.prereqs {
            for &id in &self.current {
                self.graph.add_prereq(id, name);
            }
        }
        if let Some(command) = rule.command {
            self.add_command(command);
        }
    }

    /// Attach a command to every current target, expanding `$@` per target.
    fn add_command(&mut self, template: &str) {
        for &id in &self.current {
            let name = &self.graph.target(id).name;
            let command = eval::evaluate(template, &TargetVars { name });
            if self.graph.add_command(id, command) {
                let warning = Warning::DuplicateCommands(self.graph.target(id).name.clone());
                self.progress.warning(&warning);
            }
        }
    }

    fn parse(&mut self, text: &str) -> Result<()> {
        let mut parser = parse::Parser::new(text);
        while let Some(stmt) = parser.read()? {
            match stmt {
                Statement::Rule(rule) => self.add_rule(rule),
                Statement::Command(command) => self.add_command(command),
                Statement::End => self.current.clear(),
            }
        }
        Ok(())
    }
}

/// Parse rule-file text into a graph.
pub fn parse(text: &str, progress: &mut dyn Progress) -> Result<Graph> {
    let mut loader = Loader::new(progress);
    loader.parse(text)?;
    Ok(loader.graph)
}

/// Load the rule file `filename`.  A file that can't be read yields an empty
/// graph after a warning.
pub fn read(fs: &dyn FileSystem, filename: &str, progress: &mut dyn Progress) -> Result<Graph> {
    let bytes = match trace::scope("fs::read", || fs.read(filename)) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(%err, "read {}", filename);
            progress.warning(&Warning::MissingRuleFile(filename.to_owned()));
            return Ok(Graph::new());
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    let graph = trace::scope("load::parse", || parse(&text, progress))?;
    debug!(targets = graph.len(), "loaded {}", filename);
    Ok(graph)
}
