//! Resolution of requested targets: decides which targets are out of date,
//! prerequisites first, and emits the commands that would rebuild them.

use crate::error::{Error, Result, Warning};
use crate::fs::{FileSystem, MTime};
use crate::graph::{Graph, TargetId};
use crate::progress::{self, Progress};
use tracing::debug;

/// The result of resolving one name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do: a plain file, a target already handled this run, or a
    /// target newer than its prerequisites.
    UpToDate,
    /// The target's commands were emitted.
    Rebuilt,
    /// Resolution reached a target already on the active path.
    Cycle,
}

/// Traversal context for one run.  Rebuilt and contributed state live on the
/// graph and persist across requests; `reset` clears only the active path.
pub struct Work<'a> {
    fs: &'a dyn FileSystem,
    graph: &'a mut Graph,
    progress: &'a mut dyn Progress,
}

impl<'a> Work<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        graph: &'a mut Graph,
        progress: &'a mut dyn Progress,
    ) -> Self {
        Work {
            fs,
            graph,
            progress,
        }
    }

    /// Resolve a name requested by the user, reporting it as up to date if
    /// no work was needed.
    pub fn want_file(&mut self, name: &str) -> Result<Outcome> {
        let outcome = self.resolve(name)?;
        if outcome == Outcome::UpToDate || self.graph.is_empty() {
            self.progress.up_to_date(name);
        }
        Ok(outcome)
    }

    /// Prepare for the next requested name.
    pub fn reset(&mut self) {
        self.graph.clear_active();
    }

    /// A file that can't be stat'd for any reason counts as missing.
    fn stat(&self, path: &str) -> MTime {
        match self.fs.stat(path) {
            Ok(mtime) => mtime,
            Err(err) => {
                debug!(%err, "stat {}", path);
                MTime::Missing
            }
        }
    }

    /// Resolve `name`, recursing into its prerequisites first.
    pub fn resolve(&mut self, name: &str) -> Result<Outcome> {
        let id = match self.graph.lookup(name) {
            Some(id) => id,
            None => {
                if self.stat(name).exists() {
                    return Ok(Outcome::UpToDate);
                }
                return Err(Error::NoRule(name.to_owned()));
            }
        };

        let target = self.graph.target(id);
        if target.rebuilt {
            return Ok(Outcome::UpToDate);
        }
        if target.active {
            self.progress.warning(&Warning::DependsOnItself(name.to_owned()));
            // Force the cycle point into the rebuilt state so callers treat
            // it as changed.  It stays active for the rest of this request.
            self.graph.target_mut(id).rebuilt = true;
            return Ok(Outcome::Cycle);
        }
        self.graph.target_mut(id).active = true;

        let count = self.graph.target(id).prereqs().len();
        for i in 0..count {
            let prereq = self.graph.target(id).prereqs()[i].name.clone();
            if self.resolve(&prereq)? != Outcome::Cycle {
                if let Some(pid) = self.graph.lookup(&prereq) {
                    self.graph.target_mut(pid).active = false;
                }
            }
        }

        let mtime = self.stat(name);
        if !mtime.exists() {
            debug!("{} is missing", name);
            for i in 0..count {
                self.graph.mark_contributed(id, i);
            }
            return Ok(self.rebuild(id));
        }

        let mut dirty = false;
        for i in 0..count {
            let prereq = &self.graph.target(id).prereqs()[i].name;
            let contributes = match self.graph.lookup(prereq) {
                Some(pid) => self.graph.target(pid).rebuilt,
                None => self.stat(prereq).newer_than(mtime),
            };
            if contributes {
                debug!("{} contributes to {}", prereq, name);
                self.graph.mark_contributed(id, i);
                dirty = true;
            }
        }
        if dirty {
            return Ok(self.rebuild(id));
        }
        Ok(Outcome::UpToDate)
    }

    fn rebuild(&mut self, id: TargetId) -> Outcome {
        self.graph.target_mut(id).rebuilt = true;
        debug!("rebuilding {}", self.graph.target(id).name);
        progress::emit_commands(self.graph, id, self.progress);
        Outcome::Rebuilt
    }
}
