//! The rule graph: targets, their prerequisites, and the commands that
//! rebuild them.
//!
//! Targets live in an arena addressed by `TargetId`.  Prerequisites refer to
//! other entities by name, since a prerequisite may be a plain file or a
//! target defined by a later rule.

use rustc_hash::FxHashMap;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetId(usize);
impl TargetId {
    fn index(&self) -> usize {
        self.0
    }
}

/// A target's reference to one of its prerequisites.
#[derive(Debug, Clone, PartialEq)]
pub struct Prereq {
    pub name: String,
    /// Set once this prerequisite caused its owner to be rebuilt.  Read by `$?`.
    /// Never cleared.
    pub contributed: bool,
}

#[derive(Debug)]
pub struct Target {
    pub name: String,
    prereqs: Vec<Prereq>,
    commands: Vec<String>,
    /// A later rule named this target while it already had commands; the
    /// next command attached replaces the old block.
    reset_commands: bool,
    /// Currently being resolved somewhere up the recursion.
    pub(crate) active: bool,
    /// Rebuilt (or forced into the rebuilt state) during this run.
    pub(crate) rebuilt: bool,
}

impl Target {
    fn new(name: String) -> Self {
        Target {
            name,
            prereqs: Vec::new(),
            commands: Vec::new(),
            reset_commands: false,
            active: false,
            rebuilt: false,
        }
    }

    /// Prerequisites in the order they were first listed.
    pub fn prereqs(&self) -> &[Prereq] {
        &self.prereqs
    }

    /// Command templates, with `$@` already substituted.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_rebuilt(&self) -> bool {
        self.rebuilt
    }
}

#[derive(Default)]
pub struct Graph {
    targets: Vec<Target>,
    by_name: FxHashMap<String, TargetId>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn lookup(&self, name: &str) -> Option<TargetId> {
        self.by_name.get(name).copied()
    }

    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id.index()]
    }

    pub(crate) fn target_mut(&mut self, id: TargetId) -> &mut Target {
        &mut self.targets[id.index()]
    }

    /// Look up a target by name, creating it if needed.  Naming an existing
    /// target that already has commands arms its command reset.
    pub fn declare(&mut self, name: &str) -> TargetId {
        if let Some(id) = self.lookup(name) {
            let target = self.target_mut(id);
            if !target.commands.is_empty() {
                target.reset_commands = true;
            }
            return id;
        }
        let id = TargetId(self.targets.len());
        self.targets.push(Target::new(name.to_owned()));
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Append a prerequisite unless the target already lists it.
    pub fn add_prereq(&mut self, id: TargetId, name: &str) {
        let prereqs = &mut self.target_mut(id).prereqs;
        if prereqs.iter().any(|p| p.name == name) {
            return;
        }
        prereqs.push(Prereq {
            name: name.to_owned(),
            contributed: false,
        });
    }

    /// Append an already-expanded command.  Returns true if a pending reset
    /// discarded the target's previous commands first.
    pub fn add_command(&mut self, id: TargetId, command: String) -> bool {
        let target = self.target_mut(id);
        let replaced = target.reset_commands;
        if replaced {
            target.commands.clear();
            target.reset_commands = false;
        }
        target.commands.push(command);
        replaced
    }

    pub(crate) fn mark_contributed(&mut self, id: TargetId, prereq: usize) {
        self.target_mut(id).prereqs[prereq].contributed = true;
    }

    /// Forget which targets are on the active path.  Rebuilt and contributed
    /// state is kept for the rest of the run.
    pub fn clear_active(&mut self) {
        for target in &mut self.targets {
            target.active = false;
        }
    }
}
