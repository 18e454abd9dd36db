use sysinfo::System;

use crate::error::Result;

/// Command name git presents in the process table.
const GIT_COMMAND: &str = "git";

/// One row of a process snapshot. `parent` is 0 when the process has none,
/// matching the process table's own convention for pid 0/1.
#[derive(Debug, Clone)]
pub struct Process {
    pub pid: u32,
    pub parent: u32,
    pub command: String,
}

/// Source of system-wide process snapshots. Injectable so the ancestry
/// walk can be exercised against hand-built chains.
pub trait ProcessTable {
    fn snapshot(&mut self) -> Result<Vec<Process>>;
}

/// Walk the ancestry of the current process looking for git.
///
/// A fresh snapshot is fetched at every step: pids are sparse and can be
/// reused between steps, so a single stale snapshot could follow a
/// recycled pid to an unrelated process. The walk stops untrusted when it
/// reaches pid 0/1 or when the current ancestor (or this process itself)
/// is missing from its snapshot; a broken chain is a refusal, not a crash.
/// Only an unreadable table is an error, and that must never pass as
/// trusted.
pub fn is_git_ancestor(table: &mut impl ProcessTable) -> Result<bool> {
    let own_pid = std::process::id();
    let mut current = match find(&table.snapshot()?, own_pid) {
        Some(own) => own.parent,
        None => return Ok(false),
    };

    while current > 1 {
        let snapshot = table.snapshot()?;
        let Some(ancestor) = find(&snapshot, current) else {
            return Ok(false);
        };
        if ancestor.command == GIT_COMMAND {
            return Ok(true);
        }
        current = ancestor.parent;
    }

    Ok(false)
}

fn find(snapshot: &[Process], pid: u32) -> Option<&Process> {
    snapshot.iter().find(|process| process.pid == pid)
}

/// Real snapshot source, backed by the OS process table.
pub struct SystemTable {
    system: System,
}

impl SystemTable {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SystemTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SystemTable {
    fn snapshot(&mut self) -> Result<Vec<Process>> {
        self.system.refresh_processes();
        let processes: Vec<Process> = self
            .system
            .processes()
            .iter()
            .map(|(pid, process)| Process {
                pid: pid.as_u32(),
                parent: process.parent().map(|parent| parent.as_u32()).unwrap_or(0),
                command: process.name().to_string(),
            })
            .collect();

        // Not even this process is visible: the table itself is
        // unreadable, and an unanswerable security question is a refusal
        // to proceed.
        if processes.is_empty() {
            return Err(anyhow::anyhow!("unable to read the process table").into());
        }
        Ok(processes)
    }
}

/// Scripted snapshot source for tests.
#[cfg(test)]
pub(crate) struct FakeTable {
    pub(crate) processes: Vec<Process>,
    pub(crate) fail: bool,
    pub(crate) snapshots_taken: usize,
}

#[cfg(test)]
impl FakeTable {
    /// Table holding the current process, the given `(pid, command)`
    /// ancestors in order (nearest first), and init as the final parent.
    pub(crate) fn with_ancestors(ancestors: &[(u32, &str)]) -> Self {
        let parent_of = |index: usize| ancestors.get(index).map(|(pid, _)| *pid).unwrap_or(1);

        let mut processes = vec![Process {
            pid: std::process::id(),
            parent: parent_of(0),
            command: "git-password".to_string(),
        }];
        for (index, (pid, command)) in ancestors.iter().enumerate() {
            processes.push(Process {
                pid: *pid,
                parent: parent_of(index + 1),
                command: (*command).to_string(),
            });
        }
        processes.push(Process {
            pid: 1,
            parent: 0,
            command: "init".to_string(),
        });

        Self {
            processes,
            fail: false,
            snapshots_taken: 0,
        }
    }
}

#[cfg(test)]
impl ProcessTable for FakeTable {
    fn snapshot(&mut self) -> Result<Vec<Process>> {
        self.snapshots_taken += 1;
        if self.fail {
            return Err(anyhow::anyhow!("unable to read the process table").into());
        }
        Ok(self.processes.clone())
    }
}
