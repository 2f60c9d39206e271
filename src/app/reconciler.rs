//! Snapshot reconciler
//!
//! Each pass takes one enumeration of the OS process table, keeps the
//! known applications, picks one representative instance per executable
//! and diffs the result against the tracked set. The output is the set of
//! created, updated and removed processes for that pass.
//!
//! A tracked process is identified by `(pid, executable)`: a recycled PID
//! that now belongs to a different executable is a removal plus a
//! creation, never an update.

use std::time::Instant;

use log::{debug, trace};

use crate::app::registry::{self, KnownApp};
use crate::constants::BYTES_PER_MB;
use crate::system::{
    bytes_to_mb, CpuSampler, EnumerationError, ProcessSource, ProcessUsage, SampleKey,
};

/// A known application currently being tracked
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedProcess {
    pub pid: u32,
    /// Normalised executable name (registry key)
    pub executable: String,
    pub display_name: &'static str,
    pub icon: &'static str,
    /// Share of the whole machine over the last interval, 0-100
    pub cpu_percent: f64,
    /// Resident size in whole megabytes
    pub memory_mb: u64,
}

impl TrackedProcess {
    /// Secondary text shown under the display name
    pub fn description(&self) -> String {
        format!("PID: {}", self.pid)
    }

    fn is(&self, pid: u32, executable: &str) -> bool {
        self.pid == pid && self.executable == executable
    }
}

/// What changed in one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub created: Vec<TrackedProcess>,
    /// Surviving processes with their new readings
    pub updated: Vec<TrackedProcess>,
    pub removed: Vec<TrackedProcess>,
}

impl ReconcileReport {
    /// True when the pass created or removed nothing
    pub fn is_steady(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Representative instance of one executable for the current pass
struct Candidate {
    pid: u32,
    executable: String,
    app: &'static KnownApp,
    /// None when the usage query failed this tick
    usage: Option<ProcessUsage>,
    /// Resident bytes used to pick the largest instance
    rank: u64,
}

/// Owns the tracked set and the CPU sampler.
#[derive(Debug, Clone)]
pub struct ProcessTracker {
    /// Insertion order is preserved
    tracked: Vec<TrackedProcess>,
    sampler: CpuSampler,
    /// Killed processes the OS may still list while they exit, as
    /// `(pid, executable)`; dropped once an enumeration no longer has them
    exiting: Vec<(u32, String)>,
}

impl ProcessTracker {
    pub fn new(logical_cores: u32) -> Self {
        Self {
            tracked: Vec::new(),
            sampler: CpuSampler::new(logical_cores),
            exiting: Vec::new(),
        }
    }

    /// Current tracked set, in insertion order
    pub fn tracked(&self) -> &[TrackedProcess] {
        &self.tracked
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Runs one reconciliation pass against `source`.
    ///
    /// When enumeration fails the tracked set is left untouched and the
    /// error is returned; nothing is created, updated or removed.
    pub fn reconcile<S>(&mut self, source: &mut S, now: Instant) -> Result<ReconcileReport, EnumerationError>
    where
        S: ProcessSource + ?Sized,
    {
        let entries = source.enumerate()?;
        let live_count = entries.len();
        self.exiting.retain(|(pid, executable)| {
            entries
                .iter()
                .any(|e| e.pid == *pid && registry::normalize_name(&e.name) == *executable)
        });
        let candidates = self.select_candidates(source, entries.into_iter().map(|e| (e.pid, e.name)));

        let mut report = ReconcileReport::default();

        // Removals first so a recycled PID starts from a clean sampler
        let previous = std::mem::take(&mut self.tracked);
        for process in previous {
            if candidates.iter().any(|c| process.is(c.pid, &c.executable)) {
                self.tracked.push(process);
            } else {
                self.sampler.purge_pid(process.pid);
                report.removed.push(process);
            }
        }

        for candidate in candidates {
            let key = SampleKey::new(candidate.pid, candidate.executable.as_str());
            let cpu_percent = self
                .sampler
                .sample(&key, candidate.usage.map(|u| u.cpu_time), now);

            let existing = self
                .tracked
                .iter_mut()
                .find(|p| p.is(candidate.pid, &candidate.executable));

            match existing {
                Some(process) => {
                    process.cpu_percent = cpu_percent;
                    if let Some(usage) = candidate.usage {
                        process.memory_mb = bytes_to_mb(usage.resident_bytes);
                    }
                    report.updated.push(process.clone());
                }
                None => {
                    let process = TrackedProcess {
                        pid: candidate.pid,
                        executable: candidate.executable,
                        display_name: candidate.app.display_name,
                        icon: candidate.app.icon,
                        cpu_percent,
                        memory_mb: candidate.usage.map_or(0, |u| bytes_to_mb(u.resident_bytes)),
                    };
                    report.created.push(process.clone());
                    self.tracked.push(process);
                }
            }
        }

        debug!(
            "Reconciled {} OS processes: {} created, {} updated, {} removed",
            live_count,
            report.created.len(),
            report.updated.len(),
            report.removed.len()
        );

        Ok(report)
    }

    /// Drops a process right after it was terminated, without waiting for
    /// the next pass to notice. Sampler state for the PID goes with it.
    ///
    /// Until an enumeration stops listing it, the same `(pid, executable)`
    /// is never tracked again.
    pub fn forget(&mut self, pid: u32) -> Option<TrackedProcess> {
        self.sampler.purge_pid(pid);
        let index = self.tracked.iter().position(|p| p.pid == pid)?;
        let process = self.tracked.remove(index);
        self.exiting.push((process.pid, process.executable.clone()));
        Some(process)
    }

    /// Filters the raw table to known applications, queries their usage and
    /// keeps the largest instance of each executable (first one wins ties).
    fn select_candidates<S>(
        &self,
        source: &mut S,
        entries: impl Iterator<Item = (u32, String)>,
    ) -> Vec<Candidate>
    where
        S: ProcessSource + ?Sized,
    {
        let mut candidates: Vec<Candidate> = Vec::new();

        for (pid, name) in entries {
            let Some(app) = registry::lookup(&name) else {
                continue;
            };
            let executable = registry::normalize_name(&name);
            if self.exiting.iter().any(|(p, e)| *p == pid && *e == executable) {
                trace!("Ignoring {} ({}) while it exits", executable, pid);
                continue;
            }

            let usage = match source.usage(pid) {
                Ok(usage) => Some(usage),
                Err(e) => {
                    trace!("Skipping reading for {} ({}): {}", executable, pid, e);
                    None
                }
            };

            // An unreadable process only competes if it is already tracked,
            // using its last known size
            let tracked_mb = self
                .tracked
                .iter()
                .find(|p| p.is(pid, &executable))
                .map(|p| p.memory_mb);
            let rank = match (usage, tracked_mb) {
                (Some(usage), _) => usage.resident_bytes,
                (None, Some(mb)) => mb.saturating_mul(BYTES_PER_MB),
                (None, None) => continue,
            };

            let candidate = Candidate {
                pid,
                executable,
                app,
                usage,
                rank,
            };

            match candidates
                .iter_mut()
                .find(|c| c.executable == candidate.executable)
            {
                Some(current) if candidate.rank > current.rank => *current = candidate,
                Some(_) => {}
                None => candidates.push(candidate),
            }
        }

        candidates
    }
}
