//! Per-process CPU usage sampling
//!
//! CPU usage requires delta measurements between two time points: the
//! cumulative processor time a process has consumed, and the wall-clock
//! time elapsed between the two readings. The sampler keeps one baseline
//! per process identity and turns each new reading into a percentage of
//! the whole machine (all logical cores).

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Identity of a sampled process.
///
/// PIDs are recycled by the OS, so the executable name is part of the key;
/// entries are also purged explicitly when the process leaves the tracked
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub pid: u32,
    pub name: String,
}

impl SampleKey {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

/// Baseline of the previous measurement
#[derive(Debug, Clone)]
struct SamplerState {
    /// Wall-clock time of the previous measurement
    last_sample_at: Instant,
    /// Cumulative processor time at the previous measurement
    last_cpu_time: Duration,
    /// Percentage reported for the previous measurement
    last_percent: f64,
}

/// Holds per-process baselines for calculating CPU deltas
#[derive(Debug, Clone)]
pub struct CpuSampler {
    states: HashMap<SampleKey, SamplerState>,
    /// Number of logical processors
    logical_cores: u32,
}

impl CpuSampler {
    /// Creates an empty sampler normalising against `logical_cores` cores.
    pub fn new(logical_cores: u32) -> Self {
        Self {
            states: HashMap::new(),
            logical_cores: logical_cores.max(1),
        }
    }

    /// Records a reading and returns the CPU usage since the previous one.
    ///
    /// * First reading for `key`: stores the baseline and returns 0.
    /// * No elapsed wall time (duplicate tick, clock going backwards):
    ///   returns the previous percentage and leaves the baseline alone.
    /// * `cpu_time == None` (the OS query failed): returns 0 for this tick
    ///   and leaves the baseline alone.
    ///
    /// The result is always within `[0, 100]`.
    pub fn sample(&mut self, key: &SampleKey, cpu_time: Option<Duration>, now: Instant) -> f64 {
        let Some(cpu_time) = cpu_time else {
            return 0.0;
        };

        let Some(state) = self.states.get_mut(key) else {
            self.states.insert(
                key.clone(),
                SamplerState {
                    last_sample_at: now,
                    last_cpu_time: cpu_time,
                    last_percent: 0.0,
                },
            );
            return 0.0;
        };

        let wall_ms = match now.checked_duration_since(state.last_sample_at) {
            Some(elapsed) if !elapsed.is_zero() => elapsed.as_secs_f64() * 1000.0,
            _ => return state.last_percent,
        };
        let cpu_ms = (cpu_time.as_secs_f64() - state.last_cpu_time.as_secs_f64()) * 1000.0;

        let percent = cpu_percent(cpu_ms, wall_ms, self.logical_cores);

        state.last_sample_at = now;
        state.last_cpu_time = cpu_time;
        state.last_percent = percent;

        percent
    }

    /// Drops every baseline recorded for `pid`, whatever its name.
    pub fn purge_pid(&mut self, pid: u32) {
        self.states.retain(|key, _| key.pid != pid);
    }

    /// Returns true if any baseline exists for `pid`.
    #[cfg(test)]
    pub fn has_pid(&self, pid: u32) -> bool {
        self.states.keys().any(|key| key.pid == pid)
    }

    /// PIDs that currently have a baseline
    #[cfg(test)]
    pub fn pids(&self) -> impl Iterator<Item = u32> + '_ {
        self.states.keys().map(|key| key.pid)
    }

    /// Number of stored baselines
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Share of the whole machine consumed over an interval, clamped to
/// `[0, 100]`.
fn cpu_percent(cpu_ms: f64, wall_ms: f64, logical_cores: u32) -> f64 {
    let raw = cpu_ms / (f64::from(logical_cores) * wall_ms) * 100.0;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pid: u32) -> SampleKey {
        SampleKey::new(pid, "chrome")
    }

    #[test]
    fn test_first_sample_is_zero() {
        let mut sampler = CpuSampler::new(4);
        let t0 = Instant::now();

        let usage = sampler.sample(&key(10), Some(Duration::from_secs(90)), t0);
        assert_eq!(usage, 0.0);
        assert!(sampler.has_pid(10));
    }

    #[test]
    fn test_delta_is_normalised_by_core_count() {
        let mut sampler = CpuSampler::new(4);
        let t0 = Instant::now();
        sampler.sample(&key(10), Some(Duration::from_millis(1_000)), t0);

        // 2000 ms of CPU over 1000 ms of wall time on 4 cores = 50%
        let t1 = t0 + Duration::from_millis(1_000);
        let usage = sampler.sample(&key(10), Some(Duration::from_millis(3_000)), t1);
        assert!((usage - 50.0).abs() < 1e-9, "got {}", usage);

        // Baseline moved forward: 500 ms over the next second = 12.5%
        let t2 = t1 + Duration::from_millis(1_000);
        let usage = sampler.sample(&key(10), Some(Duration::from_millis(3_500)), t2);
        assert!((usage - 12.5).abs() < 1e-9, "got {}", usage);
    }

    #[test]
    fn test_result_is_clamped() {
        let mut sampler = CpuSampler::new(1);
        let t0 = Instant::now();
        sampler.sample(&key(1), Some(Duration::from_millis(0)), t0);

        let t1 = t0 + Duration::from_millis(100);
        let usage = sampler.sample(&key(1), Some(Duration::from_millis(250)), t1);
        assert_eq!(usage, 100.0);

        // Cumulative time going backwards never yields a negative reading
        let t2 = t1 + Duration::from_millis(100);
        let usage = sampler.sample(&key(1), Some(Duration::from_millis(10)), t2);
        assert_eq!(usage, 0.0);
    }

    #[test]
    fn test_zero_elapsed_returns_previous_value() {
        let mut sampler = CpuSampler::new(2);
        let t0 = Instant::now();
        sampler.sample(&key(7), Some(Duration::from_millis(0)), t0);

        let t1 = t0 + Duration::from_millis(1_000);
        let first = sampler.sample(&key(7), Some(Duration::from_millis(1_000)), t1);
        assert!((first - 50.0).abs() < 1e-9);

        // Duplicate tick: same instant, state untouched
        let again = sampler.sample(&key(7), Some(Duration::from_millis(1_900)), t1);
        assert_eq!(again, first);

        // The next real tick is measured from t1, not from the ignored reading
        let t2 = t1 + Duration::from_millis(1_000);
        let next = sampler.sample(&key(7), Some(Duration::from_millis(1_500)), t2);
        assert!((next - 25.0).abs() < 1e-9, "got {}", next);
    }

    #[test]
    fn test_failed_query_reads_zero_and_keeps_baseline() {
        let mut sampler = CpuSampler::new(1);
        let t0 = Instant::now();
        sampler.sample(&key(3), Some(Duration::from_millis(0)), t0);

        let t1 = t0 + Duration::from_millis(1_000);
        assert_eq!(sampler.sample(&key(3), None, t1), 0.0);

        let t2 = t0 + Duration::from_millis(2_000);
        let usage = sampler.sample(&key(3), Some(Duration::from_millis(1_000)), t2);
        assert!((usage - 50.0).abs() < 1e-9, "got {}", usage);
    }

    #[test]
    fn test_failed_query_on_unknown_key_creates_nothing() {
        let mut sampler = CpuSampler::new(1);
        assert_eq!(sampler.sample(&key(3), None, Instant::now()), 0.0);
        assert!(sampler.is_empty());
    }

    #[test]
    fn test_purge_pid_removes_every_name() {
        let mut sampler = CpuSampler::new(1);
        let t0 = Instant::now();
        sampler.sample(&SampleKey::new(5, "code"), Some(Duration::ZERO), t0);
        sampler.sample(&SampleKey::new(5, "steam"), Some(Duration::ZERO), t0);
        sampler.sample(&SampleKey::new(6, "code"), Some(Duration::ZERO), t0);

        sampler.purge_pid(5);
        assert!(!sampler.has_pid(5));
        assert!(sampler.has_pid(6));
        assert_eq!(sampler.len(), 1);
    }

    #[test]
    fn test_percent_always_in_range() {
        let mut sampler = CpuSampler::new(8);
        let mut now = Instant::now();
        let mut cpu = Duration::ZERO;
        sampler.sample(&key(1), Some(cpu), now);

        for step in 1..200u64 {
            now += Duration::from_millis(step * 7 % 31 + 1);
            cpu += Duration::from_millis(step * 13 % 97);
            let usage = sampler.sample(&key(1), Some(cpu), now);
            assert!((0.0..=100.0).contains(&usage), "step {} gave {}", step, usage);
        }
    }
}
