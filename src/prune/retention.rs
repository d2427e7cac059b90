use std::collections::BTreeSet;

use crate::prune::scan::ModelCheckpoint;

/// Where a retention phase begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseStart {
    /// Percentage of the span between the first and last saved step.
    Percent(f64),
    /// An absolute training step.
    Step(u64),
}

impl PhaseStart {
    /// Resolve to a step, truncating any fractional part.
    fn resolve(self, first: u64, span: u64) -> i64 {
        match self {
            PhaseStart::Percent(pct) => (first as f64 + span as f64 * pct / 100.0) as i64,
            PhaseStart::Step(step) => i64::try_from(step).unwrap_or(i64::MAX),
        }
    }
}

/// Three-phase retention: keep checkpoints every `early_interval` steps until
/// `middle_start`, every `middle_interval` until `last_start`, then every
/// `last_interval` until the end. The first and last checkpoints are always
/// kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPolicy {
    pub early_interval: u64,
    pub middle_interval: u64,
    pub last_interval: u64,
    pub middle_start: PhaseStart,
    pub last_start: PhaseStart,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy {
            early_interval: 5000,
            middle_interval: 10000,
            last_interval: 2000,
            middle_start: PhaseStart::Percent(33.0),
            last_start: PhaseStart::Percent(90.0),
        }
    }
}

impl RetentionPolicy {
    /// Steps to keep out of `checkpoints`. Every target step along the three
    /// phases keeps the saved step nearest to it.
    pub fn steps_to_keep(&self, checkpoints: &[ModelCheckpoint]) -> BTreeSet<u64> {
        let mut steps: Vec<u64> = checkpoints.iter().map(|c| c.step).collect();
        steps.sort_unstable();

        let mut keep = BTreeSet::new();
        let (Some(&first), Some(&last)) = (steps.first(), steps.last()) else {
            return keep;
        };
        keep.insert(first);
        keep.insert(last);

        let span = last - first;
        let middle_start = self.middle_start.resolve(first, span);
        let last_start = self.last_start.resolve(first, span);
        let first = i64::try_from(first).unwrap_or(i64::MAX);
        let last = i64::try_from(last).unwrap_or(i64::MAX);

        // Targets at or past the last step all resolve to it, and it is kept.
        let early = strided(first, middle_start.min(last), self.early_interval)
            .filter(|&t| t != first);
        let middle = strided(middle_start, last_start.min(last), self.middle_interval);
        let late = strided(last_start, last, self.last_interval).filter(|&t| t != last);

        for target in early.chain(middle).chain(late) {
            if let Some(step) = closest_step(&steps, target) {
                keep.insert(step);
            }
        }
        keep
    }
}

/// `start, start + stride, ...` while below `stop`.
fn strided(start: i64, stop: i64, stride: u64) -> impl Iterator<Item = i64> {
    // A zero stride is rejected by config validation; never loop forever on one.
    (start..stop.max(start)).step_by(stride.max(1) as usize)
}

/// The saved step nearest `target`; the earlier step wins a tie.
fn closest_step(steps: &[u64], target: i64) -> Option<u64> {
    let mut closest = None;
    let mut min_diff = u128::MAX;
    for &step in steps {
        let diff = (i128::from(step) - i128::from(target)).unsigned_abs();
        if diff < min_diff {
            min_diff = diff;
            closest = Some(step);
        }
    }
    closest
}
