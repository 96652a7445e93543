//! Composite runs: fork-join steps and ordered sequences of steps.
//!
//! Children are keyed by a caller-chosen channel `K` (usually a small enum
//! naming the animated property). Every child owns its own
//! [`ProgressDriver`], so parallel children never share progress state; they
//! only share the tick that advances them.

use super::{AnimationSpec, ProgressDriver};

/// Outcome of advancing a composite by one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepStatus {
    /// At least one child is still active
    Running,
    /// Every child completed; `leftover_ms` of the tick was not consumed
    Complete { leftover_ms: f32 },
}

impl StepStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, StepStatus::Complete { .. })
    }
}

/// Fork-join group of independent progress runs.
///
/// All children advance on the same tick, in no particular order relative to
/// each other. The group completes only when every child has completed.
#[derive(Clone, Debug)]
pub struct Parallel<K> {
    children: Vec<(K, ProgressDriver)>,
    /// Part of the last tick no child needed
    leftover_ms: f32,
}

impl<K: Copy> Parallel<K> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            leftover_ms: 0.0,
        }
    }

    /// A group with a single child.
    pub fn single(key: K, spec: AnimationSpec) -> Self {
        Self::new().with(key, spec)
    }

    /// Add a child run.
    pub fn with(mut self, key: K, spec: AnimationSpec) -> Self {
        self.children.push((key, ProgressDriver::start(spec)));
        self
    }

    /// Advance every active child by `dt_ms`, reporting each new value
    /// through `emit`.
    pub fn tick(&mut self, dt_ms: f32, mut emit: impl FnMut(K, f32)) -> StepStatus {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        // The child that finishes last consumes the most of the tick
        let mut leftover_ms = dt_ms;
        for (key, driver) in &mut self.children {
            if !driver.is_active() {
                continue;
            }
            if let Some(value) = driver.tick(dt_ms) {
                emit(*key, value);
            }
            let unused = if driver.is_finished() {
                driver.overshoot_ms()
            } else {
                0.0
            };
            leftover_ms = leftover_ms.min(unused);
        }
        self.leftover_ms = leftover_ms;
        self.status()
    }

    /// Completion barrier: `Complete` once every child has finished.
    pub fn status(&self) -> StepStatus {
        let completed = self
            .children
            .iter()
            .filter(|(_, driver)| !driver.is_active())
            .count();
        if completed < self.children.len() {
            return StepStatus::Running;
        }
        StepStatus::Complete {
            leftover_ms: self.leftover_ms,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    /// Start every child over with its own spec.
    pub fn restart(&mut self) {
        for (_, driver) in &mut self.children {
            driver.restart();
        }
        self.leftover_ms = 0.0;
    }

    /// Cancel every child.
    pub fn stop(&mut self) {
        for (_, driver) in &mut self.children {
            driver.stop();
        }
    }

    /// Current value of the child bound to `key`.
    pub fn value(&self, key: K) -> Option<f32>
    where
        K: PartialEq,
    {
        self.children
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, driver)| driver.value())
    }

    /// Initial values of every child, as they were at the start of the step.
    pub fn start_values(&self) -> impl Iterator<Item = (K, f32)> + '_ {
        self.children
            .iter()
            .map(|(key, driver)| (*key, driver.spec().start_value))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<K: Copy> Default for Parallel<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered list of steps executed back to back.
///
/// When a step completes mid-tick, the unused part of the tick flows into the
/// next step, so a sequence ticked at any frame rate stays on the same
/// timeline.
#[derive(Clone, Debug)]
pub struct Sequence<K> {
    steps: Vec<Parallel<K>>,
    current: usize,
    looping: bool,
}

/// Upper bound on step transitions handled in one tick.
const MAX_TRANSITIONS_PER_TICK: usize = 64;

impl<K: Copy> Sequence<K> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            current: 0,
            looping: false,
        }
    }

    /// Append a step.
    pub fn then(mut self, step: Parallel<K>) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a step holding a single run.
    pub fn then_run(self, key: K, spec: AnimationSpec) -> Self {
        self.then(Parallel::single(key, spec))
    }

    /// Start over from the first step after the last one completes.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn tick(&mut self, dt_ms: f32, mut emit: impl FnMut(K, f32)) -> StepStatus {
        let mut remaining = dt_ms;
        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            let Some(step) = self.steps.get_mut(self.current) else {
                return StepStatus::Complete {
                    leftover_ms: remaining.max(0.0),
                };
            };
            match step.tick(remaining, &mut emit) {
                StepStatus::Running => return StepStatus::Running,
                StepStatus::Complete { leftover_ms } => {
                    remaining = leftover_ms;
                    self.current += 1;
                    if self.current >= self.steps.len() {
                        if !self.looping {
                            return StepStatus::Complete { leftover_ms };
                        }
                        self.current = 0;
                        for step in &mut self.steps {
                            step.restart();
                        }
                        // Restarted steps show their start values right away
                        for (key, value) in self.steps[0].start_values() {
                            emit(key, value);
                        }
                    } else {
                        for (key, value) in self.steps[self.current].start_values() {
                            emit(key, value);
                        }
                    }
                    if remaining <= 0.0 {
                        return StepStatus::Running;
                    }
                }
            }
        }
        log::warn!("Sequence hit the transition limit in a single tick");
        StepStatus::Running
    }

    /// Index of the step currently running.
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.steps.len()
    }

    pub fn stop(&mut self) {
        for step in &mut self.steps {
            step.stop();
        }
        self.current = self.steps.len();
    }
}

impl<K: Copy> Default for Sequence<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RepeatMode;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Channel {
        A,
        B,
    }

    #[test]
    fn test_parallel_children_are_independent() {
        let mut group = Parallel::new()
            .with(Channel::A, AnimationSpec::linear(100.0).values(0.0, 10.0))
            .with(Channel::B, AnimationSpec::linear(200.0).values(0.0, 10.0));

        let mut seen = Vec::new();
        let status = group.tick(50.0, |k, v| seen.push((k, v)));
        assert_eq!(status, StepStatus::Running);
        assert_eq!(seen, vec![(Channel::A, 5.0), (Channel::B, 2.5)]);
    }

    #[test]
    fn test_parallel_joins_on_slowest_child() {
        let mut group = Parallel::new()
            .with(Channel::A, AnimationSpec::linear(100.0))
            .with(Channel::B, AnimationSpec::linear(200.0));

        assert_eq!(group.tick(150.0, |_, _| {}), StepStatus::Running);
        assert_eq!(group.value(Channel::A), Some(1.0));
        assert_eq!(
            group.tick(70.0, |_, _| {}),
            StepStatus::Complete { leftover_ms: 20.0 }
        );
    }

    #[test]
    fn test_parallel_with_infinite_child_never_completes() {
        let mut group = Parallel::new()
            .with(Channel::A, AnimationSpec::linear(100.0))
            .with(
                Channel::B,
                AnimationSpec::linear(100.0).repeat(RepeatMode::Restart),
            );
        for _ in 0..20 {
            assert_eq!(group.tick(50.0, |_, _| {}), StepStatus::Running);
        }
    }

    #[test]
    fn test_sequence_carries_leftover_into_next_step() {
        let mut seq = Sequence::new()
            .then_run(Channel::A, AnimationSpec::linear(100.0).values(0.0, 1.0))
            .then_run(Channel::B, AnimationSpec::linear(100.0).values(0.0, 1.0));

        let mut last_b = None;
        seq.tick(150.0, |k, v| {
            if k == Channel::B {
                last_b = Some(v);
            }
        });
        assert_eq!(seq.current_step(), 1);
        assert_eq!(last_b, Some(0.5));

        let status = seq.tick(60.0, |_, _| {});
        assert_eq!(status, StepStatus::Complete { leftover_ms: 10.0 });
        assert!(seq.is_complete());
    }

    #[test]
    fn test_looping_sequence_restarts() {
        let mut seq = Sequence::new()
            .then_run(Channel::A, AnimationSpec::linear(100.0))
            .looping(true);
        let mut last = 0.0;
        seq.tick(100.0, |_, v| last = v);
        // The restart emits the start value in the same tick
        assert_eq!(last, 0.0);
        seq.tick(25.0, |_, v| last = v);
        assert_eq!(last, 0.25);
        assert!(!seq.is_complete());
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut seq = Sequence::new()
            .then_run(Channel::A, AnimationSpec::linear(100.0))
            .then_run(Channel::B, AnimationSpec::linear(100.0));
        seq.tick(50.0, |_, _| {});
        seq.stop();
        let mut emitted = false;
        seq.tick(50.0, |_, _| emitted = true);
        assert!(!emitted);
        assert!(seq.is_complete());
    }
}
