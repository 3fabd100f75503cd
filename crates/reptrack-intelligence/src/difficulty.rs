// ABOUTME: Closed-loop difficulty controller driven by batches of recent repetition samples
// ABOUTME: Pluggable policy contract with a seeded epsilon-greedy Q-table implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Difficulty Controller
//!
//! Every time a sample is stored the controller looks at the newest batch.
//! Below the batch size nothing happens. Otherwise the batch is discretized
//! into a [`DifficultyState`], the policy picks a delta, the difficulty moves
//! (never below 1) and the policy learns from the reward:
//!
//! ```text
//! reward = +1  if |avg - target| < tolerance and errs == 0
//!          -1  otherwise
//! ```
//!
//! The policy only has to satisfy [`DifficultyPolicy`]; [`QTablePolicy`] is
//! the default.

use crate::config::intelligence::DifficultyConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reptrack_core::constants::difficulty::{MIN_DIFFICULTY, REWARD_OFF_TARGET, REWARD_ON_TARGET};
use reptrack_core::models::{DifficultyState, Sample};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Difficulty deltas a policy may choose; "hold" first so it wins value ties
pub const ACTIONS: [i32; 3] = [0, 1, -1];

/// Action selection and value learning over discretized batch states
pub trait DifficultyPolicy: Send {
    /// Choose a difficulty delta for `state`
    fn select_action(&mut self, state: DifficultyState) -> i32;

    /// Learn from the reward observed after taking `action` in `state`
    fn update(
        &mut self,
        state: DifficultyState,
        action: i32,
        reward: f64,
        next_state: DifficultyState,
    );
}

/// Epsilon-greedy tabular Q-learning
#[derive(Debug, Clone)]
pub struct QTablePolicy {
    values: HashMap<(DifficultyState, i32), f64>,
    rng: ChaCha8Rng,
    exploration_rate: f64,
    learning_rate: f64,
    discount_factor: f64,
}

impl QTablePolicy {
    /// Policy with rates and seed from configuration
    #[must_use]
    pub fn new(config: &DifficultyConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            values: HashMap::new(),
            rng,
            exploration_rate: config.exploration_rate,
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
        }
    }

    /// Learned value of an action in a state; unseen pairs are 0
    #[must_use]
    pub fn value(&self, state: DifficultyState, action: i32) -> f64 {
        self.values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    fn best_action(&self, state: DifficultyState) -> i32 {
        let mut best = ACTIONS[0];
        for action in &ACTIONS[1..] {
            if self.value(state, *action) > self.value(state, best) {
                best = *action;
            }
        }
        best
    }

    fn max_value(&self, state: DifficultyState) -> f64 {
        self.value(state, self.best_action(state))
    }
}

impl DifficultyPolicy for QTablePolicy {
    fn select_action(&mut self, state: DifficultyState) -> i32 {
        if self.rng.gen::<f64>() < self.exploration_rate {
            ACTIONS[self.rng.gen_range(0..ACTIONS.len())]
        } else {
            self.best_action(state)
        }
    }

    fn update(
        &mut self,
        state: DifficultyState,
        action: i32,
        reward: f64,
        next_state: DifficultyState,
    ) {
        let current = self.value(state, action);
        let target = self.discount_factor.mul_add(self.max_value(next_state), reward);
        let updated = self.learning_rate.mul_add(target - current, current);
        self.values.insert((state, action), updated);
    }
}

/// Outcome of one controller step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyUpdate {
    /// Discretized batch
    pub state: DifficultyState,
    /// Delta chosen by the policy
    pub action: i32,
    /// Reward credited to the policy
    pub reward: f64,
    /// Difficulty before the step
    pub previous: u32,
    /// Difficulty after the step
    pub difficulty: u32,
}

impl DifficultyUpdate {
    /// Whether the step moved the difficulty
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.previous != self.difficulty
    }
}

/// Rounded mean angle and total tag count of a batch
#[must_use]
pub fn batch_state(batch: &[Sample]) -> DifficultyState {
    if batch.is_empty() {
        return DifficultyState {
            avg_angle: 0,
            error_count: 0,
        };
    }
    let mean = batch.iter().map(|s| s.angle).sum::<f64>() / batch.len() as f64;
    DifficultyState {
        avg_angle: mean.round() as i64,
        error_count: batch.iter().map(|s| s.error_tags.len()).sum(),
    }
}

/// Reward for a batch state; the tolerance comparison is strict
#[must_use]
pub fn batch_reward(state: DifficultyState, target_angle: i64, tolerance: f64) -> f64 {
    let distance = (state.avg_angle - target_angle).abs() as f64;
    if distance < tolerance && state.error_count == 0 {
        REWARD_ON_TARGET
    } else {
        REWARD_OFF_TARGET
    }
}

/// Process-lifetime difficulty with a single writer
#[derive(Debug)]
pub struct DifficultyController<P = QTablePolicy> {
    policy: P,
    difficulty: u32,
    batch_size: usize,
    target_angle: i64,
    reward_tolerance: f64,
}

impl DifficultyController<QTablePolicy> {
    /// Controller with the default Q-table policy
    #[must_use]
    pub fn new(config: &DifficultyConfig) -> Self {
        Self::with_policy(config, QTablePolicy::new(config))
    }
}

impl<P: DifficultyPolicy> DifficultyController<P> {
    /// Controller with a custom policy
    #[must_use]
    pub fn with_policy(config: &DifficultyConfig, policy: P) -> Self {
        Self {
            policy,
            difficulty: config.initial_difficulty.max(MIN_DIFFICULTY),
            batch_size: config.batch_size,
            target_angle: config.target_angle,
            reward_tolerance: config.reward_tolerance,
        }
    }

    /// Current difficulty
    #[must_use]
    pub const fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Samples needed before a step happens
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The policy, for inspection
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Run one step over the newest samples (newest first)
    ///
    /// Returns `None` without touching any state while fewer than a full
    /// batch of samples exist, and always when the batch size is zero.
    pub fn observe(&mut self, recent: &[Sample]) -> Option<DifficultyUpdate> {
        if self.batch_size == 0 {
            return None;
        }
        let batch = recent.get(..self.batch_size)?;
        let state = batch_state(batch);
        let action = self.policy.select_action(state);

        let previous = self.difficulty;
        let moved = i64::from(previous) + i64::from(action);
        self.difficulty = u32::try_from(moved.max(i64::from(MIN_DIFFICULTY)))
            .unwrap_or(u32::MAX);

        let reward = batch_reward(state, self.target_angle, self.reward_tolerance);
        self.policy.update(state, action, reward, state);

        debug!(
            avg_angle = state.avg_angle,
            error_count = state.error_count,
            action,
            reward,
            previous,
            difficulty = self.difficulty,
            "difficulty controller step"
        );

        Some(DifficultyUpdate {
            state,
            action,
            reward,
            previous,
            difficulty: self.difficulty,
        })
    }
}
