//! Model-checked workload runner
//!
//! This module provides the `workload` subcommand. It drives a
//! `PersistentDeque` and a `VecDeque` model through a seeded random mix of
//! operations and stops at the first divergence.

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use persistent_deque::persistent::PersistentDeque;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

const DEFAULT_OPERATIONS: usize = 10_000;
const DEFAULT_SEED: u64 = 0x5eed;

/// Arguments for the workload subcommand
#[derive(Args, Debug)]
pub struct WorkloadArgs {
    /// Workload YAML file path
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Override number of operations
    #[arg(long)]
    pub operations: Option<usize>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Compare full contents every N operations (length is always compared)
    #[arg(long)]
    pub check_every: Option<usize>,
}

/// Workload configuration from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorkloadConfig {
    name: Option<String>,
    operations: Option<usize>,
    seed: Option<u64>,
    check_every: Option<usize>,
    weights: Option<OperationWeights>,
}

/// Relative frequency of each operation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
struct OperationWeights {
    push_left: u32,
    push_right: u32,
    pop_left: u32,
    pop_right: u32,
    swap: u32,
    concat: u32,
    double_push_left: u32,
    double_push_right: u32,
}

impl Default for OperationWeights {
    fn default() -> Self {
        Self {
            push_left: 1,
            push_right: 1,
            pop_left: 1,
            pop_right: 1,
            swap: 1,
            concat: 1,
            double_push_left: 1,
            double_push_right: 1,
        }
    }
}

impl OperationWeights {
    const fn as_array(&self) -> [u32; 8] {
        [
            self.push_left,
            self.push_right,
            self.pop_left,
            self.pop_right,
            self.swap,
            self.concat,
            self.double_push_left,
            self.double_push_right,
        ]
    }
}

/// Settings after merging CLI, environment, file and defaults
#[derive(Debug, PartialEq, Eq)]
struct WorkloadSettings {
    name: String,
    operations: usize,
    seed: u64,
    check_every: usize,
    weights: OperationWeights,
}

impl WorkloadSettings {
    /// Priority: CLI > Environment > Workload YAML > Default
    fn resolve(
        args: &WorkloadArgs,
        config: WorkloadConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let operations = args
            .operations
            .or_else(|| lookup("WORKLOAD_OPERATIONS").and_then(|v| v.parse().ok()))
            .or(config.operations)
            .unwrap_or(DEFAULT_OPERATIONS);

        let seed = args
            .seed
            .or_else(|| lookup("WORKLOAD_SEED").and_then(|v| v.parse().ok()))
            .or(config.seed)
            .unwrap_or(DEFAULT_SEED);

        let check_every = args.check_every.or(config.check_every).unwrap_or(1);
        ensure!(check_every > 0, "check_every must be at least 1");

        let weights = config.weights.unwrap_or_default();
        ensure!(
            weights.as_array().iter().any(|&weight| weight > 0),
            "at least one operation weight must be positive"
        );

        Ok(Self {
            name: config.name.unwrap_or_else(|| "default".to_string()),
            operations,
            seed,
            check_every,
            weights,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    PushLeft(i32),
    PushRight(i32),
    PopLeft,
    PopRight,
    Swap,
    Concat,
    DoublePushLeft(i32, i32),
    DoublePushRight(i32, i32),
}

/// The deque under test, a second deque to swap with and concatenate, and
/// the `VecDeque` models of both.
struct Workload {
    deque: PersistentDeque<i32>,
    secondary: PersistentDeque<i32>,
    model: VecDeque<i32>,
    secondary_model: VecDeque<i32>,
}

impl Workload {
    fn new() -> Self {
        Self {
            deque: PersistentDeque::new(),
            secondary: PersistentDeque::new(),
            model: VecDeque::new(),
            secondary_model: VecDeque::new(),
        }
    }

    fn apply(&mut self, operation: Operation) {
        match operation {
            Operation::PushLeft(value) => {
                self.deque = self.deque.cons_left(value);
                self.model.push_front(value);
            }
            Operation::PushRight(value) => {
                self.deque = self.deque.cons_right(value);
                self.model.push_back(value);
            }
            Operation::PopLeft => {
                if let Ok(rest) = self.deque.tail_left() {
                    self.deque = rest;
                    self.model.pop_front();
                }
            }
            Operation::PopRight => {
                if let Ok(rest) = self.deque.tail_right() {
                    self.deque = rest;
                    self.model.pop_back();
                }
            }
            Operation::Swap => {
                std::mem::swap(&mut self.deque, &mut self.secondary);
                std::mem::swap(&mut self.model, &mut self.secondary_model);
            }
            Operation::Concat => {
                self.deque = self.deque.concat(&self.secondary);
                self.model.append(&mut self.secondary_model);
                self.secondary = PersistentDeque::new();
            }
            Operation::DoublePushLeft(outer, inner) => {
                self.deque = self.deque.cons_cons_left(outer, inner);
                self.model.push_front(inner);
                self.model.push_front(outer);
            }
            Operation::DoublePushRight(inner, outer) => {
                self.deque = self.deque.cons_cons_right(inner, outer);
                self.model.push_back(inner);
                self.model.push_back(outer);
            }
        }
    }

    fn verify(&self, step: usize, operation: Operation, full: bool) -> Result<()> {
        if self.deque.len() != self.model.len() {
            bail!(
                "length diverged at step {step} after {operation:?}: deque {} vs model {}",
                self.deque.len(),
                self.model.len()
            );
        }
        if full {
            let mut contents = Vec::with_capacity(self.deque.len());
            self.deque.for_each(|element| contents.push(*element));
            if let Some(position) = contents
                .iter()
                .zip(self.model.iter())
                .position(|(actual, expected)| actual != expected)
            {
                bail!(
                    "contents diverged at step {step} after {operation:?}: index {position} holds {} but model has {}",
                    contents[position],
                    self.model[position]
                );
            }
        }
        Ok(())
    }
}

fn next_operation(rng: &mut StdRng, choices: &WeightedIndex<u32>) -> Operation {
    let value: i32 = rng.random();
    match choices.sample(rng) {
        0 => Operation::PushLeft(value),
        1 => Operation::PushRight(value),
        2 => Operation::PopLeft,
        3 => Operation::PopRight,
        4 => Operation::Swap,
        5 => Operation::Concat,
        6 => Operation::DoublePushLeft(value, value.wrapping_add(1)),
        _ => Operation::DoublePushRight(value, value.wrapping_add(1)),
    }
}

/// Runs the whole workload, returning the final deque length.
fn execute(settings: &WorkloadSettings) -> Result<usize> {
    let choices = WeightedIndex::new(settings.weights.as_array())
        .context("Invalid operation weights")?;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut workload = Workload::new();

    for step in 0..settings.operations {
        let operation = next_operation(&mut rng, &choices);
        workload.apply(operation);
        let full = step % settings.check_every == 0 || step + 1 == settings.operations;
        workload.verify(step, operation, full)?;
    }

    Ok(workload.deque.len())
}

fn load_config(path: Option<&PathBuf>) -> Result<WorkloadConfig> {
    let Some(path) = path else {
        return Ok(WorkloadConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workload file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse workload file: {}", path.display()))
}

/// Run the workload subcommand
pub fn run(args: &WorkloadArgs) -> Result<()> {
    let config = load_config(args.scenario.as_ref())?;
    let settings = WorkloadSettings::resolve(args, config, |key| env::var(key).ok())?;

    tracing::info!(
        name = %settings.name,
        operations = settings.operations,
        seed = settings.seed,
        check_every = settings.check_every,
        "starting workload"
    );

    let started = Instant::now();
    let final_len = execute(&settings)?;

    tracing::info!(
        final_len,
        elapsed_ms = started.elapsed().as_millis(),
        "workload matched the model"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn no_args() -> WorkloadArgs {
        WorkloadArgs {
            scenario: None,
            operations: None,
            seed: None,
            check_every: None,
        }
    }

    #[rstest]
    fn test_defaults_apply_without_any_source() {
        let settings = WorkloadSettings::resolve(&no_args(), WorkloadConfig::default(), |_| None)
            .unwrap();
        assert_eq!(settings.operations, DEFAULT_OPERATIONS);
        assert_eq!(settings.seed, DEFAULT_SEED);
        assert_eq!(settings.check_every, 1);
        assert_eq!(settings.weights, OperationWeights::default());
    }

    #[rstest]
    fn test_priority_cli_over_environment_over_file() {
        let config = WorkloadConfig {
            operations: Some(10),
            seed: Some(1),
            ..WorkloadConfig::default()
        };
        let lookup = |key: &str| match key {
            "WORKLOAD_SEED" => Some("2".to_string()),
            "WORKLOAD_OPERATIONS" => Some("20".to_string()),
            _ => None,
        };
        let args = WorkloadArgs {
            operations: Some(30),
            ..no_args()
        };

        let settings = WorkloadSettings::resolve(&args, config, lookup).unwrap();
        assert_eq!(settings.operations, 30);
        assert_eq!(settings.seed, 2);
    }

    #[rstest]
    fn test_unparsable_environment_falls_through_to_file() {
        let config = WorkloadConfig {
            seed: Some(7),
            ..WorkloadConfig::default()
        };
        let settings = WorkloadSettings::resolve(&no_args(), config, |_| {
            Some("not a number".to_string())
        })
        .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.operations, DEFAULT_OPERATIONS);
    }

    #[rstest]
    fn test_zero_weights_are_rejected() {
        let config = WorkloadConfig {
            weights: Some(OperationWeights {
                push_left: 0,
                push_right: 0,
                pop_left: 0,
                pop_right: 0,
                swap: 0,
                concat: 0,
                double_push_left: 0,
                double_push_right: 0,
            }),
            ..WorkloadConfig::default()
        };
        assert!(WorkloadSettings::resolve(&no_args(), config, |_| None).is_err());
    }

    #[rstest]
    fn test_yaml_with_partial_weights() {
        let config: WorkloadConfig = serde_yaml::from_str(
            "name: left-heavy\noperations: 500\nweights:\n  push_left: 5\n",
        )
        .unwrap();
        let weights = config.weights.clone().unwrap();
        assert_eq!(weights.push_left, 5);
        assert_eq!(weights.concat, 1);

        let settings = WorkloadSettings::resolve(&no_args(), config, |_| None).unwrap();
        assert_eq!(settings.name, "left-heavy");
        assert_eq!(settings.operations, 500);
    }

    #[rstest]
    #[case(1)]
    #[case(42)]
    #[case(0xdead_beef)]
    fn test_execute_matches_model(#[case] seed: u64) {
        let settings = WorkloadSettings {
            name: "test".to_string(),
            operations: 2000,
            seed,
            check_every: 1,
            weights: OperationWeights::default(),
        };
        assert!(execute(&settings).is_ok());
    }

    #[rstest]
    fn test_concat_empties_secondary() {
        let mut workload = Workload::new();
        for value in 0..30 {
            workload.apply(Operation::PushRight(value));
        }
        workload.apply(Operation::Swap);
        for value in 30..75 {
            workload.apply(Operation::PushRight(value));
        }
        workload.apply(Operation::Swap);
        workload.apply(Operation::Concat);

        assert!(workload.deque.iter().copied().eq(0..75));
        assert!(workload.model.iter().copied().eq(0..75));
        assert!(workload.secondary.is_empty());
        assert!(workload.secondary_model.is_empty());
        assert!(workload.verify(0, Operation::Concat, true).is_ok());

        workload.apply(Operation::Concat);
        assert_eq!(workload.deque.len(), 75);
        assert!(workload.verify(1, Operation::Concat, true).is_ok());
    }
}
