//! Fixed scenario runner
//!
//! This module provides the `scenarios` subcommand: long push/pop runs at
//! both ends and indexed reads after heavy rebalancing, each checked and
//! timed.

use anyhow::{Result, bail};
use clap::Args;
use persistent_deque::persistent::PersistentDeque;
use std::time::Instant;

/// Arguments for the scenarios subcommand
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Number of elements pushed in each scenario
    #[arg(long, default_value_t = 10_000)]
    pub size: i32,

    /// Number of leading indices read back in the indexing scenario
    #[arg(long, default_value_t = 1_000)]
    pub reads: i32,
}

/// Pushes `0..size` on the right, popping and re-pushing the rightmost element
/// after every push.
fn build_with_repush(size: i32) -> Result<PersistentDeque<i32>> {
    let mut deque = PersistentDeque::new();
    for value in 0..size {
        deque = deque.cons_right(value);
        let last = *deque.head_right()?;
        deque = deque.tail_right()?.cons_right(last);
    }
    Ok(deque)
}

fn push_right_pop_left(size: i32) -> Result<()> {
    let mut deque = build_with_repush(size)?;
    for expected in 0..size {
        let actual = *deque.head_left()?;
        if actual != expected {
            bail!("push-right/pop-left: expected {expected}, found {actual}");
        }
        deque = deque.tail_left()?;
    }
    if !deque.is_empty() {
        bail!("push-right/pop-left: {} elements left over", deque.len());
    }
    Ok(())
}

fn push_left_pop_right(size: i32) -> Result<()> {
    let mut deque = PersistentDeque::new();
    for value in 0..size {
        deque = deque.cons_left(value);
    }
    for expected in 0..size {
        let actual = *deque.head_right()?;
        if actual != expected {
            bail!("push-left/pop-right: expected {expected}, found {actual}");
        }
        deque = deque.tail_right()?;
    }
    Ok(())
}

fn indexed_reads(size: i32, reads: i32) -> Result<()> {
    let deque = build_with_repush(size)?;
    for index in 0..reads.min(size) {
        let actual = *deque.get(usize::try_from(index)?)?;
        if actual != index {
            bail!("indexed reads: get({index}) returned {actual}");
        }
    }
    Ok(())
}

fn timed(name: &str, scenario: impl FnOnce() -> Result<()>) -> Result<()> {
    let started = Instant::now();
    scenario()?;
    tracing::info!(
        scenario = name,
        elapsed_ms = started.elapsed().as_millis(),
        "passed"
    );
    Ok(())
}

/// Run the scenarios subcommand
pub fn run(args: &ScenariosArgs) -> Result<()> {
    if args.size < 0 || args.reads < 0 {
        bail!("size and reads must not be negative");
    }
    timed("push-right-pop-left", || push_right_pop_left(args.size))?;
    timed("push-left-pop-right", || push_left_pop_right(args.size))?;
    timed("indexed-reads", || indexed_reads(args.size, args.reads))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(257)]
    fn test_scenarios_pass(#[case] size: i32) {
        assert!(push_right_pop_left(size).is_ok());
        assert!(push_left_pop_right(size).is_ok());
        assert!(indexed_reads(size, size).is_ok());
    }

    #[rstest]
    fn test_run_rejects_negative_size() {
        let args = ScenariosArgs {
            size: -1,
            reads: 0,
        };
        assert!(run(&args).is_err());
    }
}
