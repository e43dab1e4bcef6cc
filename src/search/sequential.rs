use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::error::Error;

use super::path::reconstruct;
use super::space::StateSpace;
use super::{Record, SearchStats, Solution};

/// Plain level-by-level breadth first search on one thread.
pub(crate) fn solve(space: &StateSpace, initial: u64) -> Result<(Solution, SearchStats), Error> {
    let mut records: FxHashMap<u64, Record> = FxHashMap::default();
    records.insert(initial, Record::Root);

    let mut queue = VecDeque::from([initial]);
    let mut depth = 0;
    let mut iter = 0;

    while !queue.is_empty() {
        for _ in 0..queue.len() {
            let Some(current) = queue.pop_front() else {
                break;
            };
            iter += 1;

            if iter % 100_000 == 0 {
                tracing::debug!(
                    "iter: {}, depth: {}, queue: {}, recorded: {}",
                    iter,
                    depth,
                    queue.len(),
                    records.len()
                );
            }

            if space.is_goal(current) {
                let moves = reconstruct(&records, current)?;
                let stats = SearchStats {
                    states: records.len(),
                    depth,
                };
                return Ok((Solution::from(moves), stats));
            }

            space.expand(current, |next, step| {
                if let Entry::Vacant(slot) = records.entry(next) {
                    slot.insert(Record::Step {
                        parent: current,
                        step,
                    });
                    queue.push_back(next);
                }
                true
            })?;
        }

        depth += 1;
    }

    let stats = SearchStats {
        states: records.len(),
        depth: depth.saturating_sub(1),
    };
    Ok((Solution::Unreachable, stats))
}
