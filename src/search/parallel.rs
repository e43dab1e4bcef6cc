use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fxhash::FxBuildHasher;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::Error;

use super::path::reconstruct;
use super::space::StateSpace;
use super::{Record, SearchStats, Solution};

/// Breadth first search that expands each level across a rayon pool.
///
/// All workers share one `DashMap` of records; `entry` gives the insert-if-absent so only
/// the first worker to reach a state records its parent and queues it. `threads == 0` lets
/// rayon pick the pool size.
pub(crate) fn solve(
    space: &StateSpace,
    initial: u64,
    threads: usize,
) -> Result<(Solution, SearchStats), Error> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::WorkerPool(e.to_string()))?;

    pool.install(|| search(space, initial))
}

fn search(space: &StateSpace, initial: u64) -> Result<(Solution, SearchStats), Error> {
    let records: DashMap<u64, Record, FxBuildHasher> =
        DashMap::with_hasher(FxBuildHasher::default());
    records.insert(initial, Record::Root);

    let found = AtomicBool::new(false);
    let goal = AtomicU64::new(initial);

    let mut frontier = vec![initial];
    let mut depth = 0;

    while !frontier.is_empty() {
        log::debug!(
            "depth {}: expanding {} states, {} recorded",
            depth,
            frontier.len(),
            records.len()
        );

        let expanded: Vec<Result<Vec<u64>, Error>> = frontier
            .par_iter()
            .map(|&current| -> Result<Vec<u64>, Error> {
                if found.load(Ordering::Acquire) {
                    return Ok(Vec::new());
                }

                if space.is_goal(current) {
                    if found
                        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        goal.store(current, Ordering::Release);
                    }
                    return Ok(Vec::new());
                }

                let mut discovered = Vec::new();
                space.expand(current, |next, step| {
                    if found.load(Ordering::Relaxed) {
                        return false;
                    }

                    if let Entry::Vacant(slot) = records.entry(next) {
                        slot.insert(Record::Step {
                            parent: current,
                            step,
                        });
                        discovered.push(next);
                    }
                    true
                })?;

                Ok(discovered)
            })
            .collect();

        // Every worker is done with this level, so errors and the goal are settled
        let mut next = Vec::new();
        for discovered in expanded {
            next.extend(discovered?);
        }

        if found.load(Ordering::Acquire) {
            let moves = reconstruct(&records, goal.load(Ordering::Acquire))?;
            let stats = SearchStats {
                states: records.len(),
                depth,
            };
            return Ok((Solution::from(moves), stats));
        }

        frontier = next;
        depth += 1;
    }

    let stats = SearchStats {
        states: records.len(),
        depth: depth.saturating_sub(1),
    };
    Ok((Solution::Unreachable, stats))
}
