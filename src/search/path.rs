use std::hash::BuildHasher;

use dashmap::DashMap;
use fxhash::FxHashMap;

use crate::error::Error;

use super::{Move, Record};

/// Read access to the parent pointers an engine recorded.
pub trait Records {
    fn lookup(&self, state: u64) -> Option<Record>;
    fn count(&self) -> usize;
}

impl Records for FxHashMap<u64, Record> {
    fn lookup(&self, state: u64) -> Option<Record> {
        self.get(&state).copied()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl<S> Records for DashMap<u64, Record, S>
where
    S: BuildHasher + Clone,
{
    fn lookup(&self, state: u64) -> Option<Record> {
        self.get(&state).map(|record| *record.value())
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// Follow parent pointers from `goal` back to the root and return the moves in play order.
pub fn reconstruct<R: Records>(records: &R, goal: u64) -> Result<Vec<Move>, Error> {
    let mut path = Vec::new();
    let mut current = goal;

    loop {
        match records.lookup(current).ok_or(Error::MissingRecord(current))? {
            Record::Root => break,
            Record::Step { parent, step } => {
                if parent == current || path.len() >= records.count() {
                    return Err(Error::RecordCycle(current));
                }

                path.push(step);
                current = parent;
            }
        }
    }

    path.reverse();
    Ok(path)
}
