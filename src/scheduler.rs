// src/scheduler.rs
// Orders item delivery and re-inserts missed items a few turns later.

use std::collections::VecDeque;

use log::{debug, warn};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::deck::Item;
use crate::error::SchedulerError;

/// How many pending items a recycled item is placed behind.
pub const RECYCLE_OFFSET: usize = 3;

/// A trait defining the core behavior of any item scheduler.
pub trait Scheduler {
    /// Removes and returns the next item, refilling the queue first if it is empty.
    fn dequeue(&mut self) -> &Item;
    /// Puts the last delivered item back near the front of the queue.
    fn recycle(&mut self);
    /// Items waiting in the current pass.
    fn pending_count(&self) -> usize;
    /// Size of the full item set.
    fn universe_size(&self) -> usize;
}

/// Delivers every item once per pass in random order, with missed items requeued.
///
/// Items are tracked by their index in the universe, so two items with the same
/// text are still told apart.
pub struct RetryQueue<R: Rng = ThreadRng> {
    universe: Vec<Item>,
    pending: VecDeque<usize>,
    last_delivered: usize,
    has_delivered: bool,
    rng: R,
}

impl RetryQueue<ThreadRng> {
    pub fn new(items: Vec<Item>) -> Result<Self, SchedulerError> {
        RetryQueue::with_rng(items, thread_rng())
    }
}

impl<R: Rng> RetryQueue<R> {
    /// Builds a queue drawing its shuffles from `rng`.
    pub fn with_rng(items: Vec<Item>, rng: R) -> Result<Self, SchedulerError> {
        if items.is_empty() {
            return Err(SchedulerError::EmptyUniverse);
        }

        Ok(RetryQueue {
            universe: items,
            pending: VecDeque::new(),
            last_delivered: 0,
            has_delivered: false,
            rng,
        })
    }

    /// Universe index of the most recently delivered item (0 before any delivery).
    pub fn last_delivered(&self) -> usize {
        self.last_delivered
    }

    /// Universe indices of the pending items, front first.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending.iter().copied()
    }

    /// Removes the next item and returns its universe index.
    pub fn dequeue_index(&mut self) -> usize {
        if self.pending.is_empty() {
            self.fill();
        }

        // `fill` always leaves at least one entry because the universe is non-empty.
        let index = self.pending.pop_front().unwrap_or(0);
        self.last_delivered = index;
        self.has_delivered = true;
        index
    }

    /// Replaces the pending sequence with a fresh random permutation of the universe.
    fn fill(&mut self) {
        let mut order: Vec<usize> = (0..self.universe.len()).collect();
        order.shuffle(&mut self.rng);
        self.pending = order.into();
        debug!("Refilled queue with {} items.", self.pending.len());
    }
}

impl<R: Rng> Scheduler for RetryQueue<R> {
    fn dequeue(&mut self) -> &Item {
        let index = self.dequeue_index();
        &self.universe[index]
    }

    fn recycle(&mut self) {
        if !self.has_delivered {
            warn!("Recycling before any item was delivered; requeueing item 0.");
        }

        let insertion_point = RECYCLE_OFFSET.min(self.pending.len());
        self.pending.insert(insertion_point, self.last_delivered);
        debug!(
            "Recycled item #{} at position {} of {}.",
            self.last_delivered,
            insertion_point,
            self.pending.len()
        );
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn universe_size(&self) -> usize {
        self.universe.len()
    }
}
