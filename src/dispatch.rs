//! Work dispatcher (C8): hands out contiguous chunks of the target range to
//! worker threads, shrinking chunk size as the remaining work runs out so
//! the last few threads to finish don't starve while one thread holds a
//! huge tail chunk.
//!
//! A single mutex guards `(next, remaining_chunks, total)`; each call
//! claims `ceil((total - next) / remaining_chunks)` items, then decrements
//! `remaining_chunks`.

use std::sync::Mutex;

struct State {
    next: usize,
    remaining_chunks: usize,
    total: usize,
}

/// A `total`-item range divided into work by repeated [`Dispatcher::get_work`]
/// calls. Safe to share across threads behind a shared reference; all
/// mutation goes through the internal mutex.
pub struct Dispatcher {
    state: Mutex<State>,
}

impl Dispatcher {
    /// `total` items split across up to `worker_count` chunks (each worker
    /// may call [`Dispatcher::get_work`] more than once as chunks shrink).
    pub fn new(total: usize, worker_count: usize) -> Self {
        Self {
            state: Mutex::new(State {
                next: 0,
                remaining_chunks: worker_count.max(1),
                total,
            }),
        }
    }

    /// Claims the next chunk as a half-open `[start, end)` range, or `None`
    /// once the whole range has been handed out.
    pub fn get_work(&self) -> Option<(usize, usize)> {
        let mut state = self.state.lock().expect("dispatcher mutex poisoned");
        if state.next >= state.total {
            return None;
        }
        let remaining_items = state.total - state.next;
        let chunk = remaining_items.div_ceil(state.remaining_chunks);
        let start = state.next;
        let end = (start + chunk).min(state.total);
        state.next = end;
        if state.remaining_chunks > 1 {
            state.remaining_chunks -= 1;
        }
        Some((start, end))
    }
}
