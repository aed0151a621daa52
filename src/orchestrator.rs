//! Orchestrator (C9): runs one query against an entire database, splitting
//! the database across worker threads via the [`Dispatcher`], at the
//! 8-bit cell width by default and re-running only the sequences whose
//! score saturated at the next width up.
//!
//! Threads are shrunk so every thread gets at least one full channel block
//! of work (see [`adjust_thread_number`]), and a saturated 8-bit score is
//! handled by re-running just that subset of targets one cell width up.

use std::sync::Mutex;

use crate::config::AlignerConfig;
use crate::database::{Database, PackedSequence};
use crate::dirring::DirRing;
use crate::dispatch::Dispatcher;
use crate::error::AlignError;
use crate::pool::WorkerPool;
use crate::scheduler::{self, SearchHit, Target};
use crate::simd::{has_x86_backend, Lane, ScalarLane16, ScalarLane8, X86Lane16, X86Lane8};

/// Shrinks `n_threads` until the remaining work can't leave any thread
/// with fewer than one full block (`channels` targets) of work.
///
/// # Panics
///
/// Panics if `remaining_sequences` or `n_threads` is zero, or `bits` is
/// neither 8 nor 16 — all three are caller contract violations.
pub fn adjust_thread_number(bits: u32, remaining_sequences: u64, mut n_threads: u64) -> u64 {
    assert!(remaining_sequences != 0, "adjust_thread_number called with no remaining work");
    assert!(n_threads != 0, "adjust_thread_number called with zero threads");
    assert!(bits == 8 || bits == 16, "cell width must be 8 or 16 bits");

    let channels: u64 = if bits == 16 { 8 } else { 16 };

    while remaining_sequences <= (n_threads - 1) * channels {
        n_threads -= 1;
    }

    n_threads
}

fn run_width<L: Lane>(
    query_codes: &[u8], config: &AlignerConfig, targets: &[Target<'_>], longest: usize, bits: u32, pool: &dyn WorkerPool,
) -> Vec<SearchHit>
where
    L::Scalar: From<u8>,
{
    if targets.is_empty() {
        return Vec::new();
    }

    let thread_count = adjust_thread_number(bits, targets.len() as u64, config.threads.max(1) as u64) as usize;
    let dispatcher = Dispatcher::new(targets.len(), thread_count);
    let collected: Mutex<Vec<SearchHit>> = Mutex::new(Vec::with_capacity(targets.len()));

    let tasks: Vec<Box<dyn FnOnce(usize) + Send + '_>> = (0..thread_count.max(1))
        .map(|_| {
            let dispatcher = &dispatcher;
            let collected = &collected;
            Box::new(move |_worker: usize| {
                while let Some((start, end)) = dispatcher.get_work() {
                    let chunk = &targets[start..end];
                    let mut dir = DirRing::new(longest);
                    let mut hits = scheduler::search::<L>(query_codes, config, chunk, &mut dir);
                    collected.lock().expect("result mutex poisoned").append(&mut hits);
                }
            }) as Box<dyn FnOnce(usize) + Send + '_>
        })
        .collect();

    pool.run(tasks);
    collected.into_inner().expect("result mutex poisoned")
}

/// Aligns `query_codes` against every sequence in `db`, re-running at the
/// 16-bit cell width any sequence whose 8-bit score saturated.
pub fn search_database<D: Database>(
    query_codes: &[u8], db: &D, config: &AlignerConfig, pool: &dyn WorkerPool,
) -> Result<Vec<SearchHit>, AlignError> {
    if db.is_empty() {
        return Ok(Vec::new());
    }

    let sequences: Vec<&PackedSequence> = (0..db.len() as u64).map(|id| db.sequence(id)).collect::<Result<_, _>>()?;
    let targets: Vec<Target<'_>> = sequences
        .iter()
        .enumerate()
        .map(|(id, &seq)| Target { id, seq })
        .collect();
    // Per-thread scratch (qtable/hearray/dir_array) is sized once from a
    // single "longest sequence" bound that must cover both the query and
    // every target: the direction ring's
    // block stride is `4 * longest`, and a query longer than every target
    // would otherwise alias distinct query rows onto the same ring cells.
    let longest = db.longest().max(query_codes.len());

    let mut hits = if has_x86_backend() {
        run_width::<X86Lane8>(query_codes, config, &targets, longest, 8, pool)
    } else {
        run_width::<ScalarLane8>(query_codes, config, &targets, longest, 8, pool)
    };

    let saturated_ids: Vec<usize> = hits
        .iter()
        .filter(|h| h.saturated(u8::MAX as u32))
        .map(|h| h.id)
        .collect();

    if !saturated_ids.is_empty() {
        hits.retain(|h| !h.saturated(u8::MAX as u32));

        let rerun_targets: Vec<Target<'_>> = saturated_ids
            .iter()
            .map(|&id| Target { id, seq: sequences[id] })
            .collect();

        let rerun_hits = if has_x86_backend() {
            run_width::<X86Lane16>(query_codes, config, &rerun_targets, longest, 16, pool)
        } else {
            run_width::<ScalarLane16>(query_codes, config, &rerun_targets, longest, 16, pool)
        };

        hits.extend(rerun_hits);
    }

    hits.sort_by_key(|h| h.id);
    Ok(hits)
}
