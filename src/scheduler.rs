//! Channel scheduler (C6): keeps every SIMD lane ("channel") busy with an
//! independent database sequence, refilling a channel from the next
//! pending target as soon as its current one finishes.
//!
//! Each iteration fills one 4-column block of `dseq`, walking a
//! per-channel restart mask through the channels with
//! [`Lane::shift_lane_left`] (lane masking via `T = T0 << c`). This
//! scheduler always calls [`align_cells_masked`] rather than keeping a
//! separate fast path for the common case where no channel needs a
//! restart: with an all-zero restart mask it reduces to exactly the same
//! arithmetic as `align_cells_regular` (`sat_sub`/`sat_add` of zero is the
//! identity), so a branch-free hot loop costs nothing beyond what a
//! two-path split would buy. `align_cells_regular` is still kept and
//! unit-tested in `kernel.rs` as a building block a future fast path could
//! use.

use crate::backtrack;
use crate::codec;
use crate::config::AlignerConfig;
use crate::database::PackedSequence;
use crate::dirring::DirRing;
use crate::kernel::{align_cells_masked, HeArray};
use crate::matrix::ScoreMatrix;
use crate::profile::fill;
use crate::simd::Lane;

/// One pending alignment: a caller-supplied `id` plus the packed database
/// sequence to align the query against.
#[derive(Copy, Clone)]
pub struct Target<'a> {
    pub id: usize,
    pub seq: &'a PackedSequence,
}

/// The outcome of aligning the query against one target: `score` from the
/// DP sweep, `diff`/`alignment_length` from the traceback this scheduler
/// runs immediately on retiring a channel. `offset` and `length` are
/// per-channel bookkeeping (where in the ring this channel's window
/// started, and the target's length); they are not needed to interpret
/// `score`/`diff`/`alignment_length`; a caller could use them to re-run
/// [`crate::backtrack::backtrack`] directly, but the ring itself is only
/// valid for the lifetime of one [`search`] call.
#[derive(Copy, Clone, Debug)]
pub struct SearchHit {
    pub id: usize,
    pub score: u32,
    /// Mismatch/indel count from [`crate::backtrack::backtrack`], or the
    /// cell width's saturation ceiling when `score` itself saturated: a
    /// saturated score never produces a "real" diff, since the traceback
    /// array may not reflect a true optimum; the orchestrator re-runs the
    /// target at the next cell width up instead.
    pub diff: u32,
    /// Alignment length from the same traceback, or `0` when `score`
    /// saturated (no traceback was attempted).
    pub alignment_length: u32,
    pub offset: usize,
    pub length: usize,
}

impl SearchHit {
    /// Whether `score` hit this cell width's saturation ceiling — the
    /// orchestrator re-runs these targets at the next cell width up.
    #[inline]
    pub fn saturated(&self, ceiling: u32) -> bool {
        self.score >= ceiling
    }
}

#[derive(Clone, Copy, Default)]
struct ChannelState {
    pos: usize,
    length: usize,
    target: Option<usize>,
    offset: usize,
}

impl ChannelState {
    fn has_more(&self) -> bool {
        self.pos < self.length
    }
}

fn next_code(seq: &PackedSequence, pos: &mut usize) -> u8 {
    if *pos < seq.length {
        let code = codec::extract(&seq.packed, *pos);
        *pos += 1;
        1 + code
    } else {
        0
    }
}

fn mask_and<L: Lane>(mask: L, value: L) -> L {
    // `mask` is always all-zero or all-`MAX` per channel, so `min` behaves
    // exactly like a bitwise AND against `value` for this use.
    mask.min(value)
}

/// Overwrites the channels flagged in `restart` with `constant`, leaving
/// every other channel's `value` untouched — a per-channel masked store
/// into `F0`/`H0` when a channel picks up a fresh target, built from
/// `sat_sub`/`sat_add`/`min` since `Lane` has no per-element store.
fn reseed_masked<L: Lane>(value: L, restart: L, constant: L) -> L {
    let cleared = value.sat_sub(mask_and(restart, value));
    cleared.sat_add(mask_and(restart, constant))
}

/// Aligns `query_codes` against every target in `targets`, for one cell
/// width `L`. `dir` must already be sized (via [`DirRing::new`]) with a
/// bound that covers *both* `query_codes.len()` and the longest sequence
/// among `targets` — the ring's block stride scales with whichever is
/// larger, and undersizing it silently aliases unrelated cells.
pub fn search<L: Lane>(
    query_codes: &[u8], config: &AlignerConfig, targets: &[Target<'_>], dir: &mut DirRing,
) -> Vec<SearchHit>
where
    L::Scalar: From<u8>,
{
    let qlen = query_codes.len();
    let channels = L::CHANNELS;

    let matrix = ScoreMatrix::<L::Scalar>::build_generic(L::scalar_from_u32(config.mismatch_penalty as u32));
    let q = L::splat(L::scalar_from_u32(config.gap_open_extend() as u32));
    let r = L::splat(L::scalar_from_u32(config.gap_extend as u32));

    let mut hep: HeArray<L> = vec![(L::zero(), L::zero()); qlen];
    let mut channel_states = vec![ChannelState::default(); channels];
    let mut pending: Vec<Option<(usize, u32)>> = vec![None; channels]; // (target_idx, score)

    let mut next_target = 0usize;
    let mut finalized = 0usize;
    let mut f0 = L::zero();
    let mut h0 = L::zero();
    let mut hits = Vec::with_capacity(targets.len());

    loop {
        let mut dseq: [Vec<u8>; 4] = std::array::from_fn(|_| vec![0u8; channels]);
        let mut restart = L::zero();
        let mut selector = L::lane0_selector();

        for c in 0..channels {
            if channel_states[c].has_more() {
                for depth in dseq.iter_mut() {
                    depth[c] = next_code(
                        targets[channel_states[c].target.expect("active channel always has a target")].seq,
                        &mut channel_states[c].pos,
                    );
                }
            } else {
                restart = restart.sat_add(selector);

                if let Some((target_idx, score)) = pending[c].take() {
                    // `channel_states[c]` still holds the retiring channel's
                    // offset/length at this point: the next-target branch
                    // below overwrites it, so the traceback must read it
                    // first, before this channel picks up a new sequence.
                    let retiring = channel_states[c];
                    let ceiling = L::MAX;
                    let (diff, alignment_length) = if score < ceiling {
                        let seq = targets[target_idx].seq;
                        let db_codes = codec::unpack(&seq.packed, seq.length);
                        let tb = backtrack::backtrack::<L>(&*dir, retiring.offset, c, query_codes, &db_codes);
                        (tb.diff() as u32, tb.alignment_length() as u32)
                    } else {
                        (ceiling, 0)
                    };
                    hits.push(SearchHit {
                        id: targets[target_idx].id,
                        score,
                        diff,
                        alignment_length,
                        offset: retiring.offset,
                        length: retiring.length,
                    });
                    finalized += 1;
                }

                if next_target < targets.len() {
                    let target = targets[next_target];
                    channel_states[c] = ChannelState {
                        pos: 0,
                        length: target.seq.length,
                        target: Some(next_target),
                        offset: dir.head(),
                    };
                    next_target += 1;
                    for depth in dseq.iter_mut() {
                        depth[c] = next_code(target.seq, &mut channel_states[c].pos);
                    }
                } else {
                    channel_states[c] = ChannelState::default();
                }
            }
            selector = selector.shift_lane_left();
        }

        if finalized >= targets.len() {
            break;
        }

        // A channel that just picked up a fresh target starts its row -1
        // boundary from scratch rather than inheriting whatever the
        // previous occupant's pipeline carried.
        let fresh_f0 = L::splat(L::scalar_from_u32(2 * config.gap_open_extend() as u32));
        f0 = reseed_masked(f0, restart, fresh_f0);
        h0 = reseed_masked(h0, restart, L::zero());

        let profile = fill::<L>(&matrix, &dseq);
        let mut mq = mask_and(restart, q);
        let mr = mask_and(restart, r);
        let mq0 = mq;
        let s = align_cells_masked(query_codes, &profile, &mut hep, q, r, f0, h0, dir, restart, &mut mq, mr, mq0);

        f0 = f0.sat_add(r).sat_add(r).sat_add(r);
        h0 = f0.sat_sub(q);
        f0 = f0.sat_add(r);
        dir.advance_block();

        for (c, state) in channel_states.iter().enumerate() {
            let Some(target_idx) = state.target else { continue };
            if state.has_more() {
                continue;
            }
            let depth = (state.length + 3) % 4;
            let score: u32 = s[depth].to_array()[c].into();
            pending[c] = Some((target_idx, score));
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::PackedSequence;
    use crate::simd::ScalarLane8;

    fn cfg() -> AlignerConfig {
        AlignerConfig {
            mismatch_penalty: 1,
            gap_open: 12,
            gap_extend: 4,
            threads: 1,
        }
    }

    #[test]
    fn identical_short_sequences_score_zero() {
        let query = codec::pack_ascii("ACGT");
        let query_codes = codec::unpack(&query, 4);
        let db = PackedSequence::from_ascii("ACGT");
        let targets = [Target { id: 0, seq: &db }];
        let mut dir = DirRing::new(4);

        let hits = search::<ScalarLane8>(&query_codes, &cfg(), &targets, &mut dir);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0);
        assert_eq!(hits[0].diff, 0);
        assert_eq!(hits[0].alignment_length, 4);
    }

    #[test]
    fn more_targets_than_channels_all_get_scored() {
        let query = codec::pack_ascii("ACGT");
        let query_codes = codec::unpack(&query, 4);
        let sequences: Vec<PackedSequence> = (0..40).map(|_| PackedSequence::from_ascii("ACGT")).collect();
        let targets: Vec<Target<'_>> = sequences
            .iter()
            .enumerate()
            .map(|(id, seq)| Target { id, seq })
            .collect();
        let mut dir = DirRing::new(4);

        let hits = search::<ScalarLane8>(&query_codes, &cfg(), &targets, &mut dir);
        assert_eq!(hits.len(), 40);
        assert!(hits.iter().all(|h| h.score == 0));
    }

    #[test]
    fn a_single_mismatch_costs_exactly_the_mismatch_penalty() {
        let query = codec::pack_ascii("ACGT");
        let query_codes = codec::unpack(&query, 4);
        let db = PackedSequence::from_ascii("ACCT");
        let targets = [Target { id: 7, seq: &db }];
        let mut dir = DirRing::new(4);

        let hits = search::<ScalarLane8>(&query_codes, &cfg(), &targets, &mut dir);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 7);
        assert_eq!(hits[0].score, 1);
        assert_eq!(hits[0].diff, 1);
        assert_eq!(hits[0].alignment_length, 4);
    }
}
