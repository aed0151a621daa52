//! Backtracker (C7): walks the direction ring from the bottom-right corner
//! of one channel's alignment window back to the top-left, producing the
//! edit script and counting mismatches along the way.
//!
//! A three-branch state machine (continue a vertical gap, continue a
//! horizontal gap, or consult this cell's direction bits) handles the
//! interior of the matrix, plus two "ran off the edge" cleanup loops once
//! either axis is exhausted.

use crate::dirring::DirRing;
use crate::simd::Lane;

/// One step of the alignment, read in reverse (bottom-right to top-left) by
/// [`backtrack`] and typically reversed again by the caller before display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlignOp {
    /// A diagonal step; `query[i] == db[j]` is recorded separately as a
    /// match/mismatch by the caller from the codes, since the direction
    /// ring doesn't carry the symbols themselves.
    Diagonal,
    /// A step that consumes one database symbol without a query symbol
    /// (insertion relative to the query).
    Insertion,
    /// A step that consumes one query symbol without a database symbol
    /// (deletion relative to the query).
    Deletion,
}

/// The result of backtracking one alignment: the edit script in reverse
/// order (last cell first) and the number of mismatched diagonal steps.
#[derive(Clone, Debug)]
pub struct Traceback {
    pub ops: Vec<AlignOp>,
    pub mismatches: usize,
}

impl Traceback {
    /// Total columns the edit script spans — the length backtracking
    /// actually produced, including the "ran off the edge" tail.
    pub fn alignment_length(&self) -> usize {
        self.ops.len()
    }

    /// Edit distance: aligned length minus matches, equivalent to
    /// `alignment_length() - (diagonal steps that weren't mismatches)`.
    pub fn diff(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, AlignOp::Diagonal) )
            .count()
            + self.mismatches
    }
}

/// Walks `dir`'s window for one channel's alignment, starting at the
/// bottom-right corner `(qlen - 1, dlen - 1)`.
///
/// `offset` is the ring-word offset captured when this channel picked up
/// its target ([`crate::scheduler::SearchHit::offset`]); `query_codes` and
/// `db_codes` are the full, already-extracted 2-bit code sequences (used
/// only to classify diagonal steps as matches or mismatches, never to
/// decide the path itself — that comes entirely from the direction bits).
pub fn backtrack<L: Lane>(dir: &DirRing, offset: usize, channel: usize, query_codes: &[u8], db_codes: &[u8]) -> Traceback {
    let qlen = query_codes.len() as i64;
    let dlen = db_codes.len() as i64;

    let mut i = qlen - 1;
    let mut j = dlen - 1;
    let mut ops = Vec::new();
    let mut mismatches = 0usize;

    #[derive(Copy, Clone, PartialEq, Eq)]
    enum Prev {
        None,
        Insertion,
        Deletion,
    }
    let mut prev = Prev::None;

    while i >= 0 && j >= 0 {
        let word = dir.read_at(offset, i as usize, j as usize);

        if prev == Prev::Insertion && !word.bit::<L>(3, channel) {
            // continuing a horizontal (insertion) gap: extension bit clear
            // means this column opened the gap, but the gap itself still
            // consumes one database column per step either way.
            j -= 1;
            ops.push(AlignOp::Insertion);
        } else if prev == Prev::Deletion && !word.bit::<L>(2, channel) {
            i -= 1;
            ops.push(AlignOp::Deletion);
        } else if word.bit::<L>(1, channel) {
            j -= 1;
            ops.push(AlignOp::Insertion);
            prev = Prev::Insertion;
            continue;
        } else if !word.bit::<L>(0, channel) {
            i -= 1;
            ops.push(AlignOp::Deletion);
            prev = Prev::Deletion;
            continue;
        } else {
            if query_codes[i as usize] != db_codes[j as usize] {
                mismatches += 1;
            }
            i -= 1;
            j -= 1;
            ops.push(AlignOp::Diagonal);
            prev = Prev::None;
            continue;
        }
    }

    while i >= 0 {
        ops.push(AlignOp::Deletion);
        i -= 1;
    }
    while j >= 0 {
        ops.push(AlignOp::Insertion);
        j -= 1;
    }

    Traceback { ops, mismatches }
}
