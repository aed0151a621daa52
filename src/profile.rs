//! Query profile builder (C3): `dprofile_fill`.
//!
//! Given one block of four database columns (`dseq[j][c]`, `j` the depth
//! within the block, `c` the channel), materialises a profile addressable by
//! query-nucleotide index so the strip aligner (`kernel.rs`) can look up
//! "cost of substituting query symbol `q` at depth `j`" without touching the
//! score matrix again.
//!
//! Two independent implementations are provided — a generic per-lane fill
//! and a shuffle-based one for backends that support it — and a unit test
//! below pins them to byte-identical output.

use crate::matrix::ScoreMatrix;
use crate::simd::Lane;

/// The profile for one block: `table[q][j]` is the per-channel cost vector
/// for query symbol `q` at block depth `j`.
#[derive(Copy, Clone)]
pub struct Profile<L: Lane> {
    table: [[L; 4]; 4],
}

impl<L: Lane> Profile<L> {
    #[inline]
    pub fn get(&self, q: u8, depth: usize) -> L {
        self.table[q as usize][depth]
    }
}

/// Merge-based path: for each query symbol and each block depth, gathers
/// the per-channel cost by scalar index and assembles the lane with
/// [`Lane::from_slice`]. Needs no shuffle capability, so this is the only
/// path available to the scalar backend.
pub fn fill_generic<L: Lane>(matrix: &ScoreMatrix<L::Scalar>, dseq: &[Vec<u8>; 4]) -> Profile<L>
where
    L::Scalar: From<u8>,
{
    let mut table = [[L::zero(); 4]; 4];
    for q in 0..4u8 {
        let row = matrix.row(q);
        for (j, column) in dseq.iter().enumerate() {
            debug_assert_eq!(column.len(), L::CHANNELS);
            let costs: Vec<L::Scalar> = column.iter().map(|&d| row[d as usize]).collect();
            table[q as usize][j] = L::from_slice(&costs);
        }
    }
    Profile { table }
}

/// Shuffle path: loads the matrix row for `q` once as a lane vector, then
/// issues one dynamic byte shuffle per block depth, using the `dseq` column
/// as the index vector. Only meaningful when `L::HAS_SHUFFLE`.
pub fn fill_shuffle<L: Lane>(matrix: &ScoreMatrix<L::Scalar>, dseq: &[Vec<u8>; 4]) -> Profile<L>
where
    L::Scalar: From<u8>,
{
    debug_assert!(L::HAS_SHUFFLE);
    let mut table = [[L::zero(); 4]; 4];
    for q in 0..4u8 {
        let row = matrix.row(q);
        let mut padded: Vec<L::Scalar> = row.iter().copied().collect();
        padded.resize(L::CHANNELS, L::Scalar::from(0));
        let row_vec = L::from_slice(&padded);

        for (j, column) in dseq.iter().enumerate() {
            debug_assert_eq!(column.len(), L::CHANNELS);
            let idx: Vec<L::Scalar> = column.iter().map(|&d| L::Scalar::from(d)).collect();
            let idx_vec = L::from_slice(&idx);
            table[q as usize][j] = row_vec.swizzle(idx_vec);
        }
    }
    Profile { table }
}

/// Picks [`fill_shuffle`] when the active backend supports it, else falls
/// back to [`fill_generic`]. This is the entry point `scheduler.rs` calls.
pub fn fill<L: Lane>(matrix: &ScoreMatrix<L::Scalar>, dseq: &[Vec<u8>; 4]) -> Profile<L>
where
    L::Scalar: From<u8>,
{
    if L::HAS_SHUFFLE {
        fill_shuffle(matrix, dseq)
    } else {
        fill_generic(matrix, dseq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{ScalarLane8, X86Lane8};

    fn sample_dseq(channels: usize) -> [Vec<u8>; 4] {
        // Exercise every dseq byte value (0 = padding, 1..=4 = real symbol)
        // across the channels, including channels that are mid-retirement.
        std::array::from_fn(|j| {
            (0..channels)
                .map(|c| ((c + j) % 5) as u8)
                .collect::<Vec<u8>>()
        })
    }

    #[test]
    fn generic_and_shuffle_paths_agree_for_every_query_symbol() {
        let matrix = ScoreMatrix::<u8>::build(9);
        let dseq = sample_dseq(16);

        let generic = fill_generic::<X86Lane8>(&matrix, &dseq);
        let shuffled = fill_shuffle::<X86Lane8>(&matrix, &dseq);

        for q in 0..4u8 {
            for j in 0..4 {
                assert_eq!(generic.get(q, j).0.to_array(), shuffled.get(q, j).0.to_array());
            }
        }
    }

    #[test]
    fn scalar_backend_matches_vector_backend() {
        let matrix = ScoreMatrix::<u8>::build(3);
        let dseq = sample_dseq(16);

        let scalar = fill_generic::<ScalarLane8>(&matrix, &dseq);
        let vector = fill_generic::<X86Lane8>(&matrix, &dseq);

        for q in 0..4u8 {
            for j in 0..4 {
                assert_eq!(scalar.get(q, j).0.to_vec(), vector.get(q, j).0.to_array());
            }
        }
    }

    #[test]
    fn padding_byte_contributes_zero_cost_in_every_channel() {
        let matrix = ScoreMatrix::<u8>::build(11);
        let dseq: [Vec<u8>; 4] = std::array::from_fn(|_| vec![0u8; 16]);
        let profile = fill::<X86Lane8>(&matrix, &dseq);
        for q in 0..4u8 {
            for j in 0..4 {
                assert!(profile.get(q, j).0.to_array().iter().all(|&c| c == 0));
            }
        }
    }
}
