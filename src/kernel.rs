//! One-cell SIMD kernel (C4, `onestep`) and strip aligner (C5,
//! `align_cells_regular` / `align_cells_masked`).
//!
//! The strip aligner sweeps the query axis once per block of four database
//! columns, carrying a 5-stage pipeline (`h0..h3` plus the freshly loaded
//! `h4`) that diagonalises the four `onestep` calls across depths — the
//! depth-4 pipelining is why four calls share one `E`/`dir` row but each
//! has its own `F`/`H` carry.

use crate::dirring::{DirRing, DirWord};
use crate::profile::Profile;
use crate::simd::Lane;

/// One DP cell update across all lanes.
///
/// `h`, `n`, `f`, `e` are updated in place; `v` (substitution cost), `qr`
/// (gap-open + gap-extend) and `r` (gap-extend) are read-only. Returns the
/// four per-lane direction masks (`up`, `left`, `ext_up`, `ext_left`) in
/// that order.
#[inline]
pub fn onestep<L: Lane>(h: &mut L, n: &mut L, f: &mut L, v: L, e: &mut L, qr: L, r: L) -> [u32; 4] {
    let mut hh = h.sat_add(v);
    let w = hh;
    hh = hh.min(*f);
    let dir_up = w.eq_mask(hh);

    hh = hh.min(*e);
    let dir_left = hh.eq_mask(*e);

    *n = hh;
    hh = hh.sat_add(qr);

    let new_f = f.sat_add(r);
    let new_e = e.sat_add(r);

    let new_f = hh.min(new_f);
    let dir_extup = hh.eq_mask(new_f);

    let new_e = hh.min(new_e);
    let dir_extleft = hh.eq_mask(new_e);

    *h = hh;
    *f = new_f;
    *e = new_e;

    [dir_up, dir_left, dir_extup, dir_extleft]
}

/// `hearray`: interleaved `(H, E)` state, one entry per query position.
pub type HeArray<L> = Vec<(L, L)>;

fn pipeline_seed<L: Lane>(f0_seed: L, h0_seed: L, q: L, r: L) -> ([L; 4], [L; 4]) {
    let f0 = f0_seed;
    let f1 = f0.sat_add(r);
    let f2 = f1.sat_add(r);
    let f3 = f2.sat_add(r);

    let h0 = h0_seed;
    let h1 = f0.sat_sub(q);
    let h2 = h1.sat_add(r);
    let h3 = h2.sat_add(r);

    ([f0, f1, f2, f3], [h0, h1, h2, h3])
}

/// Sweeps one block of four database columns with H/E carried unchanged
/// ("regular" — no channel is restarting mid-block). Returns the
/// final-column scores `S[0..3]`.
#[allow(clippy::too_many_arguments)]
pub fn align_cells_regular<L: Lane>(
    query_codes: &[u8], profile: &Profile<L>, hep: &mut HeArray<L>, q: L, r: L, f0_seed: L, h0_seed: L,
    dir: &mut DirRing,
) -> [L; 4] {
    let ([mut f0, mut f1, mut f2, mut f3], [mut h0, mut h1, mut h2, mut h3]) = pipeline_seed(f0_seed, h0_seed, q, r);
    let mut h5 = L::zero();
    let mut h6 = L::zero();
    let mut h7 = L::zero();
    let mut h8 = L::zero();

    for (i, code) in query_codes.iter().copied().enumerate() {
        let (h4, mut e) = hep[i];

        let m0 = onestep(&mut h0, &mut h5, &mut f0, profile.get(code, 0), &mut e, q, r);
        dir.write(i, 0, DirWord::pack::<L>(m0));
        let m1 = onestep(&mut h1, &mut h6, &mut f1, profile.get(code, 1), &mut e, q, r);
        dir.write(i, 1, DirWord::pack::<L>(m1));
        let m2 = onestep(&mut h2, &mut h7, &mut f2, profile.get(code, 2), &mut e, q, r);
        dir.write(i, 2, DirWord::pack::<L>(m2));
        let m3 = onestep(&mut h3, &mut h8, &mut f3, profile.get(code, 3), &mut e, q, r);
        dir.write(i, 3, DirWord::pack::<L>(m3));

        hep[i] = (h8, e);

        h0 = h4;
        h1 = h5;
        h2 = h6;
        h3 = h7;
    }

    [h5, h6, h7, h8]
}

/// Sweeps one block with H/E reinitialised for lanes whose sequence has
/// just started ("masked"). `m` is the restart bitmask lane;
/// `mq` carries the running gap-open penalty for restarted lanes forward
/// (incremented by `mr` every query position); `mq0` seeds `E`'s extra
/// initial term.
#[allow(clippy::too_many_arguments)]
pub fn align_cells_masked<L: Lane>(
    query_codes: &[u8], profile: &Profile<L>, hep: &mut HeArray<L>, q: L, r: L, f0_seed: L, h0_seed: L,
    dir: &mut DirRing, m: L, mq: &mut L, mr: L, mq0: L,
) -> [L; 4] {
    let ([mut f0, mut f1, mut f2, mut f3], [mut h0, mut h1, mut h2, mut h3]) = pipeline_seed(f0_seed, h0_seed, q, r);
    let mut h5 = L::zero();
    let mut h6 = L::zero();
    let mut h7 = L::zero();
    let mut h8 = L::zero();

    for (i, code) in query_codes.iter().copied().enumerate() {
        let (mut h4, mut e) = hep[i];

        h4 = h4.sat_sub(m);
        e = e.sat_sub(m);
        h4 = h4.sat_add(*mq);
        e = e.sat_add(*mq);
        e = e.sat_add(mq0);
        *mq = mq.sat_add(mr);

        let m0 = onestep(&mut h0, &mut h5, &mut f0, profile.get(code, 0), &mut e, q, r);
        dir.write(i, 0, DirWord::pack::<L>(m0));
        let m1 = onestep(&mut h1, &mut h6, &mut f1, profile.get(code, 1), &mut e, q, r);
        dir.write(i, 1, DirWord::pack::<L>(m1));
        let m2 = onestep(&mut h2, &mut h7, &mut f2, profile.get(code, 2), &mut e, q, r);
        dir.write(i, 2, DirWord::pack::<L>(m2));
        let m3 = onestep(&mut h3, &mut h8, &mut f3, profile.get(code, 3), &mut e, q, r);
        dir.write(i, 3, DirWord::pack::<L>(m3));

        hep[i] = (h8, e);

        h0 = h4;
        h1 = h5;
        h2 = h6;
        h3 = h7;
    }

    [h5, h6, h7, h8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ScoreMatrix;
    use crate::profile::fill;
    use crate::simd::ScalarLane8;

    /// A hand-checkable single-channel case: 1 live channel (the rest are
    /// padding), query `ACGT`, database `ACGT`, should score 0 everywhere.
    #[test]
    fn identical_short_sequences_score_zero_in_every_column() {
        let matrix = ScoreMatrix::<u8>::build(1);
        let query_codes = [0u8, 1, 2, 3];
        let mut dseq: [Vec<u8>; 4] = std::array::from_fn(|_| vec![0u8; 16]);
        // channel 0 carries the database sequence A,C,G,T (1-based codes).
        for (j, &base) in [1u8, 2, 3, 4].iter().enumerate() {
            dseq[j][0] = base;
        }
        let profile = fill::<ScalarLane8>(&matrix, &dseq);

        let q = ScalarLane8::splat(13); // gap_open + gap_extend
        let r = ScalarLane8::splat(4);
        let mut hep: HeArray<ScalarLane8> = vec![(ScalarLane8::zero(), ScalarLane8::zero()); 4];
        let mut dir = DirRing::new(4);

        let s = align_cells_regular(
            &query_codes,
            &profile,
            &mut hep,
            q,
            r,
            ScalarLane8::zero(),
            ScalarLane8::zero(),
            &mut dir,
        );

        assert_eq!(s[3].0[0], 0);
    }
}
