//! Black-box alignment scenarios, exercised through the public
//! [`nuclalign::search_database`] entry point end to end (orchestrator,
//! dispatcher, scheduler, profile, kernel, direction ring, backtracker —
//! every layer in one pass). Penalties fixed at mismatch=1, gap_open=12,
//! gap_extend=4.

use nuclalign::{codec, AlignerConfig, InMemoryDatabase, InlinePool};

fn cfg() -> AlignerConfig {
    AlignerConfig {
        mismatch_penalty: 1,
        gap_open: 12,
        gap_extend: 4,
        threads: 1,
    }
}

fn run(query: &str, target: &str) -> (u32, u32, u32) {
    let db = InMemoryDatabase::from_ascii_sequences([target]);
    let packed_query = codec::pack_ascii(query);
    let query_codes = codec::unpack(&packed_query, query.len());
    let pool = InlinePool;

    let hits = nuclalign::search_database(&query_codes, &db, &cfg(), &pool).unwrap();
    assert_eq!(hits.len(), 1);
    (hits[0].score, hits[0].diff, hits[0].alignment_length)
}

#[test]
fn identical_sequences_score_zero() {
    assert_eq!(run("ACGT", "ACGT"), (0, 0, 4));
}

#[test]
fn single_internal_mismatch() {
    assert_eq!(run("ACGT", "ACCT"), (1, 1, 4));
}

#[test]
fn target_shorter_than_query_by_one_costs_one_gap() {
    assert_eq!(run("ACGT", "ACG"), (16, 1, 4));
}

#[test]
fn target_longer_than_query_by_one_costs_one_gap() {
    assert_eq!(run("ACGT", "ACGTA"), (16, 1, 5));
}

#[test]
fn every_position_mismatched() {
    assert_eq!(run("AAAA", "TTTT"), (4, 4, 4));
}

#[test]
fn single_base_target_against_a_long_homopolymer_query() {
    assert_eq!(run("AAAAAAAA", "A"), (36, 7, 8));
}

#[test]
fn these_scenarios_hold_identically_when_forced_to_sixteen_bit() {
    // The orchestrator only escalates to 16-bit on 8-bit saturation, which
    // none of these small scores trigger; run the same cases directly at
    // 16-bit width to confirm parity between the two cell widths.
    use nuclalign::scheduler::{search, Target};
    use nuclalign::simd::{ScalarLane16, ScalarLane8};
    use nuclalign::PackedSequence;
    use nuclalign::dirring::DirRing;

    let cases = [
        ("ACGT", "ACGT", 0u32, 0u32, 4u32),
        ("ACGT", "ACCT", 1, 1, 4),
        ("ACGT", "ACG", 16, 1, 4),
        ("ACGT", "ACGTA", 16, 1, 5),
        ("AAAA", "TTTT", 4, 4, 4),
        ("AAAAAAAA", "A", 36, 7, 8),
    ];

    for (query, target, score, diff, length) in cases {
        let packed_query = codec::pack_ascii(query);
        let query_codes = codec::unpack(&packed_query, query.len());
        let db = PackedSequence::from_ascii(target);
        let targets = [Target { id: 0, seq: &db }];
        let longest = query.len().max(target.len()).max(1);

        let mut dir8 = DirRing::new(longest);
        let hits8 = search::<ScalarLane8>(&query_codes, &cfg(), &targets, &mut dir8);
        assert_eq!(hits8[0].score, score);
        assert_eq!(hits8[0].diff, diff);
        assert_eq!(hits8[0].alignment_length, length);

        let mut dir16 = DirRing::new(longest);
        let hits16 = search::<ScalarLane16>(&query_codes, &cfg(), &targets, &mut dir16);
        assert_eq!(hits16[0].score, score);
        assert_eq!(hits16[0].diff, diff);
        assert_eq!(hits16[0].alignment_length, length);
    }
}
