//! Integration tests exercising the full pipeline:
//! sieve → classify → stability → export, through the public API.

use approx::assert_abs_diff_eq;
use pt_core::{
    Bundle, FixedTensionSource, Histogram, ORPHAN_TENSION, RngTensionSource, STABILITY_TARGET,
    classify, export_json, generate_data, generate_sieve, import_json, stability_curve,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn source(seed: u64) -> RngTensionSource<SmallRng> {
    RngTensionSource::new(SmallRng::seed_from_u64(seed))
}

/// Test 1: prime sequence is strictly increasing and matches the sieve in [11, limit).
#[test]
fn primes_match_sieve_range() {
    let limit = 30_000;
    let sieve = generate_sieve(limit).unwrap();
    let data = classify(&sieve, limit, &mut source(42)).unwrap();

    assert!(data.primes().windows(2).all(|w| w[0] < w[1]));
    let expected: Vec<u64> = (11..limit).filter(|&n| sieve.is_prime(n)).collect();
    assert_eq!(data.primes(), expected.as_slice());
}

/// Test 2: orphans form a subsequence of primes in order.
#[test]
fn orphans_are_subsequence_of_primes() {
    let data = generate_data(50_000, &mut source(42)).unwrap();
    let mut primes = data.primes().iter();
    for orphan in data.orphans() {
        assert!(
            primes.any(|p| p == orphan),
            "orphan {orphan} missing from prime sequence order"
        );
    }
}

/// Test 3: 1/3 entries line up one-to-one with orphans; the rest stay in [0, 0.3).
#[test]
fn tension_entries_match_orphans() {
    let data = generate_data(50_000, &mut source(7)).unwrap();
    let thirds = data
        .tensions()
        .iter()
        .filter(|&&t| t == ORPHAN_TENSION)
        .count();
    assert_eq!(thirds, data.orphans().len());
    assert!(
        data.tensions()
            .iter()
            .all(|&t| t == ORPHAN_TENSION || (0.0..0.3).contains(&t))
    );
    assert!(data.tensions().len() < data.primes().len());
}

/// Test 4: same seed, same products, bit for bit.
#[test]
fn seeded_runs_are_identical() {
    let a = generate_data(40_000, &mut source(99)).unwrap();
    let b = generate_data(40_000, &mut source(99)).unwrap();
    assert_eq!(a.primes(), b.primes());
    assert_eq!(a.orphans(), b.orphans());
    let bits = |d: &pt_core::Dataset| d.tensions().iter().map(|t| t.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

/// Test 5: orphans never depend on the random source.
#[test]
fn orphans_independent_of_randomness() {
    let seeded = generate_data(40_000, &mut source(1)).unwrap();
    let mut fixed = FixedTensionSource::new(vec![0.2, 0.7]).unwrap();
    let stubbed = generate_data(40_000, &mut fixed).unwrap();
    assert_eq!(seeded.orphans(), stubbed.orphans());
    assert_eq!(seeded.tensions().len(), stubbed.tensions().len());
}

/// Test 6: the ratio at the final checkpoint is count / model.
#[test]
fn final_checkpoint_ratio() {
    let data = generate_data(200_000, &mut source(42)).unwrap();
    let curve = stability_curve(data.orphans(), 200_000).unwrap();
    let last = curve.last().unwrap();
    assert_eq!(last.checkpoint, 200_000);

    let count = data.orphans().partition_point(|&o| o <= 200_000);
    let ln = 200_000f64.ln();
    let model = 200_000.0 / (ln * ln);
    assert_abs_diff_eq!(last.ratio, count as f64 / model, epsilon = 1e-9);
    assert_eq!(last.absolute_error, (last.ratio - STABILITY_TARGET).abs());
}

/// Test 7: the stability curve counts are non-decreasing.
#[test]
fn stability_counts_monotone() {
    let data = generate_data(200_000, &mut source(42)).unwrap();
    let curve = stability_curve(data.orphans(), 200_000).unwrap();
    assert_eq!(curve.len(), 500);
    assert!(curve.points().windows(2).all(|w| w[0].actual <= w[1].actual));
}

/// Test 8: tension histogram over a real run puts every orphan in the top bin.
#[test]
fn tension_histogram_top_bin_holds_orphans() {
    let data = generate_data(50_000, &mut source(5)).unwrap();
    let hist = Histogram::from_values(data.tensions(), 30).unwrap();
    assert_eq!(hist.total(), data.tensions().len());
    assert!(hist.counts()[29] >= data.orphans().len());
    assert_eq!(hist.bin_of(ORPHAN_TENSION), Some(29));
}

/// Test 9: export then import keeps the integer products.
#[test]
fn export_import_bundle() {
    let data = generate_data(20_000, &mut source(3)).unwrap();
    let bundle = Bundle::build(data, 20_000).unwrap();
    let json = export_json(&bundle).unwrap();
    let restored = import_json(&json).unwrap();
    assert_eq!(restored.dataset.primes(), bundle.dataset.primes());
    assert_eq!(restored.dataset.orphans(), bundle.dataset.orphans());
    assert_eq!(restored.stability.len(), bundle.stability.len());
}

/// Test 10: the empty scan range.
#[test]
fn limit_11_is_empty() {
    let data = generate_data(11, &mut source(42)).unwrap();
    assert!(data.primes().is_empty());
    assert!(data.orphans().is_empty());
    assert!(data.tensions().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn orphan_condition_holds(limit in 11u64..5_000) {
        let sieve = generate_sieve(limit).unwrap();
        let mut fixed = FixedTensionSource::new(vec![0.5]).unwrap();
        let data = classify(&sieve, limit, &mut fixed).unwrap();
        for &p in data.orphans() {
            prop_assert!(p + 2 > limit || !sieve.is_prime(p + 2));
            prop_assert_eq!((p - 2) % 3, 0);
            prop_assert!(sieve.is_prime((p - 2) / 3));
        }
    }
}
