//! Property tests for year repair, scoring symmetry, filtering and partitions.

use artnet_core::filters::threshold_sweep;
use artnet_core::partition::{rand_index, randomized_configuration};
use artnet_core::similarity::{
    fix_years, ArtistRecord, AttributeBundle, RepairOptions, SimilarityScorer, YearRecord,
};
use artnet_core::{Partition, SimilarityGraph, WeightedGraph};
use proptest::prelude::*;

const PLACES: [&str; 5] = ["Oslo", "Paris", "Berlin", "Rome", "Vienna"];

fn maybe_year() -> impl Strategy<Value = Option<f64>> {
    prop::option::of((1500u32..2000).prop_map(f64::from))
}

fn year_record() -> impl Strategy<Value = YearRecord> {
    (maybe_year(), maybe_year(), maybe_year(), maybe_year())
        .prop_map(|(b, f, l, d)| YearRecord::new(b, f, l, d))
}

fn bundle() -> impl Strategy<Value = AttributeBundle> {
    (
        prop::option::of(prop::collection::vec(0usize..PLACES.len(), 0..4)),
        prop::option::of(0usize..PLACES.len()),
        prop::option::of(prop::collection::vec(0usize..3, 1..3)),
        prop::option::of(0usize..3),
    )
        .prop_map(|(places, birthplace, nationality, citizenship)| AttributeBundle {
            places: places.map(|ps| ps.into_iter().map(|i| PLACES[i].to_string()).collect()),
            birthplace: birthplace.map(|i| PLACES[i].to_string()),
            nationality: nationality.map(|ns| ns.into_iter().map(|i| format!("n{}", i)).collect()),
            citizenship: citizenship.map(|i| format!("n{}", i)),
        })
}

fn artist() -> impl Strategy<Value = ArtistRecord> {
    (year_record(), bundle()).prop_map(|(years, attrs)| ArtistRecord::new("x", years, attrs))
}

/// Random simple graph on `n` nodes from an edge-presence mask and weights.
fn weighted_graph() -> impl Strategy<Value = SimilarityGraph> {
    (2usize..12)
        .prop_flat_map(|n| {
            let pairs = n * (n - 1) / 2;
            (
                Just(n),
                prop::collection::vec(prop::option::of(0.0f64..10.0), pairs),
            )
        })
        .prop_map(|(n, weights)| {
            let mut g = SimilarityGraph::new();
            let ids: Vec<_> = (0..n).map(|i| g.add_node(format!("v{}", i))).collect();
            let mut slot = weights.into_iter();
            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some(Some(w)) = slot.next() {
                        g.add_edge(ids[i], ids[j], w).unwrap();
                    }
                }
            }
            g
        })
}

/// Random partition of `0..n` into contiguous groups.
fn partition() -> impl Strategy<Value = Partition<u32>> {
    prop::collection::vec(1usize..6, 1..8).prop_map(|sizes| {
        let mut next = 0u32;
        let groups = sizes
            .into_iter()
            .map(|s| {
                let group: Vec<u32> = (next..next + s as u32).collect();
                next += s as u32;
                group
            })
            .collect();
        Partition::new(groups).unwrap()
    })
}

proptest! {
    #[test]
    fn repaired_years_are_sorted(record in year_record()) {
        if let Some(years) = fix_years(record, &RepairOptions::default()).repaired() {
            let b = years.bounds();
            prop_assert!(b[0] <= b[1] && b[1] <= b[2] && b[2] <= b[3], "{:?}", b);
        }
    }

    #[test]
    fn sorted_valid_record_is_unchanged(years in prop::array::uniform4(1800u32..1930)) {
        let mut years = years;
        years.sort_unstable();
        let [b, f, l, d] = years.map(f64::from);
        let out = fix_years(YearRecord::new(Some(b), Some(f), Some(l), Some(d)), &RepairOptions::default());
        prop_assert_eq!(out.repaired().map(|y| y.bounds()), Some([b, f, l, d]));
    }

    #[test]
    fn repair_is_idempotent(record in year_record()) {
        let lenient = RepairOptions::default().with_check_years(false);
        if let Some(years) = fix_years(record, &lenient).repaired() {
            let [b, f, l, d] = years.bounds();
            let again = fix_years(YearRecord::new(Some(b), Some(f), Some(l), Some(d)), &lenient);
            prop_assert_eq!(again.repaired(), Some(years));
        }
    }

    #[test]
    fn similarity_is_symmetric(a in artist(), b in artist()) {
        let scorer = SimilarityScorer::default();
        prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn similarity_is_never_negative(a in artist(), b in artist()) {
        let scorer = SimilarityScorer::default();
        if let Some(score) = scorer.score(&a, &b) {
            prop_assert!(score >= 0.0);
        }
    }

    #[test]
    fn threshold_sweep_is_monotone(g in weighted_graph(), cuts in prop::collection::vec(0.0f64..10.0, 1..6)) {
        let mut cuts = cuts;
        cuts.sort_by(f64::total_cmp);
        let sweep = threshold_sweep(&g, &cuts);
        for pair in sweep.windows(2) {
            prop_assert!(pair[1].edges <= pair[0].edges);
            prop_assert!(pair[1].largest_component <= pair[0].largest_component);
        }
        prop_assert!(sweep[0].edges <= g.edge_count());
    }

    #[test]
    fn shuffle_keeps_sizes_and_nodes(p in partition(), seed in any::<u64>()) {
        let shuffled = randomized_configuration(&p, seed);
        prop_assert_eq!(shuffled.sizes(), p.sizes());
        prop_assert_eq!(shuffled.sorted_nodes(), p.sorted_nodes());
    }

    #[test]
    fn partition_agrees_with_itself(p in partition(), seed in any::<u64>()) {
        let shuffled = randomized_configuration(&p, seed);
        if p.node_count() > 1 {
            prop_assert_eq!(rand_index(&shuffled, &shuffled).unwrap(), Some(1.0));
            let r = rand_index(&p, &shuffled).unwrap().unwrap();
            prop_assert!((0.0..=1.0).contains(&r));
        }
    }
}
