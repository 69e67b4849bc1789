//! End-to-end tests for year repair and pairwise similarity scoring.

use artnet_core::similarity::years::InvalidStyle;
use artnet_core::similarity::{
    build_similarity_graph, fix_years, ArtistRecord, AttributeBundle, RepairOptions,
    RepairOutcome, SimilarityConfig, SimilarityScorer, YearRecord,
};
use artnet_core::WeightedGraph;
use artnet_tests::assert_close;

const NAN: f64 = f64::NAN;

fn repair(raw: [f64; 4]) -> RepairOutcome {
    fix_years(YearRecord::from_raw(raw), &RepairOptions::default())
}

fn artist(name: &str, raw: [f64; 4], attrs: AttributeBundle) -> ArtistRecord {
    ArtistRecord::new(name, YearRecord::from_raw(raw), attrs)
}

#[test]
fn unrepairable_timelines_are_rejected() {
    assert!(!repair([NAN, NAN, 1900.0, 1950.0]).is_valid());
    assert!(!repair([1800.0, 1820.0, NAN, NAN]).is_valid());
    assert!(!repair([1700.0, NAN, NAN, 1900.0]).is_valid());
}

#[test]
fn plausibility_check_can_be_disabled() {
    let lenient = RepairOptions::default().with_check_years(false);
    let out = fix_years(YearRecord::from_raw([1700.0, NAN, NAN, 1900.0]), &lenient);
    let years = out.repaired().expect("gap is fillable once plausibility is off");
    assert_eq!(years.bounds(), [1700.0, 1720.0, 1900.0, 1900.0]);

    // unfillable gaps stay invalid regardless
    let out = fix_years(YearRecord::from_raw([NAN, NAN, 1900.0, 1950.0]), &lenient);
    assert!(!out.is_valid());
}

#[test]
fn all_missing_style_reports_an_empty_record() {
    let options = RepairOptions::default().with_invalid_style(InvalidStyle::AllMissing);
    let out = fix_years(YearRecord::from_raw([NAN, NAN, 1900.0, 1950.0]), &options);
    assert_eq!(out, RepairOutcome::AllMissing(YearRecord::missing()));
}

#[test]
fn score_is_symmetric() {
    let scorer = SimilarityScorer::default();
    let records = [
        artist(
            "munch",
            [1863.0, 1880.0, 1944.0, 1944.0],
            AttributeBundle::default()
                .with_places(["Oslo", "Paris", "Berlin"])
                .with_birthplace("Loten")
                .with_nationality(["Norway"])
                .with_citizenship("Norway"),
        ),
        artist(
            "kandinsky",
            [1866.0, 1896.0, 1944.0, 1944.0],
            AttributeBundle::default()
                .with_places(["Moscow", "Munich", "Berlin", "Paris"])
                .with_birthplace("Moscow")
                .with_nationality(["Russia", "Germany", "France"]),
        ),
        artist(
            "af klint",
            [1862.0, NAN, NAN, 1944.0],
            AttributeBundle::default()
                .with_places(["Stockholm"])
                .with_nationality(["Sweden"])
                .with_citizenship("Sweden"),
        ),
        artist(
            "unknown",
            [NAN, 1890.0, 1920.0, NAN],
            AttributeBundle::default().with_places(["Paris"]),
        ),
    ];
    for a in &records {
        for b in &records {
            assert_eq!(scorer.score(a, b), scorer.score(b, a), "{} vs {}", a.name, b.name);
        }
    }
}

#[test]
fn missing_places_zero_one_side_of_the_temporal_term() {
    let scorer = SimilarityScorer::default();
    let raw = [1850.0, 1870.0, 1900.0, 1910.0];
    let a = artist("a", raw, AttributeBundle::default().with_birthplace("Oslo"));
    let b = artist(
        "b",
        raw,
        AttributeBundle::default()
            .with_birthplace("Oslo")
            .with_places(["Paris", "Rome"]),
    );
    // 61 shared lifetime years; side a contributes 0, side b 61/2; p = 1
    let score = scorer.score(&a, &b).expect("both timelines are valid");
    assert_close(score, 15.25, 1e-12, "one-sided score");
}

#[test]
fn empty_place_list_scores_like_unknown_places() {
    let scorer = SimilarityScorer::default();
    let raw = [1850.0, 1870.0, 1900.0, 1910.0];
    let empty = artist(
        "empty",
        raw,
        AttributeBundle::default()
            .with_places(Vec::<String>::new())
            .with_birthplace("Oslo"),
    );
    let unknown = artist("unknown", raw, AttributeBundle::default().with_birthplace("Oslo"));
    let b = artist(
        "b",
        raw,
        AttributeBundle::default()
            .with_birthplace("Oslo")
            .with_places(["Paris", "Rome"]),
    );
    let with_empty = scorer.score(&empty, &b).expect("both timelines are valid");
    assert_close(with_empty, 15.25, 1e-12, "empty-places score");
    assert_eq!(Some(with_empty), scorer.score(&unknown, &b));
}

#[test]
fn nationality_needs_known_citizenships() {
    let scorer = SimilarityScorer::default();
    let raw = [1850.0, 1870.0, 1900.0, 1910.0];
    let stateless = artist(
        "a",
        raw,
        AttributeBundle::default()
            .with_places(["Paris"])
            .with_nationality(["Sweden"]),
    );
    let swede = artist(
        "b",
        raw,
        AttributeBundle::default()
            .with_places(["Rome"])
            .with_nationality(["Sweden"])
            .with_citizenship("Sweden"),
    );
    assert_eq!(scorer.score(&stateless, &swede), Some(0.0));

    let dual = artist(
        "c",
        raw,
        AttributeBundle::default()
            .with_places(["Oslo"])
            .with_nationality(["Sweden", "Norway"])
            .with_citizenship("Norway"),
    );
    // citizenships differ: 0.3 shared over 2 nationality pairs, one match
    let score = scorer.score(&swede, &dual).expect("both timelines are valid");
    assert_close(score, 61.0 * 0.15, 1e-12, "nationality fallback");
}

#[test]
fn no_attribute_overlap_scores_exactly_zero() {
    let scorer = SimilarityScorer::default();
    let raw = [1850.0, 1870.0, 1900.0, 1910.0];
    let a = artist(
        "a",
        raw,
        AttributeBundle::default()
            .with_places(["Oslo"])
            .with_birthplace("Bergen")
            .with_citizenship("Norway"),
    );
    let b = artist(
        "b",
        raw,
        AttributeBundle::default()
            .with_places(["Rome"])
            .with_birthplace("Naples")
            .with_citizenship("Italy"),
    );
    assert_eq!(scorer.score(&a, &b), Some(0.0));
}

#[test]
fn active_years_mode_counts_the_active_span() {
    let raw = [1850.0, 1870.0, 1900.0, 1910.0];
    let attrs = AttributeBundle::default().with_places(["Paris"]);
    let a = artist("a", raw, attrs.clone());
    let b = artist("b", raw, attrs);

    let lifetime = SimilarityScorer::default();
    let active = SimilarityScorer::new(SimilarityConfig::default().with_active_years_only(true));
    assert_eq!(lifetime.score(&a, &b), Some(61.0));
    assert_eq!(active.score(&a, &b), Some(31.0));
}

#[test]
fn invalid_record_has_no_score() {
    let scorer = SimilarityScorer::default();
    let good = artist("good", [1850.0, 1870.0, 1900.0, 1910.0], AttributeBundle::default());
    let bad = artist("bad", [1800.0, 1820.0, NAN, NAN], AttributeBundle::default());
    assert_eq!(scorer.score(&good, &bad), None);
    assert_eq!(scorer.score(&bad, &good), None);
}

#[test]
fn network_skips_invalid_records_and_keeps_positive_edges() {
    let paris = AttributeBundle::default().with_places(["Paris"]);
    let records = vec![
        artist("a", [1850.0, 1870.0, 1900.0, 1910.0], paris.clone()),
        artist("b", [1880.0, 1900.0, 1930.0, 1940.0], paris.clone()),
        artist("c", [1600.0, 1620.0, 1650.0, 1660.0], paris.clone()),
        artist("d", [1700.0, NAN, NAN, 1900.0], paris),
    ];
    let net = build_similarity_graph(&records, &SimilarityConfig::default())
        .expect("scores are finite");
    assert_eq!(net.skipped, vec!["d".to_string()]);
    assert_eq!(net.pairs_scored, 3);
    assert_eq!(net.graph.edge_count(), 1);

    let a = net.graph.find("a").expect("a is valid");
    let b = net.graph.find("b").expect("b is valid");
    let c = net.graph.find("c").expect("c is valid");
    // 1880..=1910 shared, one place each
    assert_eq!(net.graph.edge_weight(a, b), Some(31.0));
    assert_eq!(net.graph.degree(c), 0);
}
