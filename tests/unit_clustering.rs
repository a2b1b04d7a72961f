// Unit tests for the clustering stage.
//
// Tests isolated pure functions: url_overlap edge cases, OverlapClusterer
// seed semantics, and dedup_cluster invariants. Properties over generated
// blocks are checked with proptest.

use std::collections::HashSet;

use proptest::prelude::*;
use serpclust::clustering::cluster::Cluster;
use serpclust::clustering::clusterer::OverlapClusterer;
use serpclust::clustering::dedup::{dedup_cluster, DedupOutcome};
use serpclust::clustering::overlap::{is_same_intent, url_overlap};
use serpclust::records::models::{KeywordBlock, RankedResult};

fn block(keyword: &str, volume: f64, urls: &[&str]) -> KeywordBlock {
    KeywordBlock {
        keyword: keyword.to_string(),
        results: urls
            .iter()
            .enumerate()
            .map(|(i, u)| RankedResult {
                position: i as u32 + 1,
                url: u.to_string(),
                title: format!("{keyword} {i}"),
            })
            .collect(),
        volume,
    }
}

fn overlap(a: &KeywordBlock, b: &KeywordBlock) -> usize {
    url_overlap(&a.url_set(), &b.url_set())
}

fn same_intent(a: &KeywordBlock, b: &KeywordBlock) -> bool {
    is_same_intent(&a.url_set(), &b.url_set(), 3)
}

fn cluster_blocks(blocks: &[KeywordBlock], threshold: usize) -> Vec<Cluster> {
    OverlapClusterer::new(blocks, threshold).collect()
}

// ============================================================
// Strategies
// ============================================================

// URLs come from a small alphabet so that blocks overlap, repeat URLs and
// share signatures often. Volumes come from a short list so ties happen.

fn arbitrary_urls() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0..8usize).prop_map(|i| format!("u{i}")), 0..=10)
}

fn arbitrary_volume() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 10.0, 10.0, 25.0, 100.0])
}

fn arbitrary_block() -> impl Strategy<Value = KeywordBlock> {
    ((0..6usize), arbitrary_volume(), arbitrary_urls()).prop_map(|(k, volume, urls)| {
        let urls: Vec<&str> = urls.iter().map(String::as_str).collect();
        block(&format!("kw{k}"), volume, &urls)
    })
}

fn arbitrary_blocks() -> impl Strategy<Value = Vec<KeywordBlock>> {
    prop::collection::vec(arbitrary_block(), 1..12)
}

// ============================================================
// url_overlap
// ============================================================

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(a in arbitrary_block(), b in arbitrary_block()) {
        prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
        prop_assert_eq!(same_intent(&a, &b), same_intent(&b, &a));
    }
}

proptest! {
    #[test]
    fn prop_overlap_bounded_by_smaller_url_set(a in arbitrary_block(), b in arbitrary_block()) {
        let shared = overlap(&a, &b);
        prop_assert!(shared <= a.url_set().len().min(b.url_set().len()));
        prop_assert_eq!(overlap(&a, &a), a.url_set().len());
    }
}

#[test]
fn overlap_with_self_is_distinct_url_count() {
    let a = block("a", 1.0, &["1", "2", "2", "3"]);
    assert_eq!(overlap(&a, &a), 3);
}

#[test]
fn overlap_ignores_rank_order() {
    let a = block("a", 1.0, &["1", "2", "3", "4"]);
    let b = block("b", 1.0, &["4", "3", "2", "1"]);
    assert_eq!(overlap(&a, &b), 4);
    assert!(same_intent(&a, &b));
}

#[test]
fn short_blocks_compare_on_what_they_have() {
    let full = block("full", 1.0, &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    let short = block("short", 1.0, &["1", "2", "3", "4"]);
    assert_eq!(overlap(&full, &short), 4);
    assert!(same_intent(&full, &short));
}

// ============================================================
// OverlapClusterer
// ============================================================

#[test]
fn seeds_follow_input_order() {
    let blocks = vec![
        block("z first", 1.0, &["a"]),
        block("a second", 1.0, &["b"]),
        block("m third", 1.0, &["c"]),
    ];
    let clusters = cluster_blocks(&blocks, 3);
    let seeds: Vec<&str> = clusters
        .iter()
        .map(|c| c.members[0].keyword.as_str())
        .collect();
    assert_eq!(seeds, vec!["z first", "a second", "m third"]);
}

#[test]
fn earlier_blocks_are_never_pulled_into_later_seeds() {
    // c and d share only 3 URLs with a, so a stays alone; d still joins c
    // once c becomes a seed.
    let blocks = vec![
        block("a", 1.0, &["1", "2", "3"]),
        block("b", 1.0, &["x"]),
        block("c", 1.0, &["1", "2", "3", "4", "5"]),
        block("d", 1.0, &["1", "2", "3", "4", "6"]),
    ];
    let clusters = cluster_blocks(&blocks, 3);
    let groups: Vec<Vec<&str>> = clusters.iter().map(|c| c.keywords().collect()).collect();
    assert_eq!(groups, vec![vec!["a"], vec!["b"], vec!["c", "d"]]);
}

#[test]
fn every_keyword_lands_in_exactly_one_cluster() {
    let blocks = vec![
        block("a", 1.0, &["1", "2", "3", "4", "5"]),
        block("b", 1.0, &["1", "2", "3", "4", "6"]),
        block("c", 1.0, &["1", "2", "3", "4", "7"]),
        block("d", 1.0, &["q"]),
        block("e", 1.0, &["q", "r"]),
    ];
    let clusters = cluster_blocks(&blocks, 3);
    let mut all: Vec<&str> = clusters.iter().flat_map(|c| c.keywords()).collect();
    all.sort();
    assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
}

proptest! {
    #[test]
    fn prop_every_keyword_lands_in_exactly_one_cluster(blocks in arbitrary_blocks()) {
        let clusters = cluster_blocks(&blocks, 3);

        let mut placed: Vec<&str> = clusters.iter().flat_map(|c| c.keywords()).collect();
        placed.sort_unstable();
        let mut expected: Vec<&str> = blocks.iter().map(|b| b.keyword.as_str()).collect();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(placed, expected);
    }
}

proptest! {
    #[test]
    fn prop_members_overlap_their_seed(blocks in arbitrary_blocks()) {
        for cluster in cluster_blocks(&blocks, 3) {
            let seed = &cluster.members[0];
            for member in &cluster.members[1..] {
                prop_assert!(same_intent(seed, member));
            }
        }
    }
}

#[test]
fn zero_threshold_merges_any_shared_url() {
    let blocks = vec![block("a", 1.0, &["1", "2"]), block("b", 1.0, &["2", "3"])];
    let mut clusterer = OverlapClusterer::new(&blocks, 0);
    assert_eq!(clusterer.next().unwrap().len(), 2);
    assert!(clusterer.next().is_none());
}

// ============================================================
// dedup_cluster
// ============================================================

fn cluster_of(members: Vec<KeywordBlock>) -> Cluster {
    let mut iter = members.into_iter();
    let mut cluster = Cluster::new(iter.next().unwrap());
    cluster.members.extend(iter);
    cluster
}

proptest! {
    #[test]
    fn prop_dedup_is_idempotent(members in arbitrary_blocks()) {
        let mut cluster = cluster_of(members);
        dedup_cluster(&mut cluster);
        let after_once = cluster.clone();

        let second = dedup_cluster(&mut cluster);

        prop_assert_eq!(second, DedupOutcome::default());
        prop_assert_eq!(cluster, after_once);
    }
}

proptest! {
    #[test]
    fn prop_dedup_leaves_unique_keywords_and_signatures(members in arbitrary_blocks()) {
        let before = members.len();
        let mut cluster = cluster_of(members);
        let outcome = dedup_cluster(&mut cluster);

        let keywords: HashSet<&str> = cluster.keywords().collect();
        let signatures: HashSet<Vec<&str>> = cluster.members.iter().map(|m| m.signature()).collect();
        prop_assert_eq!(keywords.len(), cluster.len());
        prop_assert_eq!(signatures.len(), cluster.len());
        prop_assert_eq!(
            cluster.len() + outcome.same_keyword + outcome.signature_duplicates,
            before
        );
    }
}

#[test]
fn dedup_twice_equals_dedup_once() {
    let mut cluster = cluster_of(vec![
        block("a", 5.0, &["1", "2", "3"]),
        block("b", 9.0, &["3", "2", "1"]),
        block("a", 7.0, &["9"]),
        block("c", 9.0, &["1", "3", "2"]),
        block("d", 1.0, &["4"]),
    ]);

    let first = dedup_cluster(&mut cluster);
    let after_once = cluster.clone();
    let second = dedup_cluster(&mut cluster);

    assert_eq!(first.same_keyword, 1);
    assert_eq!(second, DedupOutcome::default());
    assert_eq!(cluster, after_once);
}

#[test]
fn dedup_keeps_singletons_untouched() {
    let mut cluster = cluster_of(vec![block("solo", 3.0, &["1"])]);
    let outcome = dedup_cluster(&mut cluster);
    assert_eq!(outcome, DedupOutcome::default());
    assert_eq!(cluster.len(), 1);
}

#[test]
fn dedup_counts_every_dropped_signature_member() {
    let mut cluster = cluster_of(vec![
        block("a", 1.0, &["1", "2"]),
        block("b", 2.0, &["2", "1"]),
        block("c", 3.0, &["1", "2"]),
    ]);
    let outcome = dedup_cluster(&mut cluster);
    assert_eq!(outcome.signature_duplicates, 2);
    assert_eq!(cluster.keywords().collect::<Vec<_>>(), vec!["c"]);
}
