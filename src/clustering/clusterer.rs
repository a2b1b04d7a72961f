// Seed-based overlap clustering.
//
// Walk the blocks in input order. The first block whose keyword hasn't been
// assigned yet seeds a new cluster; every later unassigned block that shares
// more than `threshold` URLs with the seed joins it. Candidates are compared
// against the seed only, so two members of a cluster need not overlap each
// other. Each later block is looked at once per seed.
//
// Clusters come out lazily through `Iterator`, so the caller can finish
// (dedup, name, report progress) one cluster before the next is formed.

use std::collections::HashSet;

use super::cluster::Cluster;
use super::overlap::is_same_intent;
use crate::records::models::KeywordBlock;

pub struct OverlapClusterer<'a> {
    blocks: &'a [KeywordBlock],
    url_sets: Vec<HashSet<&'a str>>,
    threshold: usize,
    /// Keywords already placed in a cluster. Only ever grows.
    assigned: HashSet<&'a str>,
    next_seed: usize,
}

impl<'a> OverlapClusterer<'a> {
    pub fn new(blocks: &'a [KeywordBlock], threshold: usize) -> Self {
        Self {
            blocks,
            url_sets: blocks.iter().map(|b| b.url_set()).collect(),
            threshold,
            assigned: HashSet::new(),
            next_seed: 0,
        }
    }

    /// How many distinct keywords have been placed so far.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

impl<'a> Iterator for OverlapClusterer<'a> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let blocks = self.blocks;

        // Find the next unassigned block to seed a cluster
        let seed_idx = (self.next_seed..blocks.len())
            .find(|&i| !self.assigned.contains(blocks[i].keyword.as_str()))?;
        self.next_seed = seed_idx + 1;

        let seed = &blocks[seed_idx];
        self.assigned.insert(seed.keyword.as_str());
        let mut cluster = Cluster::new(seed.clone());

        for candidate_idx in seed_idx + 1..blocks.len() {
            let candidate = &blocks[candidate_idx];
            if self.assigned.contains(candidate.keyword.as_str()) {
                continue;
            }

            if is_same_intent(
                &self.url_sets[seed_idx],
                &self.url_sets[candidate_idx],
                self.threshold,
            ) {
                self.assigned.insert(candidate.keyword.as_str());
                cluster.members.push(candidate.clone());
            }
        }

        Some(cluster)
    }
}
