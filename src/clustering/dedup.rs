// Per-cluster deduplication.
//
// Two passes, run in order:
//
//   1. Same keyword text: keep the member with the larger volume.
//   2. Same signature (sorted top-K URLs): the keywords are interchangeable
//      as far as the search engine is concerned, so keep the one with the
//      larger volume and count the rest as removed duplicates.
//
// On equal volume the member seen first wins. After both passes every
// signature in the cluster is unique, so running dedup again is a no-op.

use std::collections::HashMap;

use tracing::debug;

use super::cluster::Cluster;
use crate::records::models::KeywordBlock;

/// What a dedup pass removed from one cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupOutcome {
    /// Extra blocks for a keyword already in the cluster
    pub same_keyword: usize,
    /// Members dropped because another member had the same results
    pub signature_duplicates: usize,
}

/// Deduplicate a cluster in place.
pub fn dedup_cluster(cluster: &mut Cluster) -> DedupOutcome {
    let members = std::mem::take(&mut cluster.members);
    let before = members.len();

    let members = collapse_same_keyword(members);
    let same_keyword = before - members.len();

    let (members, signature_duplicates) = collapse_signatures(members);
    cluster.members = members;

    if same_keyword + signature_duplicates > 0 {
        debug!(
            cluster = %cluster.name,
            same_keyword, signature_duplicates, "Removed duplicate keywords"
        );
    }

    DedupOutcome {
        same_keyword,
        signature_duplicates,
    }
}

/// Keep one block per keyword text. The survivor takes the slot of the
/// first block seen for that keyword.
fn collapse_same_keyword(members: Vec<KeywordBlock>) -> Vec<KeywordBlock> {
    let mut kept: Vec<KeywordBlock> = Vec::with_capacity(members.len());
    let mut slot_by_keyword: HashMap<String, usize> = HashMap::new();

    for block in members {
        match slot_by_keyword.get(&block.keyword) {
            Some(&slot) => {
                if block.volume > kept[slot].volume {
                    kept[slot] = block;
                }
            }
            None => {
                slot_by_keyword.insert(block.keyword.clone(), kept.len());
                kept.push(block);
            }
        }
    }

    kept
}

/// Keep one block per signature. Survivors stay where they were.
fn collapse_signatures(members: Vec<KeywordBlock>) -> (Vec<KeywordBlock>, usize) {
    let mut dropped = vec![false; members.len()];

    {
        let mut winner_by_signature: HashMap<Vec<&str>, usize> = HashMap::new();
        for (idx, block) in members.iter().enumerate() {
            match winner_by_signature.get_mut(&block.signature()) {
                Some(winner) => {
                    if block.volume > members[*winner].volume {
                        dropped[*winner] = true;
                        *winner = idx;
                    } else {
                        dropped[idx] = true;
                    }
                }
                None => {
                    winner_by_signature.insert(block.signature(), idx);
                }
            }
        }
    }

    let removed = dropped.iter().filter(|d| **d).count();
    let survivors = members
        .into_iter()
        .zip(dropped)
        .filter_map(|(block, dropped)| (!dropped).then_some(block))
        .collect();

    (survivors, removed)
}
