use serde::Serialize;

use crate::records::models::KeywordBlock;

/// A group of keywords that share search intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Display name; the seed keyword until the namer sets it
    pub name: String,
    /// Seed first, then members in input order
    pub members: Vec<KeywordBlock>,
}

impl Cluster {
    pub fn new(seed: KeywordBlock) -> Self {
        Self {
            name: seed.keyword.clone(),
            members: vec![seed],
        }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
