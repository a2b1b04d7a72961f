// Cluster namer trait.
//
// Naming is the only step that looks at keyword text, so it sits behind a
// trait: the TF-IDF namer is the default, and the plain first-member namer
// is there for runs where the seed keyword is good enough.

use crate::records::models::KeywordBlock;

/// Chooses a display name for a cluster from its surviving members.
pub trait ClusterNamer {
    /// Pick a name. Members are in cluster order, seed first. Must not fail:
    /// when nothing better is available, return the first member's keyword.
    fn name(&self, members: &[KeywordBlock]) -> String;
}

/// Names every cluster after its first member.
pub struct FirstMemberNamer;

impl ClusterNamer for FirstMemberNamer {
    fn name(&self, members: &[KeywordBlock]) -> String {
        first_keyword(members)
    }
}

/// The first member's keyword, or an empty name for an empty cluster.
pub(crate) fn first_keyword(members: &[KeywordBlock]) -> String {
    members
        .first()
        .map(|m| m.keyword.clone())
        .unwrap_or_default()
}
