// TF-IDF cluster naming.
//
// Each member keyword is one document. We weight every term per document
// (raw term count times smoothed inverse document frequency, then L2
// normalised per document), average the weights across the cluster, and
// take the term with the highest average. The cluster is named after the
// first member whose keyword contains that term. Terms are lowercased but
// the keyword is matched as written, so "Running Shoes" does not contain
// "running".
//
// Keywords are short, so a single word often carries the whole intent:
// "buy running shoes" and "running shoes for sale" share "running" and
// "shoes", which outweigh the one-off "buy" and "sale".

use std::collections::{BTreeMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::traits::{first_keyword, ClusterNamer};
use crate::records::models::KeywordBlock;

/// Split text into lowercase terms of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_lowercase())
        .collect()
}

/// Per-document TF-IDF weights over a sorted vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TermWeights {
    /// Vocabulary in lexicographic order
    pub terms: Vec<String>,
    /// One row per document, one column per term
    pub rows: Vec<Vec<f64>>,
}

impl TermWeights {
    /// Fit the model on a set of documents, ignoring stop words.
    pub fn fit<S: AsRef<str>>(documents: &[S], stop_words: &HashSet<String>) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                tokenize(doc.as_ref())
                    .into_iter()
                    .filter(|t| !stop_words.contains(t))
                    .collect()
            })
            .collect();

        // Document frequency per term; BTreeMap keeps the vocabulary sorted
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in distinct {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Self::default();
        }

        let n_docs = documents.len() as f64;
        let column: BTreeMap<&str, usize> = doc_freq
            .keys()
            .enumerate()
            .map(|(i, term)| (*term, i))
            .collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; idf.len()];
                for token in tokens {
                    row[column[token.as_str()]] += 1.0;
                }
                for (weight, idf) in row.iter_mut().zip(&idf) {
                    *weight *= idf;
                }
                let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|w| *w /= norm);
                }
                row
            })
            .collect();

        Self {
            terms: doc_freq.keys().map(|t| t.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Mean weight of each term across all documents.
    pub fn average(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.terms.len()];
        for row in &self.rows {
            for (sum, w) in sums.iter_mut().zip(row) {
                *sum += w;
            }
        }
        let n = self.rows.len().max(1) as f64;
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Term with the highest average weight. Ties go to the term that sorts
    /// first. `None` when the vocabulary is empty.
    pub fn top_term(&self) -> Option<&str> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, avg) in self.average().into_iter().enumerate() {
            match best {
                Some((_, best_avg)) if avg <= best_avg => {}
                _ => best = Some((idx, avg)),
            }
        }
        best.map(|(idx, _)| self.terms[idx].as_str())
    }
}

/// TF-IDF based namer, the default.
pub struct TfIdfNamer {
    stop_words: HashSet<String>,
}

impl Default for TfIdfNamer {
    /// English stop words from the `stop-words` crate.
    fn default() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }
}

impl TfIdfNamer {
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl ClusterNamer for TfIdfNamer {
    fn name(&self, members: &[KeywordBlock]) -> String {
        let keywords: Vec<&str> = members.iter().map(|m| m.keyword.as_str()).collect();
        let weights = TermWeights::fit(&keywords, &self.stop_words);

        let Some(top_term) = weights.top_term() else {
            return first_keyword(members);
        };

        // First member in cluster order that mentions the top term
        let named = keywords
            .iter()
            .find(|kw| kw.contains(top_term))
            .map(|kw| kw.to_string());

        debug!(top_term, members = members.len(), "Picked cluster top term");

        named.unwrap_or_else(|| first_keyword(members))
    }
}
