//! Ranked term counts.

use std::collections::HashMap;

use serde::Serialize;

/// One ranked term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    /// Word, `"w1 w2"` bigram, or emoji
    pub term: String,
    /// Number of occurrences
    pub count: usize,
}

/// Terms ranked by descending count.
///
/// Ties keep the order in which terms were first encountered. The table is
/// an owned, finite collection: [`iter`](Self::iter) can be called any number
/// of times and always yields the same sequence.
///
/// # Example
///
/// ```rust
/// use chatstat::analyzer::Analyzer;
/// use chatstat::{MessageKind, Record};
/// use chrono::Utc;
///
/// let records = vec![Record::new(Utc::now(), Some("Al".into()), "hello world hello", MessageKind::Text)];
/// let table = Analyzer::new(&records).word_frequency(1);
///
/// assert_eq!(table.iter().collect::<Vec<_>>(), vec![("hello", 2)]);
/// assert_eq!(table.iter().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<TermCount>,
}

impl FrequencyTable {
    /// Counts `terms` and keeps the `top_n` most frequent.
    pub fn from_terms<I>(terms: I, top_n: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        // term -> (count, first position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, term) in terms.into_iter().enumerate() {
            counts.entry(term).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(top_n);

        Self {
            entries: ranked
                .into_iter()
                .map(|(term, count, _)| TermCount { term, count })
                .collect(),
        }
    }

    /// Iterates `(term, count)` pairs, most frequent first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|e| (e.term.as_str(), e.count))
    }

    /// Returns the ranked entries.
    pub fn entries(&self) -> &[TermCount] {
        &self.entries
    }

    /// Returns the count for `term`, if it made the table.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.term == term).map(|e| e.count)
    }

    /// Returns the most frequent entry.
    pub fn top(&self) -> Option<&TermCount> {
        self.entries.first()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no term was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'t> IntoIterator for &'t FrequencyTable {
    type Item = &'t TermCount;
    type IntoIter = std::slice::Iter<'t, TermCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
