use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::aggregate::{AggregateResult, Count, group_by_many};
use crate::error::AnalysisError;
use crate::row::RowSet;

/// Built-in English stop words. Matching is exact and case-sensitive.
pub const DEFAULT_STOPWORDS: [&str; 37] = [
    "the", "is", "in", "and", "to", "of", "a", "for", "on", "with", "at", "by", "an", "be", "this",
    "that", "it", "from", "or", "as", "are", "was", "were", "but", "not", "have", "has", "had",
    "will", "would", "can", "could", "should", "may", "might", "must", "shall",
];

/// Stop-word set used by the [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        StopWords {
            words: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl StopWords {
    pub fn empty() -> Self {
        StopWords {
            words: HashSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add words from a text, one per line. Lines are trimmed, blank lines skipped.
    pub fn extend_from_text(&mut self, text: &str) {
        self.words.extend(
            text.lines()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(String::from),
        );
    }

    /// Built-in list plus the words of a stopword file.
    pub fn with_file(path: &Path) -> Result<Self, AnalysisError> {
        let text = fs::read_to_string(path).map_err(|source| AnalysisError::StopWords {
            path: path.to_path_buf(),
            source,
        })?;
        let mut stop = StopWords::default();
        stop.extend_from_text(&text);
        Ok(stop)
    }
}

/// Splits post text on single ASCII spaces and drops stop words.
///
/// Runs of spaces would produce empty tokens; those are discarded.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    stop: &'a StopWords,
}

impl<'a> Tokenizer<'a> {
    pub fn new(stop: &'a StopWords) -> Self {
        Tokenizer { stop }
    }

    pub fn tokens<'t>(&self, content: &'t str) -> impl Iterator<Item = &'t str> + use<'t, 'a> {
        let stop = self.stop;
        content
            .split(' ')
            .filter(move |t| !t.is_empty() && !stop.contains(t))
    }

    /// Word counts over the rows whose sentiment equals `sentiment` exactly.
    pub fn word_counts(&self, rows: &RowSet, sentiment: &str) -> AggregateResult<String, Count> {
        group_by_many(rows.rows(), |row| {
            if row.sentiment != sentiment {
                return Vec::new();
            }
            self.tokens(&row.content)
                .map(|t| (t.to_string(), Count(1)))
                .collect::<Vec<_>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;

    #[test]
    fn splits_on_space_and_filters_lowercase_stopwords() {
        let stop = StopWords::default();
        let tok = Tokenizer::new(&stop);
        let words: Vec<&str> = tok.tokens("The cat is on the mat").collect();
        assert_eq!(words, vec!["The", "cat", "mat"]);
    }

    #[test]
    fn repeated_spaces_do_not_yield_empty_tokens() {
        let stop = StopWords::empty();
        let tok = Tokenizer::new(&stop);
        let words: Vec<&str> = tok.tokens("  hello   world ").collect();
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn only_ascii_space_separates() {
        let stop = StopWords::empty();
        let tok = Tokenizer::new(&stop);
        let words: Vec<&str> = tok.tokens("tab\tseparated new\nline").collect();
        assert_eq!(words, vec!["tab\tseparated", "new\nline"]);
    }

    #[test]
    fn default_list_has_37_words() {
        assert_eq!(StopWords::default().len(), 37);
        assert!(!StopWords::default().contains("The"));
    }

    #[test]
    fn extend_from_text_trims_and_skips_blank_lines() {
        let mut stop = StopWords::empty();
        stop.extend_from_text("  foo \n\nbar\n");
        assert!(stop.contains("foo"));
        assert!(stop.contains("bar"));
        assert_eq!(stop.len(), 2);
    }

    #[test]
    fn word_counts_respects_sentiment_filter() {
        let rows = RowSet::from(vec![
            Row::new(1, "A", "Positive", "good good the game"),
            Row::new(2, "B", "Negative", "bad game"),
            Row::new(3, "C", "positive", "good"),
        ]);
        let stop = StopWords::default();
        let tok = Tokenizer::new(&stop);
        let pos = tok.word_counts(&rows, "Positive");
        assert_eq!(pos.get(&"good".to_string()), Some(&Count(2)));
        assert_eq!(pos.get(&"game".to_string()), Some(&Count(1)));
        assert!(pos.get(&"the".to_string()).is_none());
        assert!(pos.get(&"bad".to_string()).is_none());
    }
}
