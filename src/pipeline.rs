//! Sequencing of the aggregation stages into the seven result tables.
//!
//! Every stage reads the deduplicated [`RowSet`] only. The one exception is
//! [`sentiment_for_top_entities`], which also takes the already computed
//! `top_entities` ranking as an argument instead of recomputing it.

use std::collections::HashSet;

use log::info;
use serde::Serialize;

use crate::aggregate::{Count, SumCount, count_by, group_by, group_by_many, percentage};
use crate::config::AnalysisOptions;
use crate::dedup::dedup;
use crate::error::AnalysisError;
use crate::rank::top_k;
use crate::row::{Row, RowSet};
use crate::table::Table;
use crate::tokenize::{StopWords, Tokenizer};

pub const POSITIVE: &str = "Positive";
pub const NEGATIVE: &str = "Negative";

// Serialized field names match the table headers.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    pub count: u64,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityCount {
    #[serde(rename = "Entity")]
    pub entity: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentLength {
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "AvgTweetLength")]
    pub avg_length: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    #[serde(rename = "Word")]
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySentimentCount {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    pub count: u64,
}

/// All seven tables of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub input_rows: usize,
    pub unique_rows: usize,
    pub sentiment_percentage: Vec<SentimentShare>,
    pub top_entities: Vec<EntityCount>,
    pub avg_tweet_length_by_sentiment: Vec<SentimentLength>,
    pub top_positive_words: Vec<WordCount>,
    pub top_negative_words: Vec<WordCount>,
    pub sentiment_by_entity: Vec<EntitySentimentCount>,
    pub sentiment_for_top_entities: Vec<EntitySentimentCount>,
}

/// Count and share of each sentiment. Fails on an empty row set.
pub fn sentiment_percentage(rows: &RowSet) -> Result<Vec<SentimentShare>, AnalysisError> {
    if rows.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let total = rows.len() as u64;
    Ok(count_by(rows.rows(), |r| r.sentiment.clone())
        .into_ordered()
        .into_iter()
        .map(|(sentiment, count)| SentimentShare {
            sentiment,
            count: count.0,
            percentage: percentage(count.0, total),
        })
        .collect())
}

pub fn top_entities(rows: &RowSet, k: usize) -> Vec<EntityCount> {
    top_k(count_by(rows.rows(), |r| r.entity.clone()), k)
        .into_iter()
        .map(|(entity, count)| EntityCount { entity, count })
        .collect()
}

/// Mean content length per sentiment, in Unicode scalar values.
pub fn avg_length_by_sentiment(rows: &RowSet) -> Vec<SentimentLength> {
    group_by(
        rows.rows(),
        |r| r.sentiment.clone(),
        |r| SumCount::of(r.content.chars().count() as u64),
    )
    .into_ordered()
    .into_iter()
    .map(|(sentiment, acc)| SentimentLength {
        sentiment,
        avg_length: acc.mean(),
    })
    .collect()
}

pub fn top_words(tokenizer: &Tokenizer<'_>, rows: &RowSet, sentiment: &str, k: usize) -> Vec<WordCount> {
    top_k(tokenizer.word_counts(rows, sentiment), k)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

fn cross_tab<F>(rows: &RowSet, keep: F) -> Vec<EntitySentimentCount>
where
    F: Fn(&Row) -> bool + Sync,
{
    group_by_many(rows.rows(), |r| {
        keep(r).then(|| ((r.entity.clone(), r.sentiment.clone()), Count(1)))
    })
    .into_ordered()
        .into_iter()
        .map(|((entity, sentiment), count)| EntitySentimentCount {
            entity,
            sentiment,
            count: count.0,
        })
        .collect()
}

/// Cross-tabulation of entity against sentiment.
pub fn sentiment_by_entity(rows: &RowSet) -> Vec<EntitySentimentCount> {
    cross_tab(rows, |_| true)
}

/// Cross-tabulation restricted to the entities of a finished `top_entities` ranking.
pub fn sentiment_for_top_entities(rows: &RowSet, top: &[EntityCount]) -> Vec<EntitySentimentCount> {
    let keep: HashSet<&str> = top.iter().map(|e| e.entity.as_str()).collect();
    cross_tab(rows, |r| keep.contains(r.entity.as_str()))
}

/// Run every stage over `rows`.
pub fn run(
    rows: &RowSet,
    stop: &StopWords,
    opts: &AnalysisOptions,
) -> Result<Report, AnalysisError> {
    if rows.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let unique = dedup(rows);
    info!(
        "Duplicate posts removed: {} of {} rows kept",
        unique.len(),
        rows.len()
    );

    let shares = sentiment_percentage(&unique)?;
    info!("Sentiment analysis completed");

    let (top, (by_entity, avg_length)) = rayon::join(
        || top_entities(&unique, opts.top_entities),
        || {
            rayon::join(
                || sentiment_by_entity(&unique),
                || avg_length_by_sentiment(&unique),
            )
        },
    );
    info!("Entity analysis completed ({} top entities)", top.len());
    info!("Average post length by sentiment calculated");

    let tokenizer = Tokenizer::new(stop);
    let (positive, negative) = rayon::join(
        || top_words(&tokenizer, &unique, POSITIVE, opts.top_words),
        || top_words(&tokenizer, &unique, NEGATIVE, opts.top_words),
    );
    info!("Top words in positive and negative posts calculated");

    let for_top = sentiment_for_top_entities(&unique, &top);
    info!("Sentiment distribution by entity and for top entities calculated");

    Ok(Report {
        input_rows: rows.len(),
        unique_rows: unique.len(),
        sentiment_percentage: shares,
        top_entities: top,
        avg_tweet_length_by_sentiment: avg_length,
        top_positive_words: positive,
        top_negative_words: negative,
        sentiment_by_entity: by_entity,
        sentiment_for_top_entities: for_top,
    })
}

fn word_table(name: &'static str, words: &[WordCount]) -> Table {
    let mut t = Table::new(name, &["Word", "count"]);
    for w in words {
        t.push(vec![w.word.clone().into(), w.count.into()]);
    }
    t
}

fn cross_table(name: &'static str, counts: &[EntitySentimentCount]) -> Table {
    let mut t = Table::new(name, &["Entity", "Sentiment", "count"]);
    for c in counts {
        t.push(vec![
            c.entity.clone().into(),
            c.sentiment.clone().into(),
            c.count.into(),
        ]);
    }
    t
}

impl Report {
    /// The seven tables, in output order.
    pub fn tables(&self) -> Vec<Table> {
        let mut shares = Table::new("sentiment_percentage", &["Sentiment", "count", "Percentage"]);
        for s in &self.sentiment_percentage {
            shares.push(vec![
                s.sentiment.clone().into(),
                s.count.into(),
                s.percentage.into(),
            ]);
        }

        let mut entities = Table::new("top_entities", &["Entity", "count"]);
        for e in &self.top_entities {
            entities.push(vec![e.entity.clone().into(), e.count.into()]);
        }

        let mut lengths = Table::new(
            "avg_tweet_length_by_sentiment",
            &["Sentiment", "AvgTweetLength"],
        );
        for l in &self.avg_tweet_length_by_sentiment {
            lengths.push(vec![l.sentiment.clone().into(), l.avg_length.into()]);
        }

        vec![
            shares,
            entities,
            lengths,
            word_table("top_positive_words", &self.top_positive_words),
            word_table("top_negative_words", &self.top_negative_words),
            cross_table("sentiment_by_entity", &self.sentiment_by_entity),
            cross_table("sentiment_for_top_entities", &self.sentiment_for_top_entities),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;

    fn scenario() -> RowSet {
        RowSet::from(vec![
            Row::new(1, "A", "Positive", "a b c"),
            Row::new(2, "A", "Positive", "a b c"),
            Row::new(3, "B", "Negative", "d e f"),
        ])
    }

    #[test]
    fn three_row_scenario() {
        let report = run(&scenario(), &StopWords::default(), &AnalysisOptions::default()).unwrap();
        assert_eq!(report.unique_rows, 2);
        assert_eq!(
            report.sentiment_percentage,
            vec![
                SentimentShare {
                    sentiment: "Positive".into(),
                    count: 1,
                    percentage: 50.0
                },
                SentimentShare {
                    sentiment: "Negative".into(),
                    count: 1,
                    percentage: 50.0
                },
            ]
        );
        assert_eq!(
            report.top_entities,
            vec![
                EntityCount {
                    entity: "A".into(),
                    count: 1
                },
                EntityCount {
                    entity: "B".into(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            report.avg_tweet_length_by_sentiment,
            vec![
                SentimentLength {
                    sentiment: "Positive".into(),
                    avg_length: 5.0
                },
                SentimentLength {
                    sentiment: "Negative".into(),
                    avg_length: 5.0
                },
            ]
        );
        // "a" is a stop word
        let pos: Vec<&str> = report.top_positive_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(pos, vec!["b", "c"]);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = run(&RowSet::default(), &StopWords::default(), &AnalysisOptions::default());
        assert!(matches!(err, Err(AnalysisError::EmptyDataset)));
        assert!(matches!(
            sentiment_percentage(&RowSet::default()),
            Err(AnalysisError::EmptyDataset)
        ));
    }

    #[test]
    fn length_counts_code_points() {
        let rows = RowSet::from(vec![
            Row::new(1, "A", "Neutral", "héllo"),
            Row::new(2, "A", "Neutral", "日本"),
        ]);
        let avg = avg_length_by_sentiment(&rows);
        assert_eq!(avg[0].avg_length, 3.5);
    }

    fn many_entities() -> RowSet {
        let mut rows = Vec::new();
        let mut id = 0;
        for (e, n) in (0..14).map(|i| (format!("E{:02}", i), 14 - i)) {
            for j in 0..n {
                id += 1;
                let sentiment = if j % 3 == 0 { "Positive" } else { "Negative" };
                rows.push(Row::new(id, &e, sentiment, &format!("post {id} about {e}")));
            }
        }
        RowSet::from(rows)
    }

    #[test]
    fn cross_tab_sums_match_entity_totals() {
        let rows = many_entities();
        let tab = sentiment_by_entity(&rows);
        for e in rows.iter().map(|r| r.entity.as_str()) {
            let from_tab: u64 = tab.iter().filter(|c| c.entity == e).map(|c| c.count).sum();
            let direct = rows.iter().filter(|r| r.entity == e).count() as u64;
            assert_eq!(from_tab, direct);
        }
    }

    #[test]
    fn top_entity_cross_tab_uses_given_ranking() {
        let rows = many_entities();
        let top = top_entities(&rows, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].entity, "E00");
        let restricted = sentiment_for_top_entities(&rows, &top);
        let names: HashSet<&str> = top.iter().map(|e| e.entity.as_str()).collect();
        assert!(restricted.iter().all(|c| names.contains(c.entity.as_str())));
        assert!(!restricted.iter().any(|c| c.entity == "E13"));

        let only_first = sentiment_for_top_entities(&rows, &top[..1]);
        assert!(only_first.iter().all(|c| c.entity == "E00"));
    }

    #[test]
    fn percentages_sum_to_about_100() {
        let rows = RowSet::from(vec![
            Row::new(1, "A", "Positive", "x1"),
            Row::new(2, "A", "Negative", "x2"),
            Row::new(3, "A", "Neutral", "x3"),
            Row::new(4, "B", "Irrelevant", "x4"),
            Row::new(5, "B", "Positive", "x5"),
            Row::new(6, "B", "Positive", "x6"),
            Row::new(7, "C", "Neutral", "x7"),
        ]);
        let sum: f64 = sentiment_percentage(&rows)
            .unwrap()
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {sum}");
    }

    #[test]
    fn serialized_rows_match_table_json() {
        let report = run(&many_entities(), &StopWords::default(), &AnalysisOptions::default()).unwrap();
        let tables = report.tables();
        let typed = [
            serde_json::to_value(&report.sentiment_percentage).unwrap(),
            serde_json::to_value(&report.top_entities).unwrap(),
            serde_json::to_value(&report.avg_tweet_length_by_sentiment).unwrap(),
            serde_json::to_value(&report.top_positive_words).unwrap(),
            serde_json::to_value(&report.top_negative_words).unwrap(),
            serde_json::to_value(&report.sentiment_by_entity).unwrap(),
            serde_json::to_value(&report.sentiment_for_top_entities).unwrap(),
        ];
        for (table, value) in tables.iter().zip(typed) {
            assert_eq!(table.to_json(), value, "{} differs", table.name);
        }
    }

    #[test]
    fn tables_in_output_order() {
        let report = run(&scenario(), &StopWords::default(), &AnalysisOptions::default()).unwrap();
        let names: Vec<&str> = report.tables().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "sentiment_percentage",
                "top_entities",
                "avg_tweet_length_by_sentiment",
                "top_positive_words",
                "top_negative_words",
                "sentiment_by_entity",
                "sentiment_for_top_entities",
            ]
        );
    }
}
