use std::hash::Hash;

use crate::aggregate::{AggregateResult, Count};

///Sort counted groups by count (descending), then key (ascending), and keep the first `k`.
/// # Example
/// ```
/// use sentiment_tables::aggregate::count_by;
/// use sentiment_tables::rank::top_k;
/// let words = vec!["two", "one", "two", "three", "three", "three"];
/// let counted = count_by(&words, |w| w.to_string());
/// let top = top_k(counted, 2);
/// assert_eq!(top, vec![("three".to_string(), 3), ("two".to_string(), 2)]);
/// ```
pub fn top_k<K>(counted: AggregateResult<K, Count>, k: usize) -> Vec<(K, u64)>
where
    K: Eq + Hash + Ord,
{
    let mut ranked: Vec<(K, u64)> = counted
        .into_pairs()
        .into_iter()
        .map(|(key, count)| (key, count.0))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}
