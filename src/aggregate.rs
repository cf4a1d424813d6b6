//! Group-by-then-reduce over row partitions.
//!
//! Each rayon partition folds into its own map; the partial maps are merged
//! with [`Accumulator::combine`]. Because combining is associative and
//! commutative, any partitioning yields the same totals.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use rayon::prelude::*;

/// A reduction value that can absorb another partial of the same group.
pub trait Accumulator: Send {
    fn combine(&mut self, other: Self);
}

/// Plain occurrence count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count(pub u64);

impl Accumulator for Count {
    fn combine(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Running sum and count, for means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumCount {
    pub sum: u64,
    pub count: u64,
}

impl SumCount {
    pub fn of(value: u64) -> Self {
        SumCount {
            sum: value,
            count: 1,
        }
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

impl Accumulator for SumCount {
    fn combine(&mut self, other: Self) {
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// (row index, position inside the row) of the emission that created a group.
type Seen = (usize, usize);

#[derive(Debug, Clone)]
struct Slot<A> {
    first_seen: Seen,
    acc: A,
}

/// Reduced value per distinct key. Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AggregateResult<K, A> {
    groups: HashMap<K, Slot<A>>,
}

impl<K: Eq + Hash, A> AggregateResult<K, A> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&A> {
        self.groups.get(key).map(|slot| &slot.acc)
    }

    /// Groups in the order their key first appeared in the input.
    pub fn into_ordered(self) -> Vec<(K, A)> {
        let mut slots: Vec<(K, Slot<A>)> = self.groups.into_iter().collect();
        slots.sort_by_key(|(_, slot)| slot.first_seen);
        slots.into_iter().map(|(k, slot)| (k, slot.acc)).collect()
    }

    /// Unordered (key, value) pairs.
    pub fn into_pairs(self) -> Vec<(K, A)> {
        self.groups
            .into_iter()
            .map(|(k, slot)| (k, slot.acc))
            .collect()
    }
}

fn absorb<K: Eq + Hash, A: Accumulator>(
    groups: &mut HashMap<K, Slot<A>>,
    key: K,
    first_seen: Seen,
    acc: A,
) {
    match groups.entry(key) {
        Entry::Occupied(mut e) => {
            let slot = e.get_mut();
            slot.acc.combine(acc);
            slot.first_seen = slot.first_seen.min(first_seen);
        }
        Entry::Vacant(e) => {
            e.insert(Slot { first_seen, acc });
        }
    }
}

fn merge<K: Eq + Hash, A: Accumulator>(
    a: HashMap<K, Slot<A>>,
    b: HashMap<K, Slot<A>>,
) -> HashMap<K, Slot<A>> {
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (key, slot) in from {
        absorb(&mut into, key, slot.first_seen, slot.acc);
    }
    into
}

/// Group `items` by one key per item and reduce the mapped values.
pub fn group_by<T, K, A, KF, MF>(items: &[T], key: KF, value: MF) -> AggregateResult<K, A>
where
    T: Sync,
    K: Eq + Hash + Send,
    A: Accumulator,
    KF: Fn(&T) -> K + Sync,
    MF: Fn(&T) -> A + Sync,
{
    group_by_many(items, |item| std::iter::once((key(item), value(item))))
}

/// Group when one item emits any number of (key, value) pairs, e.g. tokens of a post.
pub fn group_by_many<T, K, A, F, I>(items: &[T], emit: F) -> AggregateResult<K, A>
where
    T: Sync,
    K: Eq + Hash + Send,
    A: Accumulator,
    F: Fn(&T) -> I + Sync,
    I: IntoIterator<Item = (K, A)>,
{
    let groups = items
        .par_iter()
        .enumerate()
        .fold(HashMap::new, |mut groups, (idx, item)| {
            for (pos, (key, acc)) in emit(item).into_iter().enumerate() {
                absorb(&mut groups, key, (idx, pos), acc);
            }
            groups
        })
        .reduce(HashMap::new, merge);
    AggregateResult { groups }
}

/// Count items per key.
pub fn count_by<T, K, KF>(items: &[T], key: KF) -> AggregateResult<K, Count>
where
    T: Sync,
    K: Eq + Hash + Send,
    KF: Fn(&T) -> K + Sync,
{
    group_by(items, key, |_| Count(1))
}

/// `count / total * 100`, rounded half-up to two decimals.
///
/// Integer arithmetic keeps `x.xx5` cases exact.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let num = 2 * u128::from(count) * 10_000 + u128::from(total);
    let hundredths = num / (2 * u128::from(total));
    hundredths as f64 / 100.0
}
