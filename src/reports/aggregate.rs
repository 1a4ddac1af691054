//! Aggregator: categorical counts for the dashboard charts

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{CategoryCount, CoreSample, ItemStatus, MaintenanceLog, RockType};

/// Count occurrences of `key_fn(item)`.
///
/// Output follows first-seen key order. Counts sum to `items` length and
/// every distinct key appears once.
pub fn count_by<'a, T, K, I, F>(items: I, key_fn: F) -> Vec<(K, usize)>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        let key = key_fn(item);
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// `count_by` with an explicit order: stable sort of the first-seen output
/// by `sort_key`.
pub fn count_by_sorted<'a, T, K, S, I, F, G>(items: I, key_fn: F, sort_key: G) -> Vec<(K, usize)>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    K: Eq + Hash + Clone,
    S: Ord,
    F: Fn(&T) -> K,
    G: Fn(&K, usize) -> S,
{
    let mut counts = count_by(items, key_fn);
    counts.sort_by_key(|(k, n)| sort_key(k, *n));
    counts
}

/// Status distribution over every item of every maintenance log.
pub fn maintenance_status_distribution(logs: &[MaintenanceLog]) -> Vec<CategoryCount> {
    let items = logs.iter().flat_map(|log| log.maintenance_items.iter());
    count_by(items, |item| item.status)
        .into_iter()
        .map(|(status, value)| CategoryCount {
            name: ItemStatus::as_str(status).to_string(),
            value,
        })
        .collect()
}

/// Rock type distribution over core samples.
pub fn rock_type_distribution(samples: &[CoreSample]) -> Vec<CategoryCount> {
    count_by(samples, |s| s.rock_type)
        .into_iter()
        .map(|(rock, value)| CategoryCount {
            name: RockType::as_str(rock).to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::{core_sample, maintenance};
    use std::collections::{HashMap, HashSet};

    fn as_map(counts: &[CategoryCount]) -> HashMap<&str, usize> {
        counts.iter().map(|c| (c.name.as_str(), c.value)).collect()
    }

    #[test]
    fn test_maintenance_status_scenario() {
        use ItemStatus::*;
        let logs = vec![
            maintenance("EQ001", &[Good, Replaced, Good]),
            maintenance("EQ002", &[NeedsAttention]),
            maintenance("EQ003", &[Good]),
        ];

        let counts = maintenance_status_distribution(&logs);
        let expected: HashMap<&str, usize> =
            [("good", 3), ("replaced", 1), ("needs-attention", 1)].into_iter().collect();
        assert_eq!(as_map(&counts), expected);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_count_by_sum_and_distinct_keys() {
        let words = ["b", "a", "b", "c", "a", "b"];
        let counts = count_by(words.iter(), |w| w.to_string());

        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, words.len());
        let keys: HashSet<_> = counts.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys.len(), counts.len());
        let expected: HashSet<String> = words.iter().map(|w| w.to_string()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_count_by_first_seen_order() {
        let values = [3, 1, 3, 2, 1];
        let counts = count_by(values.iter(), |v| *v);
        assert_eq!(counts, vec![(3, 2), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_count_by_sorted_is_explicit() {
        let values = [3, 1, 3, 2, 3];
        let by_count_desc = count_by_sorted(values.iter(), |v| *v, |_, n| std::cmp::Reverse(n));
        assert_eq!(by_count_desc, vec![(3, 3), (1, 1), (2, 1)]);

        let by_key = count_by_sorted(values.iter(), |v| *v, |k, _| *k);
        assert_eq!(by_key, vec![(1, 1), (2, 1), (3, 3)]);
    }

    #[test]
    fn test_empty_input_yields_no_categories() {
        assert!(maintenance_status_distribution(&[]).is_empty());
        assert!(rock_type_distribution(&[]).is_empty());
    }

    #[test]
    fn test_rock_type_distribution() {
        let samples = vec![
            core_sample("H001", RockType::Igneous),
            core_sample("H002", RockType::Metamorphic),
            core_sample("H003", RockType::Igneous),
        ];
        let counts = rock_type_distribution(&samples);
        assert_eq!(
            counts,
            vec![
                CategoryCount { name: "igneous".into(), value: 2 },
                CategoryCount { name: "metamorphic".into(), value: 1 },
            ]
        );
    }
}
