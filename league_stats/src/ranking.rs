use log::debug;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::StatsErrors;

/// Competition ranks of the items, highest key first.
///
/// `output[i]` is the rank of `items[i]`. Items with equal keys share a rank, and
/// the next key down gets the shared rank plus the size of the group:
/// keys `[10, 10, 5, 1]` give ranks `[1, 1, 3, 4]`.
///
/// ```
/// use league_stats::ranking::competition_ranks;
///
/// let scores = [10, 10, 5, 1];
/// assert_eq!(competition_ranks(&scores, |s| *s), vec![1, 1, 3, 4]);
/// ```
pub fn competition_ranks<T, K: Ord>(items: &[T], key_of: impl Fn(&T) -> K) -> Vec<u32> {
    // Group the indices by key.
    let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (idx, item) in items.iter().enumerate() {
        groups.entry(key_of(item)).or_default().push(idx);
    }
    // The map is sorted in increasing order.
    expand_groups(groups.into_values().rev(), items.len())
}

/// Same as [competition_ranks], for keys that only have a partial order such as floats.
///
/// Fails if one of the keys cannot be compared (NaN for example).
pub fn try_competition_ranks<T, K: PartialOrd>(
    items: &[T],
    key_of: impl Fn(&T) -> K,
) -> Result<Vec<u32>, StatsErrors> {
    let mut keyed: Vec<(K, usize)> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let key = key_of(item);
        if key.partial_cmp(&key).is_none() {
            return Err(StatsErrors::IncomparableKey { index });
        }
        keyed.push((key, index));
    }

    let mut incomparable: Option<usize> = None;
    keyed.sort_by(|(k1, i1), (k2, i2)| match k2.partial_cmp(k1) {
        Some(o) => o,
        None => {
            incomparable = Some(*i1.max(i2));
            Ordering::Equal
        }
    });
    if let Some(index) = incomparable {
        return Err(StatsErrors::IncomparableKey { index });
    }

    // Consecutive runs of equal keys form the groups.
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut last_key: Option<&K> = None;
    for (key, idx) in keyed.iter() {
        let same_as_last = matches!(last_key, Some(lk) if lk == key);
        if same_as_last {
            if let Some(group) = groups.last_mut() {
                group.push(*idx);
            }
        } else {
            groups.push(vec![*idx]);
        }
        last_key = Some(key);
    }
    Ok(expand_groups(groups.into_iter(), items.len()))
}

// Groups must come best first.
fn expand_groups(groups: impl Iterator<Item = Vec<usize>>, num_items: usize) -> Vec<u32> {
    let mut result: Vec<u32> = vec![0; num_items];
    let mut current_rank: u32 = 1;
    for group in groups {
        debug!(
            "expand_groups: rank {} shared by {} item(s)",
            current_rank,
            group.len()
        );
        for idx in group.iter() {
            result[*idx] = current_rank;
        }
        current_rank += group.len() as u32;
    }
    result
}
