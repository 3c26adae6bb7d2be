//! Contains `count_frequencies`, for callers that build a table from sample data.

use alloc::collections::BTreeMap;

/// Count how often each symbol occurs in `samples`.
pub fn count_frequencies<T: Ord>(samples: impl IntoIterator<Item = T>) -> BTreeMap<T, u64> {
    let mut table = BTreeMap::new();
    for symbol in samples {
        *table.entry(symbol).or_insert(0) += 1;
    }
    table
}
