use std::cmp::Ordering;

use crate::fuzzy::{weighted_score, WeightedKey, DEFAULT_THRESHOLD};
use crate::model::DirectoryItem;

pub const SEARCH_RESULT_LIMIT: usize = 20;

const NAME_WEIGHT: f64 = 0.7;
const PATH_WEIGHT: f64 = 0.3;

const ONE_HOUR_MS: f64 = 1000.0 * 60.0 * 60.0;
const ONE_DAY_HOURS: f64 = 24.0;
const ONE_WEEK_HOURS: f64 = 168.0;

/// Step weight applied to the stored frecency count by time since last access.
pub fn decay_weight(elapsed_ms: u64) -> f64 {
    let hours = elapsed_ms as f64 / ONE_HOUR_MS;
    if hours < 1.0 {
        4.0
    } else if hours < ONE_DAY_HOURS {
        2.0
    } else if hours < ONE_WEEK_HOURS {
        1.5
    } else {
        1.0
    }
}

pub fn frecency_score(item: &DirectoryItem, now_ms: u64) -> f64 {
    let elapsed = now_ms.saturating_sub(item.last_accessed);
    f64::from(item.frecency) * decay_weight(elapsed)
}

/// Orders `items` for display.
///
/// An empty query returns every item by descending frecency score. Otherwise
/// only fuzzy matches on name or path are kept, ranked the same way and capped
/// at [`SEARCH_RESULT_LIMIT`].
pub fn rank(items: &[DirectoryItem], query: &str, now_ms: u64) -> Vec<DirectoryItem> {
    let query = query.trim();
    if query.is_empty() {
        let mut all: Vec<&DirectoryItem> = items.iter().collect();
        sort_by_frecency(&mut all, now_ms);
        return all.into_iter().cloned().collect();
    }

    let mut matched = fuzzy_filter(items, query);
    sort_by_frecency(&mut matched, now_ms);
    matched
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .cloned()
        .collect()
}

/// Items matching `query`, best text match first.
pub fn fuzzy_filter<'a>(items: &'a [DirectoryItem], query: &str) -> Vec<&'a DirectoryItem> {
    let mut scored: Vec<(f64, &DirectoryItem)> = items
        .iter()
        .filter_map(|item| {
            let keys = [
                WeightedKey {
                    text: &item.name,
                    weight: NAME_WEIGHT,
                },
                WeightedKey {
                    text: &item.path,
                    weight: PATH_WEIGHT,
                },
            ];
            weighted_score(query, &keys, DEFAULT_THRESHOLD).map(|score| (score, item))
        })
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, item)| item).collect()
}

fn sort_by_frecency(items: &mut [&DirectoryItem], now_ms: u64) {
    items.sort_by(|a, b| {
        frecency_score(b, now_ms)
            .partial_cmp(&frecency_score(a, now_ms))
            .unwrap_or(Ordering::Equal)
    });
}
