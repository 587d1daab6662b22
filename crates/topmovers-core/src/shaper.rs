//! Per-category truncation of a fetched snapshot.

use crate::{Limit, MoversSnapshot, StockEntry};

/// Keeps the first `limit` entries of each list.
///
/// Stable prefix truncation: lists are never reordered or padded, and
/// `last_updated` is copied through. Provider `metadata` and the raw body are
/// not part of the shaped output.
pub fn shape(snapshot: &MoversSnapshot, limit: Limit) -> MoversSnapshot {
    MoversSnapshot {
        metadata: None,
        last_updated: snapshot.last_updated.clone(),
        top_gainers: prefix(&snapshot.top_gainers, limit),
        top_losers: prefix(&snapshot.top_losers, limit),
        most_actively_traded: prefix(&snapshot.most_actively_traded, limit),
        raw: None,
    }
}

fn prefix(entries: &[StockEntry], limit: Limit) -> Vec<StockEntry> {
    entries.iter().take(limit.as_usize()).cloned().collect()
}
