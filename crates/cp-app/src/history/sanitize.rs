use std::collections::HashSet;

use cp_core::clipboard::ClipboardItem;
use cp_core::ids::ItemId;
use tracing::warn;

use super::eviction::enforce_recent_caps;

/// What load-time sanitation had to change.
#[derive(Debug, Default)]
pub struct SanitizeReport {
    pub recent_changed: bool,
    pub pinned_changed: bool,
    /// Items dropped from recent by the caps.
    pub evicted: Vec<ClipboardItem>,
}

pub struct Limits {
    pub max_history_items: usize,
    pub max_images: usize,
    pub max_pinned_items: usize,
}

/// Restores the collection invariants on freshly loaded snapshots.
///
/// - pinned items carry `is_pinned = true`, recent items `false`
/// - ids are unique: an id in both collections stays pinned, and repeats
///   inside one collection keep the first occurrence
/// - recent respects its caps
///
/// An oversized pinned collection is kept whole.
pub fn sanitize(
    recent: &mut Vec<ClipboardItem>,
    pinned: &mut Vec<ClipboardItem>,
    limits: &Limits,
) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    let mut pinned_ids: HashSet<ItemId> = HashSet::new();
    pinned.retain_mut(|item| {
        if !pinned_ids.insert(item.id.clone()) {
            warn!(item_id = %item.id, "duplicate id in pinned snapshot, dropping repeat");
            report.pinned_changed = true;
            return false;
        }
        if !item.is_pinned {
            warn!(item_id = %item.id, "pinned item stored with isPinned=false, fixing");
            item.is_pinned = true;
            report.pinned_changed = true;
        }
        true
    });

    let mut recent_ids: HashSet<ItemId> = HashSet::new();
    recent.retain_mut(|item| {
        if pinned_ids.contains(&item.id) {
            warn!(item_id = %item.id, "item present in both collections, keeping the pinned copy");
            report.recent_changed = true;
            return false;
        }
        if !recent_ids.insert(item.id.clone()) {
            warn!(item_id = %item.id, "duplicate id in history snapshot, dropping repeat");
            report.recent_changed = true;
            return false;
        }
        if item.is_pinned {
            warn!(item_id = %item.id, "recent item stored with isPinned=true, fixing");
            item.is_pinned = false;
            report.recent_changed = true;
        }
        true
    });

    let evicted = enforce_recent_caps(recent, limits.max_history_items, limits.max_images);
    if !evicted.is_empty() {
        warn!(count = evicted.len(), "history snapshot exceeded its caps, trimmed");
        report.recent_changed = true;
        report.evicted = evicted;
    }

    if pinned.len() > limits.max_pinned_items {
        warn!(
            count = pinned.len(),
            cap = limits.max_pinned_items,
            "pinned snapshot exceeds the pin cap; keeping all, further pins refused"
        );
    }

    report
}
