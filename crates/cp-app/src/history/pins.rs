use cp_core::ids::ItemId;
use tracing::{debug, info, info_span, warn};

use super::engine::HistoryEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    Pinned,
    AlreadyPinned,
    /// The pinned collection is at its hard cap; the item stays in recent.
    CapReached,
    NotFound,
}

impl HistoryEngine {
    /// Moves a recent item into the pinned collection.
    pub fn pin(&mut self, id: &ItemId) -> PinOutcome {
        let _span = info_span!("engine.pin", item_id = %id).entered();

        if self.pinned.iter().any(|item| &item.id == id) {
            debug!("already pinned");
            return PinOutcome::AlreadyPinned;
        }
        if self.pinned.len() >= self.config.max_pinned_items {
            info!(cap = self.config.max_pinned_items, "pin cap reached, ignoring pin");
            return PinOutcome::CapReached;
        }
        let Some(index) = self.recent.iter().position(|item| &item.id == id) else {
            warn!("pin requested for unknown item");
            return PinOutcome::NotFound;
        };

        let mut item = self.recent.remove(index);
        item.is_pinned = true;
        item.timestamp = self.now();
        item.pin_order = Some(self.next_pin_order());
        if let Some(deadline) = item.clear_auto_delete() {
            debug!(%deadline, "pinned item no longer auto-deletes");
        }
        self.pinned.push(item);

        self.pins_changed();
        self.history_changed();
        info!(pinned = self.pinned.len(), "item pinned");
        PinOutcome::Pinned
    }

    /// Moves a pinned item back to the front of recent. Returns `false` when
    /// the id is not pinned.
    pub fn unpin(&mut self, id: &ItemId) -> bool {
        let _span = info_span!("engine.unpin", item_id = %id).entered();

        let Some(index) = self.pinned.iter().position(|item| &item.id == id) else {
            warn!("unpin requested for an item that is not pinned");
            return false;
        };

        let mut item = self.pinned.remove(index);
        item.is_pinned = false;
        item.pin_order = None;

        self.pins_changed();
        self.insert_front(item);
        info!("item unpinned");
        true
    }

    /// Removes an item from whichever collection holds it, pinned first.
    pub fn delete(&mut self, id: &ItemId) -> bool {
        let _span = info_span!("engine.delete", item_id = %id).entered();

        if let Some(index) = self.pinned.iter().position(|item| &item.id == id) {
            let removed = self.pinned.remove(index);
            self.pins_changed();
            self.reclaim_images(std::slice::from_ref(&removed));
            info!("pinned item deleted");
            return true;
        }
        if let Some(index) = self.recent.iter().position(|item| &item.id == id) {
            let removed = self.recent.remove(index);
            self.history_changed();
            self.reclaim_images(std::slice::from_ref(&removed));
            info!("history item deleted");
            return true;
        }
        debug!("delete requested for unknown item");
        false
    }

    /// Empties recent history. Pinned items are untouched.
    pub fn clear_history(&mut self) {
        let _span = info_span!("engine.clear_history").entered();

        let removed = std::mem::take(&mut self.recent);
        self.history_changed();
        self.reclaim_images(&removed);
        info!(count = removed.len(), "history cleared");
    }

    /// Stops suggesting a pin for a recent text item.
    pub fn dismiss_pin_suggestion(&mut self, id: &ItemId) -> bool {
        let Some(item) = self
            .recent
            .iter_mut()
            .find(|item| &item.id == id && item.is_text())
        else {
            return false;
        };
        if item.dismiss_pin_suggestion() {
            self.history_changed();
            debug!(item_id = %id, "pin suggestion dismissed");
        }
        true
    }

    fn next_pin_order(&self) -> u32 {
        self.pinned
            .iter()
            .filter_map(|item| item.pin_order)
            .max()
            .map_or(self.pinned.len() as u32, |max| max.saturating_add(1))
    }
}
