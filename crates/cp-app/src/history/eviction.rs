use std::collections::HashSet;

use cp_core::clipboard::{ClipboardItem, ImageMetadata};

/// Applies the recent-collection caps and returns what was removed.
///
/// Unpinned images beyond `max_images` go first (oldest first, text is never
/// counted), then the tail is cut until at most `max_items` remain.
pub fn enforce_recent_caps(
    recent: &mut Vec<ClipboardItem>,
    max_items: usize,
    max_images: usize,
) -> Vec<ClipboardItem> {
    let mut evicted = Vec::new();

    let mut images_seen = 0usize;
    let mut kept = Vec::with_capacity(recent.len());
    for item in recent.drain(..) {
        if item.is_image() && !item.is_pinned {
            images_seen += 1;
            if images_seen > max_images {
                evicted.push(item);
                continue;
            }
        }
        kept.push(item);
    }
    *recent = kept;

    if recent.len() > max_items {
        evicted.extend(recent.drain(max_items..));
    }

    evicted
}

/// Image files of `removed` items that no remaining item references.
pub fn unreferenced_images<'a>(
    removed: impl IntoIterator<Item = &'a ClipboardItem>,
    recent: &[ClipboardItem],
    pinned: &[ClipboardItem],
) -> Vec<ImageMetadata> {
    let referenced: HashSet<&str> = recent
        .iter()
        .chain(pinned.iter())
        .filter_map(|item| item.image_metadata())
        .map(|meta| meta.filename.as_str())
        .collect();

    let mut seen = HashSet::new();
    removed
        .into_iter()
        .filter_map(|item| item.image_metadata())
        .filter(|meta| !referenced.contains(meta.filename.as_str()))
        .filter(|meta| seen.insert(meta.filename.clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cp_core::clipboard::{ContentType, IMAGE_FORMAT_PNG};
    use cp_core::ids::ItemId;

    fn text(content: &str) -> ClipboardItem {
        ClipboardItem::new_text(content, ContentType::Plain, None, Utc::now())
    }

    fn image(name: &str) -> ClipboardItem {
        ClipboardItem::new_image(
            ItemId::from(name),
            ImageMetadata {
                width: 1,
                height: 1,
                format: IMAGE_FORMAT_PNG.to_string(),
                file_size: 1,
                filename: format!("{name}.png"),
                thumbnail_filename: format!("{name}_thumb.png"),
            },
            Utc::now(),
        )
    }

    #[test]
    fn trims_tail_to_max_items() {
        let mut recent = vec![text("a"), text("b"), text("c")];
        let evicted = enforce_recent_caps(&mut recent, 2, 20);

        assert_eq!(recent.len(), 2);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].text_content(), Some("c"));
    }

    #[test]
    fn image_cap_drops_oldest_images_and_keeps_text() {
        let mut recent = vec![image("i1"), text("t1"), image("i2"), image("i3"), text("t2")];
        let evicted = enforce_recent_caps(&mut recent, 50, 2);

        let ids: Vec<&str> = recent.iter().map(|i| i.id.as_ref()).collect();
        assert_eq!(ids[0], "i1");
        assert_eq!(ids[2], "i2");
        assert_eq!(recent.len(), 4);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id.as_ref(), "i3");
    }

    #[test]
    fn zero_caps_empty_the_collection() {
        let mut recent = vec![text("a"), image("i")];
        let evicted = enforce_recent_caps(&mut recent, 0, 0);
        assert!(recent.is_empty());
        assert_eq!(evicted.len(), 2);
    }

    #[test]
    fn referenced_images_are_not_reclaimed() {
        let shared = image("shared");
        let mut pinned_copy = shared.clone();
        pinned_copy.id = ItemId::from("other");
        pinned_copy.is_pinned = true;
        let lonely = image("lonely");

        let reclaim = unreferenced_images([&shared, &lonely, &lonely], &[], &[pinned_copy]);

        assert_eq!(reclaim.len(), 1);
        assert_eq!(reclaim[0].filename, "lonely.png");
    }
}
